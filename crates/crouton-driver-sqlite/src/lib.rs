mod value;
pub(crate) use value::Value;

use crouton_core::{
    driver::Executor,
    stmt::{self, Row},
    Error, Result,
};
use rusqlite::{fallible_iterator::FallibleIterator as _, Batch, Connection};
use std::path::{Path, PathBuf};

/// Runs statements on a SQLite database through rusqlite.
///
/// The connection is opened on [`Executor::open`], or on first use.
#[derive(Debug)]
pub struct Sqlite {
    target: Target,
    connection: Option<Connection>,
}

#[derive(Debug, Clone)]
enum Target {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self {
            target: Target::InMemory,
            connection: None,
        }
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            target: Target::File(path.as_ref().to_path_buf()),
            connection: None,
        }
    }

    /// Runs SQL that returns no rows, such as schema setup.
    pub fn execute_batch(&mut self, sql: &str) -> Result<()> {
        self.connection()?.execute_batch(sql).map_err(Error::driver)
    }

    fn connection(&mut self) -> Result<&mut Connection> {
        if self.connection.is_none() {
            let connection = match &self.target {
                Target::File(path) => Connection::open(path),
                Target::InMemory => Connection::open_in_memory(),
            }
            .map_err(Error::driver)?;

            self.connection = Some(connection);
        }

        self.connection
            .as_mut()
            .ok_or_else(|| crouton_core::err!("sqlite connection is closed"))
    }
}

impl Executor for Sqlite {
    fn open(&mut self) -> Result<()> {
        self.connection()?;
        Ok(())
    }

    /// Runs every statement in `sql` in order and returns the rows of the
    /// last one. Each statement binds as many leading values of `params` as
    /// it declares placeholders.
    fn execute(&mut self, sql: &str, params: &[stmt::Value]) -> Result<Vec<Row>> {
        let connection = self.connection()?;
        let mut batch = Batch::new(connection, sql);
        let mut rows = vec![];

        while let Some(mut statement) = batch.next().map_err(Error::driver)? {
            let count = statement.parameter_count();
            let Some(bound) = params.get(..count) else {
                crouton_core::bail!(
                    "statement expects {count} parameters; {} were given",
                    params.len()
                );
            };

            let columns: Vec<String> = statement
                .column_names()
                .into_iter()
                .map(str::to_ascii_lowercase)
                .collect();

            let mut result = statement
                .query(rusqlite::params_from_iter(bound.iter().map(Value::from)))
                .map_err(Error::driver)?;

            rows.clear();

            while let Some(row) = result.next().map_err(Error::driver)? {
                let mut values = Row::new();

                for (index, column) in columns.iter().enumerate() {
                    values.insert(column, Value::from_sql(row, index, column)?.into_inner());
                }

                rows.push(values);
            }
        }

        tracing::trace!(rows = rows.len(), "crouton.sqlite.execute");

        Ok(rows)
    }

    fn close(&mut self) -> Result<()> {
        if let Some(connection) = self.connection.take() {
            connection.close().map_err(|(_, err)| Error::driver(err))?;
        }
        Ok(())
    }
}
