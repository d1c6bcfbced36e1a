mod builder;
pub use builder::Builder;

use crate::{Hydrator, Model, Query, Result};

use crouton_core::{
    driver::Executor,
    schema::{ModelRef, Registry},
    stmt::{Delete, Expr, Insert, ParamRef, Row, Select, Statement, Update, Value},
    Error,
};
use crouton_sql::{Formatted, Serializer};
use std::sync::Arc;

/// A repository over one executor.
///
/// Statements are compiled against the repository's registry, formatted by
/// its serializer and run on its executor, one at a time.
#[derive(Debug)]
pub struct Db {
    registry: Arc<Registry>,
    serializer: Serializer,
    executor: Box<dyn Executor>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn serializer(&self) -> &Serializer {
        &self.serializer
    }

    /// Starts a query for instances of `M`.
    pub fn select<M: Model>(&self) -> Query<M> {
        Query::new()
    }

    /// Runs a query, returning every matching instance.
    pub fn all<M: Model>(&mut self, query: &Query<M>) -> Result<Vec<M>> {
        let select = query.build(&self.registry)?;
        self.load(select)
    }

    /// Finds the instance with the given primary key.
    pub fn find<M: Model>(&mut self, key: impl Into<Value>) -> Result<Option<M>> {
        let model = ModelRef::of::<M>();
        let select = Select::new(&self.registry, model)?.filter(
            &self.registry,
            &Expr::eq(Expr::member(ParamRef::Implicit, model, vec![]), key.into()),
        )?;

        Ok(self.load(select)?.into_iter().next())
    }

    /// Writes an instance.
    ///
    /// A new instance is inserted and receives the key the database
    /// generated, if it had none. A loaded instance has the columns of its
    /// dirty members updated; when nothing is dirty no SQL is run.
    pub fn store<M: Model>(&mut self, entity: &mut M) -> Result<()> {
        let descriptor = self.registry.describe_model::<M>()?;
        let row = entity.to_row();

        if entity.is_new() {
            let insert = Insert::new(descriptor.clone(), &row)?;
            let returning_key = insert.returning_key;
            let rows = self.exec(&insert.into())?;

            if returning_key {
                let key = match generated_key(&rows) {
                    Some(key) => key.convert(descriptor.primary_key_column().ty)?,
                    None => {
                        return Err(Error::invalid_result(format!(
                            "no generated key returned for `{}`",
                            descriptor.name()
                        )))
                    }
                };

                entity.assign_key(key)?;
            }
        } else {
            let mut update = Update::new(descriptor.clone());
            update.push_tracked(&row, &*entity)?;

            if update.is_noop() {
                tracing::debug!(model = descriptor.name(), "crouton.store.unchanged");
            } else {
                self.exec(&update.into())?;
            }
        }

        entity.mark_persisted();
        Ok(())
    }

    /// Deletes an instance by its primary key.
    pub fn delete<M: Model>(&mut self, entity: &M) -> Result<()> {
        let descriptor = self.registry.describe_model::<M>()?;

        let key = match entity.to_row().remove(&descriptor.primary_key) {
            Some(key) if !key.is_null() => key,
            _ => crouton_core::bail!(
                "cannot delete `{}` without a primary key value",
                descriptor.name()
            ),
        };

        let delete = Delete::by_key(&self.registry, descriptor.model, key)?;
        self.exec(&delete.into())?;
        Ok(())
    }

    /// Formats and runs a statement, returning its result rows.
    ///
    /// When the dialect reads generated keys back with a separate statement,
    /// the rows of that statement are returned instead.
    pub fn exec(&mut self, stmt: &Statement) -> Result<Vec<Row>> {
        let formatted = self.serializer.serialize(stmt)?;
        self.run(&formatted)
    }

    /// Closes the executor.
    pub fn close(mut self) -> Result<()> {
        self.executor.close()
    }

    fn load<M: Model>(&mut self, select: Select) -> Result<Vec<M>> {
        let formatted = self.serializer.serialize(&Statement::Select(select.clone()))?;
        let rows = self.run(&formatted)?;

        Hydrator::new(&select, &formatted.aliases)
            .hydrate(rows)?
            .iter()
            .map(M::load)
            .collect()
    }

    fn run(&mut self, formatted: &Formatted) -> Result<Vec<Row>> {
        if formatted.sql.is_empty() {
            return Ok(vec![]);
        }

        let rows = self.executor.execute(&formatted.sql, &formatted.params)?;

        match &formatted.follow_up {
            Some(follow_up) => self.executor.execute(follow_up, &[]),
            None => Ok(rows),
        }
    }
}

/// The first column of the first row.
fn generated_key(rows: &[Row]) -> Option<Value> {
    let (_, value) = rows.first()?.iter().next()?;
    Some(value.clone()).filter(|value| !value.is_null())
}
