use crate::{
    stmt::{Row, Value},
    Result,
};

use std::fmt::Debug;

/// Runs SQL against a database.
///
/// The executor owns the connection. Calls block the calling thread; retries,
/// timeouts and cancellation are the executor's concern.
pub trait Executor: Debug + Send + 'static {
    /// Opens the underlying connection.
    fn open(&mut self) -> Result<()> {
        Ok(())
    }

    /// Executes one statement and returns its result rows, keyed by
    /// lower-cased column name or alias. Statements that return nothing
    /// yield no rows.
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>>;

    /// Closes the underlying connection.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: Executor + ?Sized> Executor for Box<T> {
    fn open(&mut self) -> Result<()> {
        (**self).open()
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        (**self).execute(sql, params)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
