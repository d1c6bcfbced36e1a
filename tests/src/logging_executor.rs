use crate::ExecLog;

use crouton::{Executor, Result, Row, Value};

/// An executor wrapper that logs every statement for testing purposes
#[derive(Debug)]
pub struct LoggingExecutor {
    /// The underlying executor that actually runs statements
    inner: Box<dyn Executor>,

    log: ExecLog,
}

impl LoggingExecutor {
    pub fn new(inner: impl Executor) -> Self {
        Self {
            inner: Box::new(inner),
            log: ExecLog::new(),
        }
    }

    /// Get a handle to access the statement log
    pub fn log(&self) -> ExecLog {
        self.log.clone()
    }
}

impl Executor for LoggingExecutor {
    fn open(&mut self) -> Result<()> {
        self.inner.open()
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        self.log.push(sql, params);
        self.inner.execute(sql, params)
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }
}
