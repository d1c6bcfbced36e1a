use crate::ExecLog;

use crouton::{Executor, Result, Row, Value};
use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, PoisonError,
    },
};

/// An executor that records every statement and replays canned results.
///
/// Clones share state, so a test keeps one clone to script responses and
/// inspect the log after handing the other to `Db::builder().build(..)`.
/// Statements with no scripted response return no rows.
#[derive(Debug, Clone, Default)]
pub struct MockExecutor {
    log: ExecLog,
    responses: Arc<Mutex<VecDeque<Result<Vec<Row>>>>>,
    open: Arc<AtomicBool>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the rows returned by the next unanswered statement.
    pub fn respond(&self, rows: impl IntoIterator<Item = Row>) -> &Self {
        self.responses().push_back(Ok(rows.into_iter().collect()));
        self
    }

    /// Queues an error for the next unanswered statement.
    pub fn fail(&self, err: crouton::Error) -> &Self {
        self.responses().push_back(Err(err));
        self
    }

    pub fn log(&self) -> ExecLog {
        self.log.clone()
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    fn responses(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<Vec<Row>>>> {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Executor for MockExecutor {
    fn open(&mut self) -> Result<()> {
        self.open.store(true, Ordering::Release);
        Ok(())
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        assert!(self.is_open(), "statement run before the executor was opened");

        self.log.push(sql, params);
        self.responses().pop_front().unwrap_or_else(|| Ok(vec![]))
    }

    fn close(&mut self) -> Result<()> {
        self.open.store(false, Ordering::Release);
        Ok(())
    }
}
