use crouton::Value;

use std::sync::{Arc, Mutex, PoisonError};

/// One statement handed to an executor.
#[derive(Debug, Clone, PartialEq)]
pub struct Executed {
    pub sql: String,
    pub params: Vec<Value>,
}

/// A handle to the statements an executor has run, shared with the
/// executor after it moves into a `Db`.
#[derive(Debug, Clone, Default)]
pub struct ExecLog {
    ops: Arc<Mutex<Vec<Executed>>>,
}

impl ExecLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, sql: &str, params: &[Value]) {
        self.lock().push(Executed {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
    }

    /// Get the number of logged statements
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// SQL text of every logged statement, in execution order
    pub fn sql(&self) -> Vec<String> {
        self.lock().iter().map(|op| op.sql.clone()).collect()
    }

    /// The most recently logged statement
    pub fn last(&self) -> Option<Executed> {
        self.lock().last().cloned()
    }

    /// Count statements whose SQL starts with `prefix`
    pub fn count_prefixed(&self, prefix: &str) -> usize {
        self.lock()
            .iter()
            .filter(|op| op.sql.starts_with(prefix))
            .count()
    }

    /// Remove and return the first statement from the log
    pub fn pop(&mut self) -> Option<Executed> {
        let mut ops = self.lock();
        if ops.is_empty() {
            None
        } else {
            Some(ops.remove(0))
        }
    }

    pub fn clear(&mut self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Executed>> {
        self.ops.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
