use super::{Row, Value};
use crate::{schema::TypeDescriptor, Result};

use std::sync::Arc;

/// Inserts a batch of rows into one table.
#[derive(Debug, Clone)]
pub struct Insert {
    pub target: Arc<TypeDescriptor>,

    /// Columns written, in table order
    pub columns: Vec<String>,

    /// One value per column for each row
    pub rows: Vec<Vec<Value>>,

    /// The primary key is generated by the database and read back.
    pub returning_key: bool,
}

impl Insert {
    /// Starts a batch with `row`.
    ///
    /// A row without a primary key value asks the database to generate one;
    /// every later row in the batch must do the same.
    pub fn new(target: Arc<TypeDescriptor>, row: &Row) -> Result<Insert> {
        let returning_key = row
            .get(&target.primary_key)
            .map_or(true, Value::is_null);

        let columns = target
            .columns
            .iter()
            .filter(|column| !(column.primary_key && returning_key))
            .filter(|column| column.member.is_some() || row.contains_key(&column.name))
            .map(|column| column.name.clone())
            .collect();

        let mut insert = Insert {
            target,
            columns,
            rows: vec![],
            returning_key,
        };
        insert.push(row)?;
        Ok(insert)
    }

    pub fn push(&mut self, row: &Row) -> Result<()> {
        let generated = row
            .get(&self.target.primary_key)
            .map_or(true, Value::is_null);

        if generated != self.returning_key {
            crate::bail!(
                "cannot batch `{}` rows with and without primary key values",
                self.target.name()
            );
        }

        self.rows.push(
            self.columns
                .iter()
                .map(|column| row.get(column).cloned().unwrap_or_default())
                .collect(),
        );
        Ok(())
    }
}
