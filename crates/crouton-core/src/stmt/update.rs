use super::{Row, Value};
use crate::{schema::TypeDescriptor, track::Tracked, Error, Result};

use std::sync::Arc;

/// Writes the changed columns of a batch of rows, one statement per row.
#[derive(Debug, Clone)]
pub struct Update {
    pub target: Arc<TypeDescriptor>,
    pub rows: Vec<UpdateRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRow {
    /// Primary key of the row being updated
    pub key: Value,

    /// Changed columns and their new values. Empty when nothing changed.
    pub assignments: Vec<(String, Value)>,
}

impl Update {
    pub fn new(target: Arc<TypeDescriptor>) -> Update {
        Update {
            target,
            rows: vec![],
        }
    }

    /// Adds a row, writing only the columns of its dirty fields.
    ///
    /// The dirty set is captured now; later changes to the entity are not
    /// reflected in this statement.
    pub fn push_tracked(&mut self, row: &Row, entity: &(impl Tracked + ?Sized)) -> Result<()> {
        self.push(row, &entity.dirty_fields())
    }

    pub fn push(&mut self, row: &Row, dirty: &[String]) -> Result<()> {
        let target = &self.target;

        let key = match row.get(&target.primary_key) {
            Some(key) if !key.is_null() => key.clone(),
            _ => crate::bail!(
                "cannot update `{}` without a primary key value",
                target.name()
            ),
        };

        let mut assignments: Vec<(String, Value)> = vec![];

        for field in dirty {
            let column = if let Some(column) = target.column_for_member(field) {
                &column.name
            } else if let Some(reference) = target.reference(field) {
                &reference.column
            } else if target.relation(field).is_some() {
                // Has-many members own no column.
                continue;
            } else {
                return Err(Error::invalid_schema(format!(
                    "`{}` has no member `{field}`",
                    target.name()
                )));
            };

            if *column == target.primary_key || assignments.iter().any(|(c, _)| c == column) {
                continue;
            }

            assignments.push((
                column.clone(),
                row.get(column).cloned().unwrap_or_default(),
            ));
        }

        self.rows.push(UpdateRow { key, assignments });
        Ok(())
    }

    /// True when no row has anything to write.
    pub fn is_noop(&self) -> bool {
        self.rows.iter().all(|row| row.assignments.is_empty())
    }
}
