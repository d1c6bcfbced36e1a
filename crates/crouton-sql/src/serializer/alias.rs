use super::{Formatter, ToSql};

use indexmap::IndexMap;

/// Maps `param.column` references to the output aliases `_c0`, `_c1`, ...
///
/// Aliases are numbered in first-seen order. Asking again for a pair that
/// already has an alias returns the same alias. One table is one formatting
/// context; reuse it to keep aliases stable across statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnAliasTable {
    columns: IndexMap<(String, String), usize>,
}

/// Rendered as `_c<N>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ColumnAlias(pub(super) usize);

impl ColumnAliasTable {
    pub fn new() -> ColumnAliasTable {
        ColumnAliasTable::default()
    }

    /// Returns the alias index for the pair, allocating one on first use.
    pub fn alias(&mut self, param: &str, column: &str) -> usize {
        let next = self.columns.len();
        *self
            .columns
            .entry((param.to_string(), column.to_ascii_lowercase()))
            .or_insert(next)
    }

    /// Alias text for the pair, if one was allocated.
    pub fn get(&self, param: &str, column: &str) -> Option<String> {
        self.columns
            .get(&(param.to_string(), column.to_ascii_lowercase()))
            .map(|index| alias_name(*index))
    }

    /// Reverses an alias into its `(param, column)` pair.
    pub fn resolve(&self, alias: &str) -> Option<(&str, &str)> {
        let index: usize = alias
            .strip_prefix("_c")
            .or_else(|| alias.strip_prefix("_C"))?
            .parse()
            .ok()?;

        self.columns
            .get_index(index)
            .map(|((param, column), _)| (param.as_str(), column.as_str()))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Every allocated alias with its pair, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (String, &str, &str)> + '_ {
        self.columns
            .iter()
            .map(|((param, column), index)| (alias_name(*index), param.as_str(), column.as_str()))
    }
}

pub fn alias_name(index: usize) -> String {
    format!("_c{index}")
}

impl ToSql for ColumnAlias {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, "_c" self.0);
    }
}
