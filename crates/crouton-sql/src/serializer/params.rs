use super::{Flavor, Formatter, ToSql};

use crouton_core::stmt::Value;

/// How values reach the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamStyle {
    /// Values are rendered as SQL literals
    #[default]
    Inline,

    /// Values are bound through placeholders and returned alongside the SQL
    Placeholders,
}

/// A bound parameter, numbered from 1 in binding order.
pub(super) struct Placeholder(pub(super) usize);

impl Formatter<'_> {
    pub(super) fn push_param(&mut self, value: &Value) -> Placeholder {
        self.params.push(value.clone());
        Placeholder(self.params.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match f.serializer.flavor {
            Flavor::Generic | Flavor::Mysql => fmt!(f, "?"),
            Flavor::Mssql => fmt!(f, "@p" self.0),
            Flavor::Postgresql => fmt!(f, "$" self.0),
            Flavor::Sqlite => fmt!(f, "?" self.0),
        }
    }
}
