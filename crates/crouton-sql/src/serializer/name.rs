use super::{Formatter, ToSql};

/// A table name, with the serializer's prefix applied.
pub(super) struct TableName<'a>(pub(super) &'a str);

impl ToSql for TableName<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let serializer = f.serializer;
        let prefix = serializer.table_prefix.as_ref();
        fmt!(f, prefix self.0);
    }
}
