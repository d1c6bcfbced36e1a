use crouton_core::{stmt, Error, Result};
use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
    Row,
};

#[derive(Debug)]
pub struct Value<'a>(&'a stmt::Value);

/// A value read out of a result row.
pub struct Loaded(stmt::Value);

impl<'a> From<&'a stmt::Value> for Value<'a> {
    fn from(value: &'a stmt::Value) -> Self {
        Self(value)
    }
}

impl Value<'_> {
    /// Converts the value at `index` of a result row.
    ///
    /// SQLite stores integers as 64 bits and has no boolean type; narrowing
    /// happens when the value is loaded into a model.
    pub fn from_sql(row: &Row<'_>, index: usize, column: &str) -> Result<Loaded> {
        let value = match row.get_ref(index).map_err(Error::driver)? {
            ValueRef::Null => stmt::Value::Null,
            ValueRef::Integer(value) => stmt::Value::I64(value),
            ValueRef::Real(value) => stmt::Value::F64(value),
            ValueRef::Text(value) => stmt::Value::String(
                std::str::from_utf8(value)
                    .map_err(Error::driver)?
                    .to_string(),
            ),
            ValueRef::Blob(_) => {
                crouton_core::bail!("column `{column}` holds a blob, which is not supported")
            }
        };

        Ok(Loaded(value))
    }
}

impl Loaded {
    pub fn into_inner(self) -> stmt::Value {
        self.0
    }
}

impl ToSql for Value<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use stmt::Value;

        match self.0 {
            Value::Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            Value::Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            Value::F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            Value::I16(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v as i64))),
            Value::I32(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v as i64))),
            Value::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            Value::String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            Value::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
            Value::List(_) => Err(rusqlite::Error::ToSqlConversionFailure(
                "lists cannot be bound to a single parameter".into(),
            )),
        }
    }
}
