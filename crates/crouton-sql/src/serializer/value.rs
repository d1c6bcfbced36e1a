use super::{Comma, Flavor, Formatter, ParamStyle, ToSql};

use crouton_core::stmt::Value;
use std::fmt::Write;

/// A value rendered as SQL literal text.
struct Literal<'a>(&'a Value);

impl ToSql for &Value {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            // An empty list matches nothing.
            Value::List(items) if items.is_empty() => fmt!(f, "(NULL)"),
            Value::List(items) => fmt!(f, "(" Comma(items) ")"),
            value if f.serializer.style == ParamStyle::Placeholders => {
                let placeholder = f.push_param(value);
                fmt!(f, placeholder);
            }
            value => fmt!(f, Literal(value)),
        }
    }
}

impl ToSql for Literal<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        // Writing to a `String` cannot fail.
        let _ = match self.0 {
            Value::Null => write!(f.dst, "NULL"),
            Value::Bool(value) if f.serializer.flavor == Flavor::Mssql => {
                write!(f.dst, "{}", u8::from(*value))
            }
            Value::Bool(true) => write!(f.dst, "TRUE"),
            Value::Bool(false) => write!(f.dst, "FALSE"),
            Value::F64(value) => write!(f.dst, "{value}"),
            Value::I16(value) => write!(f.dst, "{value}"),
            Value::I32(value) => write!(f.dst, "{value}"),
            Value::I64(value) => write!(f.dst, "{value}"),
            Value::String(value) => write!(f.dst, "'{}'", value.replace('\'', "''")),
            Value::List(items) => {
                fmt!(f, "(" Comma(items) ")");
                Ok(())
            }
        };
    }
}
