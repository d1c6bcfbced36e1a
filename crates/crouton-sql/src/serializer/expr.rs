use super::{ColumnAlias, Formatter, ToSql};

use crouton_core::{
    stmt::{BinaryOp, CallKind, Condition},
    Error, Result,
};

/// A column reference, qualified with its parameter unless the statement
/// reads a single table.
struct ColumnRef<'a> {
    param: &'a str,
    column: &'a str,
}

impl ToSql for &Condition {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Condition::Binary(binary) => {
                let (lhs, op, rhs) = (&*binary.lhs, binary.op, &*binary.rhs);
                fmt!(f, "(" lhs ") " op " (" rhs ")");
            }
            Condition::Call(call) => match (call.kind, &call.args[..]) {
                (CallKind::Contains, [list, item]) => {
                    fmt!(f, "(" item ") IN " list);
                }
                (CallKind::Convert(_), [arg]) => fmt!(f, arg),
                (kind, args) => unreachable!("{kind:?} called with {} arguments", args.len()),
            },
            Condition::Constant(value) => fmt!(f, value),
            Condition::Member(member) => fmt!(
                f,
                ColumnRef {
                    param: &member.param,
                    column: &member.path,
                }
            ),
            Condition::Parameter(parameter) => fmt!(
                f,
                ColumnRef {
                    param: &parameter.param,
                    column: &parameter.key,
                }
            ),
        }
    }
}

/// Rejects calls whose argument count does not match their kind.
pub(super) fn check(condition: &Condition) -> Result<()> {
    match condition {
        Condition::Binary(binary) => {
            check(&binary.lhs)?;
            check(&binary.rhs)
        }
        Condition::Call(call) => {
            let arity = match call.kind {
                CallKind::Contains => 2,
                CallKind::Convert(_) => 1,
            };

            if call.args.len() != arity {
                return Err(Error::unsupported_expression(format!(
                    "{:?} takes {arity} arguments; {} were given",
                    call.kind,
                    call.args.len()
                )));
            }

            call.args.iter().try_for_each(check)
        }
        Condition::Constant(_) | Condition::Member(_) | Condition::Parameter(_) => Ok(()),
    }
}

impl ToSql for BinaryOp {
    fn to_sql(self, f: &mut Formatter<'_>) {
        use std::fmt::Write;

        // Writing to a `String` cannot fail.
        let _ = write!(f.dst, "{self}");
    }
}

impl ToSql for ColumnRef<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        if f.qualify {
            fmt!(f, self.param "." self.column);
        } else {
            fmt!(f, self.column);
        }
    }
}

/// `param.column AS _cN`, allocating the alias from the formatting context.
pub(super) struct AliasedColumn<'a> {
    pub(super) param: &'a str,
    pub(super) column: &'a str,
}

impl ToSql for AliasedColumn<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let alias = ColumnAlias(f.aliases.alias(self.param, self.column));
        fmt!(f, self.param "." self.column " AS " alias);
    }
}
