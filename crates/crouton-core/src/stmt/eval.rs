use super::{BinaryOp, CallKind, CondBinary, CondCall, Condition, Row, Value};
use crate::{Error, Result};

use std::cmp::Ordering;

/// Supplies column values to [`Condition::eval`].
pub trait Input {
    fn column(&self, param: &str, column: &str) -> Option<&Value>;
}

/// One row per parameter.
#[derive(Debug, Default, Clone, Copy)]
pub struct RowScope<'a> {
    rows: [Option<(&'a str, &'a Row)>; 2],
}

impl<'a> RowScope<'a> {
    pub fn new(param: &'a str, row: &'a Row) -> RowScope<'a> {
        RowScope {
            rows: [Some((param, row)), None],
        }
    }

    /// Scope over a left and a right row, as seen by a join predicate.
    pub fn pair(left: (&'a str, &'a Row), right: (&'a str, &'a Row)) -> RowScope<'a> {
        RowScope {
            rows: [Some(left), Some(right)],
        }
    }
}

impl Input for RowScope<'_> {
    fn column(&self, param: &str, column: &str) -> Option<&Value> {
        self.rows
            .iter()
            .flatten()
            .find(|(name, _)| *name == param)
            .and_then(|(_, row)| row.get(column))
    }
}

impl Condition {
    /// Evaluates the condition as a predicate.
    ///
    /// Comparisons involving null are false, as in SQL.
    pub fn eval_bool(&self, input: &impl Input) -> Result<bool> {
        match self.eval(input)? {
            Value::Bool(value) => Ok(value),
            Value::Null => Ok(false),
            value => Err(Error::type_conversion(value, "Bool")),
        }
    }

    pub fn eval(&self, input: &impl Input) -> Result<Value> {
        match self {
            Self::Binary(binary) => eval_binary(binary, input),
            Self::Call(call) => eval_call(call, input),
            Self::Constant(value) => Ok(value.clone()),
            Self::Member(member) => read(input, &member.param, &member.path),
            Self::Parameter(parameter) => read(input, &parameter.param, &parameter.key),
        }
    }
}

fn read(input: &impl Input, param: &str, column: &str) -> Result<Value> {
    input.column(param, column).cloned().ok_or_else(|| {
        Error::invalid_result(format!("no value for `{param}.{column}` in row"))
    })
}

fn eval_binary(binary: &CondBinary, input: &impl Input) -> Result<Value> {
    match binary.op {
        BinaryOp::And => {
            Ok((binary.lhs.eval_bool(input)? && binary.rhs.eval_bool(input)?).into())
        }
        BinaryOp::Or => Ok((binary.lhs.eval_bool(input)? || binary.rhs.eval_bool(input)?).into()),
        BinaryOp::In => {
            let item = binary.lhs.eval(input)?;
            let list = binary.rhs.eval(input)?;
            contains(&list, &item).map(Value::from)
        }
        op => {
            let lhs = binary.lhs.eval(input)?;
            let rhs = binary.rhs.eval(input)?;

            if lhs.is_null() || rhs.is_null() {
                return Ok(false.into());
            }

            let Some(ordering) = lhs.sql_cmp(&rhs) else {
                return Ok(false.into());
            };

            let result = match op {
                BinaryOp::Eq => ordering == Ordering::Equal,
                BinaryOp::Ne => ordering != Ordering::Equal,
                BinaryOp::Lt => ordering == Ordering::Less,
                BinaryOp::Le => ordering != Ordering::Greater,
                BinaryOp::Gt => ordering == Ordering::Greater,
                BinaryOp::Ge => ordering != Ordering::Less,
                _ => unreachable!("op={op:?}"),
            };

            Ok(result.into())
        }
    }
}

fn eval_call(call: &CondCall, input: &impl Input) -> Result<Value> {
    match (call.kind, &call.args[..]) {
        (CallKind::Contains, [list, item]) => {
            let list = list.eval(input)?;
            let item = item.eval(input)?;
            contains(&list, &item).map(Value::from)
        }
        (CallKind::Convert(ty), [arg]) => arg.eval(input)?.convert(ty),
        (kind, args) => Err(Error::unsupported_expression(format!(
            "`{kind:?}` called with {} arguments",
            args.len()
        ))),
    }
}

fn contains(list: &Value, item: &Value) -> Result<bool> {
    let Some(items) = list.as_list() else {
        return Err(Error::type_conversion(list.clone(), "List"));
    };

    if item.is_null() {
        return Ok(false);
    }

    Ok(items.iter().any(|candidate| candidate.sql_eq(item)))
}
