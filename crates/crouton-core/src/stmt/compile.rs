use super::{
    BinaryOp, CondParameter, Condition, Expr, ExprMember, ParamRef, ParameterSet, Type, Value,
};
use crate::{schema::Registry, Error, Result};

/// Names the parameters a predicate is compiled against.
///
/// A WHERE clause is compiled with only a left parameter, the statement's
/// default. A join condition also names the related parameter on the right.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    registry: &'a Registry,
    params: &'a ParameterSet,
    left: &'a str,
    right: Option<&'a str>,
}

/// A compiled comparison operand.
#[derive(Debug)]
struct Operand {
    condition: Condition,

    /// Column type, for operands that read a column
    ty: Option<Type>,
}

#[derive(Debug, PartialEq)]
enum Side {
    Left,
    Right,
    Other,
    Constant,
}

/// Compiles `expr` within `scope`.
pub fn compile(expr: &Expr, scope: &Scope<'_>) -> Result<Condition> {
    scope.compile(expr)
}

impl<'a> Scope<'a> {
    /// Scope for a WHERE clause over the set's default parameter.
    pub fn filter(registry: &'a Registry, params: &'a ParameterSet) -> Result<Scope<'a>> {
        let Some(left) = params.default_name() else {
            crate::bail!("cannot compile a filter without a default parameter");
        };

        Ok(Scope {
            registry,
            params,
            left,
            right: None,
        })
    }

    /// Scope for the condition joining `left` to `right`.
    pub fn join(
        registry: &'a Registry,
        params: &'a ParameterSet,
        left: &'a str,
        right: &'a str,
    ) -> Scope<'a> {
        Scope {
            registry,
            params,
            left,
            right: Some(right),
        }
    }

    pub fn compile(&self, expr: &Expr) -> Result<Condition> {
        match expr {
            Expr::BinaryOp(binary) if binary.op.is_logical() => Ok(Condition::binary(
                binary.op,
                self.compile(&binary.lhs)?,
                self.compile(&binary.rhs)?,
            )),
            Expr::BinaryOp(binary) if binary.op == BinaryOp::In => {
                self.compile_in_list(&binary.lhs, &binary.rhs)
            }
            Expr::BinaryOp(binary) => self.compile_comparison(binary.op, &binary.lhs, &binary.rhs),
            Expr::InList(in_list) => self.compile_in_list(&in_list.expr, &in_list.list),
            Expr::Not(_) => Err(Error::unsupported_expression("negation is not supported")),
            Expr::IsNull(_) => Err(Error::unsupported_expression(
                "null tests are not supported",
            )),
            Expr::Member(_) | Expr::Value(_) => Err(Error::unsupported_expression(format!(
                "`{expr:?}` is not a predicate"
            ))),
        }
    }

    fn compile_comparison(&self, op: BinaryOp, lhs: &Expr, rhs: &Expr) -> Result<Condition> {
        let mut op = op;
        let mut lhs = self.compile_operand(lhs)?;
        let mut rhs = self.compile_operand(rhs)?;

        if self.orient(op, &lhs, &rhs)? {
            std::mem::swap(&mut lhs, &mut rhs);
            op = op.mirror();
        }

        let (lhs, rhs) = widen(lhs, rhs)?;
        Ok(Condition::binary(op, lhs, rhs))
    }

    /// Set membership: the member must be on the left, a list of scalars on
    /// the right.
    fn compile_in_list(&self, expr: &Expr, list: &Expr) -> Result<Condition> {
        let Expr::Member(member) = expr else {
            return Err(Error::unsupported_expression(
                "set membership requires a member on the left",
            ));
        };

        let Expr::Value(Value::List(items)) = list else {
            return Err(Error::unsupported_expression(
                "set membership requires a constant list",
            ));
        };

        if items.iter().any(Value::is_list) {
            return Err(Error::unsupported_expression(
                "nested lists are not supported",
            ));
        }

        let member = self.compile_member(member)?;
        let integers = items.iter().all(|item| item.to_i64().is_some());

        match member.ty {
            Some(ty) if ty.is_integer() && integers => {
                let items = items
                    .iter()
                    .cloned()
                    .map(|item| item.convert(Type::I64))
                    .collect::<Result<Vec<_>>>()?;
                let item = if ty.is_narrow_integer() {
                    Condition::convert(Type::I64, member.condition)
                } else {
                    member.condition
                };
                Ok(Condition::contains(Value::List(items), item))
            }
            _ => Ok(Condition::contains(
                Value::List(items.clone()),
                member.condition,
            )),
        }
    }

    fn compile_operand(&self, expr: &Expr) -> Result<Operand> {
        match expr {
            Expr::Member(member) => self.compile_member(member),
            Expr::Value(value) if value.is_list() => Err(Error::unsupported_expression(
                "a list can only be used for set membership",
            )),
            Expr::Value(value) => Ok(Operand {
                condition: Condition::Constant(value.clone()),
                ty: None,
            }),
            _ => Err(Error::unsupported_expression(format!(
                "`{expr:?}` cannot be used as a comparison operand"
            ))),
        }
    }

    /// Folds a member path into a column of its parameter.
    fn compile_member(&self, member: &ExprMember) -> Result<Operand> {
        let param = self.resolve_param(member)?;
        let Some(descriptor) = self.params.get(param) else {
            return Err(Error::ambiguous_condition(format!(
                "unknown parameter `{param}`"
            )));
        };

        if descriptor.model != member.model {
            return Err(Error::unsupported_expression(format!(
                "member of `{}` bound to parameter `{param}` of type `{}`",
                member.model.name(),
                descriptor.name()
            )));
        }

        let column = |name: &str| Operand {
            condition: Condition::member(param, name),
            ty: descriptor.column(name).map(|column| column.ty),
        };

        match &member.path[..] {
            [] => {
                let key = descriptor.primary_key_column();
                Ok(Operand {
                    condition: CondParameter {
                        param: param.to_string(),
                        key: key.name.clone(),
                    }
                    .into(),
                    ty: Some(key.ty),
                })
            }
            [field] => {
                if let Some(found) = descriptor.column_for_member(field) {
                    Ok(column(&found.name))
                } else if let Some(reference) = descriptor.reference(field) {
                    Ok(column(&reference.column))
                } else if descriptor.relation(field).is_some() {
                    Err(Error::unsupported_expression(format!(
                        "has-many member `{}::{field}` cannot be compared",
                        descriptor.name()
                    )))
                } else {
                    Err(Error::unsupported_expression(format!(
                        "`{}` has no member `{field}`",
                        descriptor.name()
                    )))
                }
            }
            [navigation, key] => {
                let Some(reference) = descriptor.reference(navigation) else {
                    return Err(navigation_error(member));
                };

                let target = self.registry.describe(reference.target)?;
                if target.primary_key_column().member.as_deref() != Some(key.as_str()) {
                    return Err(navigation_error(member));
                }

                Ok(column(&reference.column))
            }
            _ => Err(navigation_error(member)),
        }
    }

    fn resolve_param(&self, member: &ExprMember) -> Result<&'a str> {
        match &member.param {
            ParamRef::Named(name) => self
                .params
                .iter()
                .map(|(param, _)| param)
                .find(|param| *param == name)
                .ok_or_else(|| {
                    Error::ambiguous_condition(format!("unknown parameter `{name}`"))
                }),
            ParamRef::Implicit => self.implicit_param(member),
        }
    }

    /// The left parameter wins, then the right one, then the only other
    /// parameter of the member's type.
    fn implicit_param(&self, member: &ExprMember) -> Result<&'a str> {
        let is_model = |name: &str| {
            self.params
                .get(name)
                .is_some_and(|descriptor| descriptor.model == member.model)
        };

        if is_model(self.left) {
            return Ok(self.left);
        }

        if let Some(right) = self.right.filter(|right| is_model(*right)) {
            return Ok(right);
        }

        let candidates: Vec<&'a str> = self
            .params
            .iter()
            .filter(|(_, descriptor)| descriptor.model == member.model)
            .map(|(name, _)| name)
            .collect();

        match &candidates[..] {
            [name] => Ok(*name),
            [] => Err(Error::ambiguous_condition(format!(
                "no parameter of type `{}` is in scope",
                member.model.name()
            ))),
            _ => Err(Error::ambiguous_condition(format!(
                "more than one parameter of type `{}` is in scope ({}); name one explicitly",
                member.model.name(),
                candidates.join(", ")
            ))),
        }
    }

    /// Returns true when the operands must be swapped to put the member
    /// rooted at the left parameter first. Exactly one side may be rooted
    /// there.
    fn orient(&self, op: BinaryOp, lhs: &Operand, rhs: &Operand) -> Result<bool> {
        let side = |operand: &Operand| match operand.condition.root() {
            Some(root) if root == self.left => Side::Left,
            Some(root) if Some(root) == self.right => Side::Right,
            Some(_) => Side::Other,
            None => Side::Constant,
        };

        let swap = match (self.right, side(lhs), side(rhs)) {
            (_, Side::Constant, Side::Constant) => None,
            (None, Side::Constant, _) => Some(true),
            (None, _, Side::Constant) => Some(false),
            (None, Side::Left, Side::Other) => Some(false),
            (None, Side::Other, Side::Left) => Some(true),
            (None, _, _) => None,
            (Some(_), Side::Left, Side::Right) => Some(false),
            (Some(_), Side::Right, Side::Left) => Some(true),
            (Some(_), Side::Left | Side::Right, Side::Constant) => Some(false),
            (Some(_), Side::Constant, Side::Left | Side::Right) => Some(true),
            (Some(_), _, _) => None,
        };

        swap.ok_or_else(|| {
            Error::ambiguous_condition(format!(
                "cannot tell which side of `{:?} {op} {:?}` is rooted at `{}`",
                lhs.condition, rhs.condition, self.left
            ))
        })
    }
}

/// Wraps narrow integer columns in a conversion to 64 bits and widens the
/// constant they are compared with, so that rows read back with 64-bit
/// integers still compare equal.
fn widen(lhs: Operand, rhs: Operand) -> Result<(Condition, Condition)> {
    let is_int = |operand: &Operand| operand.ty.is_some_and(Type::is_integer);
    let widen = |operand: Operand| {
        if operand.ty.is_some_and(Type::is_narrow_integer) {
            Condition::convert(Type::I64, operand.condition)
        } else {
            operand.condition
        }
    };

    let constant = match &rhs.condition {
        Condition::Constant(value) if value.to_i64().is_some() => Some(value.clone()),
        _ => None,
    };

    if let Some(value) = constant.filter(|_| is_int(&lhs)) {
        return Ok((widen(lhs), Condition::Constant(value.convert(Type::I64)?)));
    }

    if is_int(&lhs) && is_int(&rhs) && lhs.ty != rhs.ty {
        return Ok((widen(lhs), widen(rhs)));
    }

    Ok((lhs.condition, rhs.condition))
}

fn navigation_error(member: &ExprMember) -> Error {
    Error::unsupported_expression(format!(
        "navigation beyond a key is not supported: `{}.{}`",
        member.model.name(),
        member.path.join(".")
    ))
}
