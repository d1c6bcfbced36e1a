use super::{BinaryOp, Condition, Expr, ParameterSet, Row, RowScope, Scope};
use crate::{
    schema::{ModelRef, Registry, TypeDescriptor},
    Error, Result,
};

/// A resolved join along a has-many navigation member.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationSpec {
    /// Parameter on the owning side
    pub left: String,

    /// Parameter bound to the related type
    pub right: String,

    /// Navigation member on the owning type
    pub member: String,

    pub target: ModelRef,

    /// Column on the related table
    pub foreign_key: String,

    /// Column on the owning table
    pub primary_key: String,

    /// Condition rendered in the ON clause
    pub condition: Condition,

    /// `left.pk = right.fk`, used to pair rows in memory
    pub predicate: Condition,

    /// SQL text of the default equality
    pub fragment: String,
}

impl RelationSpec {
    /// Resolves the key pair joining `left` to `right` along `member`.
    ///
    /// Both parameters must already be registered in `params`. With an
    /// explicit condition, the first equality pairing a left column with a
    /// right column names the keys. Otherwise the relation's declared or
    /// inferred foreign key is used, falling back to the single related
    /// column bound to the owning table.
    pub fn build(
        registry: &Registry,
        params: &ParameterSet,
        left: &str,
        member: &str,
        right: &str,
        explicit: Option<&Expr>,
    ) -> Result<RelationSpec> {
        let left_ty = param(params, left)?;
        let right_ty = param(params, right)?;

        let Some(relation) = left_ty.relation(member) else {
            return Err(Error::unresolvable_relation(left_ty.name(), member));
        };

        if relation.target != right_ty.model {
            return Err(Error::invalid_schema(format!(
                "relation `{}::{member}` targets `{}` but parameter `{right}` is a `{}`",
                left_ty.name(),
                relation.target.name(),
                right_ty.name()
            )));
        }

        let (primary_key, foreign_key, condition) = match explicit {
            Some(expr) => {
                let condition = Scope::join(registry, params, left, right).compile(expr)?;
                let (primary_key, foreign_key) = key_pair(&condition, left, right)?;
                (primary_key, foreign_key, Some(condition))
            }
            None => {
                let foreign_key = match &relation.foreign_key {
                    Some(foreign_key) => foreign_key.clone(),
                    None => scan_bindings(left_ty, right_ty, member)?,
                };
                (relation.primary_key.clone(), foreign_key, None)
            }
        };

        let predicate = Condition::eq(
            Condition::member(left, &primary_key),
            Condition::member(right, &foreign_key),
        );

        tracing::trace!(
            left,
            right,
            member,
            primary_key = %primary_key,
            foreign_key = %foreign_key,
            "crouton.relation"
        );

        Ok(RelationSpec {
            left: left.to_string(),
            right: right.to_string(),
            member: member.to_string(),
            target: relation.target,
            fragment: format!("{left}.{primary_key} = {right}.{foreign_key}"),
            condition: condition.unwrap_or_else(|| predicate.clone()),
            predicate,
            foreign_key,
            primary_key,
        })
    }

    /// True when `right_row` belongs to `left_row` under this relation.
    pub fn matches(&self, left_row: &Row, right_row: &Row) -> Result<bool> {
        self.predicate.eval_bool(&RowScope::pair(
            (&self.left, left_row),
            (&self.right, right_row),
        ))
    }
}

fn param<'a>(params: &'a ParameterSet, name: &str) -> Result<&'a TypeDescriptor> {
    params
        .get(name)
        .map(|descriptor| &**descriptor)
        .ok_or_else(|| Error::ambiguous_condition(format!("unknown parameter `{name}`")))
}

/// Finds the first equality between a left column and a right column among
/// the condition's conjuncts. A whole parameter stands for its primary key.
fn key_pair(condition: &Condition, left: &str, right: &str) -> Result<(String, String)> {
    for conjunct in condition.conjuncts() {
        let Condition::Binary(binary) = conjunct else {
            continue;
        };

        if binary.op != BinaryOp::Eq {
            continue;
        }

        if let (Some((l, primary_key)), Some((r, foreign_key))) =
            (binary.lhs.column(), binary.rhs.column())
        {
            if l == left && r == right {
                return Ok((primary_key.to_string(), foreign_key.to_string()));
            }
        }
    }

    Err(Error::ambiguous_condition(format!(
        "join condition `{condition:?}` has no equality between `{left}` and `{right}`"
    )))
}

fn scan_bindings(left: &TypeDescriptor, right: &TypeDescriptor, member: &str) -> Result<String> {
    let candidates: Vec<_> = right
        .columns_bound_to(&left.table)
        .map(|column| column.name.clone())
        .collect();

    match &candidates[..] {
        [foreign_key] => Ok(foreign_key.clone()),
        [] => Err(Error::missing_foreign_key(left.name(), member)),
        _ => Err(Error::ambiguous_foreign_key(
            left.name(),
            member,
            &candidates
                .iter()
                .map(|column| format!("{}.{column}", right.table))
                .collect::<Vec<_>>(),
        )),
    }
}
