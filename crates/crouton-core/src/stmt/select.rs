use super::{Condition, Expr, ParameterSet, RelationSpec, Scope};
use crate::{
    schema::{ModelRef, Registry, TypeDescriptor},
    Error, Result,
};

use std::sync::Arc;

/// A query over a root type and the relations joined to it.
///
/// Builder methods return a new statement and leave `self` untouched; the
/// parts the new statement does not change are shared with the source, so a
/// partially built query can be branched freely.
#[derive(Debug, Clone)]
pub struct Select {
    params: Arc<ParameterSet>,

    /// WHERE clause
    filter: Option<Arc<Condition>>,

    /// Joins, in the order they were added
    relations: Arc<Vec<Arc<RelationSpec>>>,

    /// Projected columns. `None` selects every column of every parameter.
    columns: Option<Arc<[ColumnRef]>>,
}

/// A column of a statement parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub param: String,
    pub column: String,
}

/// A request to load a has-many relation alongside the root.
#[derive(Debug, Clone)]
pub struct Join {
    /// Navigation member on the owning type
    pub member: String,

    /// Owning parameter. Defaults to the statement's root.
    pub left: Option<String>,

    /// Name for the related parameter
    pub right: Option<String>,

    /// Explicit join condition
    pub condition: Option<Expr>,
}

impl Select {
    /// Selects every `model`, bound to the default parameter name.
    pub fn new(registry: &Registry, model: ModelRef) -> Result<Select> {
        Select::named(registry, model, None)
    }

    pub fn named(registry: &Registry, model: ModelRef, name: Option<&str>) -> Result<Select> {
        let mut params = ParameterSet::new();
        params.register(name, registry.describe(model)?, true)?;

        Ok(Select {
            params: Arc::new(params),
            filter: None,
            relations: Arc::new(vec![]),
            columns: None,
        })
    }

    /// Adds a predicate to the WHERE clause, AND-ed with any existing one.
    pub fn filter(&self, registry: &Registry, expr: &Expr) -> Result<Select> {
        let condition = Scope::filter(registry, &self.params)?.compile(expr)?;

        let condition = match &self.filter {
            Some(existing) => Condition::and((**existing).clone(), condition),
            None => condition,
        };

        Ok(Select {
            filter: Some(Arc::new(condition)),
            ..self.clone()
        })
    }

    /// Joins a has-many relation, registering a parameter for its target.
    pub fn join(&self, registry: &Registry, join: &Join) -> Result<Select> {
        let left = match &join.left {
            Some(left) => left.as_str(),
            None => self.root_name(),
        };

        let Some(left_ty) = self.params.get(left) else {
            return Err(Error::ambiguous_condition(format!(
                "unknown parameter `{left}`"
            )));
        };

        let Some(relation) = left_ty.relation(&join.member) else {
            return Err(Error::unresolvable_relation(left_ty.name(), &join.member));
        };

        let mut params = (*self.params).clone();
        let right = params.register(
            join.right.as_deref(),
            registry.describe(relation.target)?,
            false,
        )?;

        let spec = RelationSpec::build(
            registry,
            &params,
            left,
            &join.member,
            &right,
            join.condition.as_ref(),
        )?;

        let mut relations = (*self.relations).clone();
        relations.push(Arc::new(spec));

        Ok(Select {
            params: Arc::new(params),
            relations: Arc::new(relations),
            ..self.clone()
        })
    }

    /// Restricts the columns selected. Primary keys and the key columns of
    /// every join are always selected.
    pub fn columns<'a>(
        &self,
        columns: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Select> {
        let mut projected = vec![];

        for (param, column) in columns {
            let Some(descriptor) = self.params.get(param) else {
                return Err(Error::ambiguous_condition(format!(
                    "unknown parameter `{param}`"
                )));
            };

            let Some(found) = descriptor.column(column) else {
                return Err(Error::invalid_schema(format!(
                    "`{}` has no column `{column}`",
                    descriptor.name()
                )));
            };

            let column = ColumnRef {
                param: param.to_string(),
                column: found.name.clone(),
            };

            if !projected.contains(&column) {
                projected.push(column);
            }
        }

        Ok(Select {
            columns: Some(projected.into()),
            ..self.clone()
        })
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn root(&self) -> &Arc<TypeDescriptor> {
        // Every constructor registers a default parameter.
        self.params
            .default_param()
            .map(|(_, descriptor)| descriptor)
            .expect("select without a root parameter")
    }

    pub fn root_name(&self) -> &str {
        self.params
            .default_name()
            .expect("select without a root parameter")
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.filter.as_deref()
    }

    pub fn relations(&self) -> impl Iterator<Item = &RelationSpec> + '_ {
        self.relations.iter().map(|relation| &**relation)
    }

    /// Relations whose owning side is `param`.
    pub fn relations_from<'a>(
        &'a self,
        param: &'a str,
    ) -> impl Iterator<Item = &'a RelationSpec> + 'a {
        self.relations().filter(move |relation| relation.left == param)
    }

    pub fn projection(&self) -> Option<&[ColumnRef]> {
        self.columns.as_deref()
    }

    /// True if the statement reads `column` of `param`.
    ///
    /// Without a projection every column is read. With one, the projected
    /// columns are read along with each parameter's primary key and the
    /// columns joined rows are paired on.
    pub fn selects(&self, param: &str, column: &str) -> bool {
        let Some(projection) = self.projection() else {
            return true;
        };

        let is_primary_key = self
            .params
            .get(param)
            .is_some_and(|descriptor| descriptor.primary_key == column);

        let is_join_key = self.relations().any(|relation| {
            (relation.left == param && relation.primary_key == column)
                || (relation.right == param && relation.foreign_key == column)
        });

        is_primary_key
            || is_join_key
            || projection
                .iter()
                .any(|selected| selected.param == param && selected.column == column)
    }

    /// True if `other` shares its parameter set with `self`.
    pub fn shares_params(&self, other: &Select) -> bool {
        Arc::ptr_eq(&self.params, &other.params)
    }
}

impl Join {
    pub fn new(member: impl Into<String>) -> Join {
        Join {
            member: member.into(),
            left: None,
            right: None,
            condition: None,
        }
    }

    /// Joins from the named parameter instead of the root.
    pub fn from(mut self, left: impl Into<String>) -> Self {
        self.left = Some(left.into());
        self
    }

    /// Names the related parameter.
    pub fn alias(mut self, right: impl Into<String>) -> Self {
        self.right = Some(right.into());
        self
    }

    pub fn on(mut self, condition: impl Into<Expr>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}
