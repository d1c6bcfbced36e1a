use super::{Condition, Expr, ParameterSet, Scope, Value};
use crate::{
    schema::{ModelRef, Registry, TypeDescriptor},
    Result,
};

use std::sync::Arc;

/// Deletes the rows of one table matching a condition.
#[derive(Debug, Clone)]
pub struct Delete {
    params: Arc<ParameterSet>,
    filter: Option<Arc<Condition>>,
}

impl Delete {
    /// Deletes every `model`.
    pub fn new(registry: &Registry, model: ModelRef) -> Result<Delete> {
        let mut params = ParameterSet::new();
        params.register(None, registry.describe(model)?, true)?;

        Ok(Delete {
            params: Arc::new(params),
            filter: None,
        })
    }

    /// Deletes the `model` with primary key `key`.
    pub fn by_key(registry: &Registry, model: ModelRef, key: impl Into<Value>) -> Result<Delete> {
        let delete = Delete::new(registry, model)?;
        let key: Value = key.into();
        let key_column = delete.target().primary_key_column();

        let condition = Condition::eq(
            Condition::member(delete.param(), &key_column.name),
            key.convert(key_column.ty)?,
        );

        Ok(Delete {
            filter: Some(Arc::new(condition)),
            ..delete
        })
    }

    /// Adds a predicate, AND-ed with any existing one.
    pub fn filter(&self, registry: &Registry, expr: &Expr) -> Result<Delete> {
        let condition = Scope::filter(registry, &self.params)?.compile(expr)?;

        let condition = match &self.filter {
            Some(existing) => Condition::and((**existing).clone(), condition),
            None => condition,
        };

        Ok(Delete {
            params: self.params.clone(),
            filter: Some(Arc::new(condition)),
        })
    }

    pub fn target(&self) -> &Arc<TypeDescriptor> {
        self.params
            .default_param()
            .map(|(_, descriptor)| descriptor)
            .expect("delete without a target parameter")
    }

    pub fn param(&self) -> &str {
        self.params
            .default_name()
            .expect("delete without a target parameter")
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.filter.as_deref()
    }
}
