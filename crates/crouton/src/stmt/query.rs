use super::{Expr, Join};
use crate::{Db, Model, Result};

use crouton_core::{
    schema::{ModelRef, Registry},
    stmt::{self, Select},
};
use std::{fmt, marker::PhantomData};

/// A query for instances of `M`.
///
/// Filters and includes are recorded as written and compiled against the
/// repository's registry when the query runs. Filters may name joined
/// parameters, so includes are applied first.
pub struct Query<M> {
    /// Name of the root parameter
    name: Option<String>,

    filters: Vec<stmt::Expr>,

    includes: Vec<Join>,

    _p: PhantomData<fn() -> M>,
}

impl<M: Model> Query<M> {
    pub fn new() -> Self {
        Self {
            name: None,
            filters: vec![],
            includes: vec![],
            _p: PhantomData,
        }
    }

    /// Binds the root to `name` instead of the default parameter name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a predicate, AND-ed with the existing ones.
    pub fn filter(mut self, expr: Expr<bool>) -> Self {
        self.filters.push(expr.untyped);
        self
    }

    /// Loads a has-many relation alongside the results.
    pub fn include(mut self, join: impl Into<Join>) -> Self {
        self.includes.push(join.into());
        self
    }

    /// Compiles the query into a statement.
    pub fn build(&self, registry: &Registry) -> Result<Select> {
        let mut select = Select::named(registry, ModelRef::of::<M>(), self.name.as_deref())?;

        for join in &self.includes {
            select = select.join(registry, join)?;
        }

        for filter in &self.filters {
            select = select.filter(registry, filter)?;
        }

        Ok(select)
    }

    pub fn all(&self, db: &mut Db) -> Result<Vec<M>> {
        db.all(self)
    }

    pub fn first(&self, db: &mut Db) -> Result<Option<M>> {
        Ok(db.all(self)?.into_iter().next())
    }
}

impl<M: Model> Default for Query<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for Query<M> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            filters: self.filters.clone(),
            includes: self.includes.clone(),
            _p: PhantomData,
        }
    }
}

impl<M> fmt::Debug for Query<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("name", &self.name)
            .field("filters", &self.filters)
            .field("includes", &self.includes)
            .finish()
    }
}
