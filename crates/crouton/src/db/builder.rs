use super::Db;
use crate::{Model, Result};

use crouton_core::{
    driver::Executor,
    schema::{ModelRef, Registry},
};
use crouton_sql::{Flavor, ParamStyle, Serializer};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    /// Models resolved when the repository is built
    models: Vec<ModelRef>,

    flavor: Flavor,

    param_style: ParamStyle,

    /// Prepended to every table name
    table_name_prefix: Option<String>,

    /// Registry to share. A fresh one is created when unset.
    registry: Option<Arc<Registry>>,
}

impl Builder {
    pub fn register<T: Model>(&mut self) -> &mut Self {
        let model = ModelRef::of::<T>();
        if !self.models.contains(&model) {
            self.models.push(model);
        }
        self
    }

    /// Set the SQL dialect statements are formatted in
    pub fn flavor(&mut self, flavor: Flavor) -> &mut Self {
        self.flavor = flavor;
        self
    }

    pub fn param_style(&mut self, style: ParamStyle) -> &mut Self {
        self.param_style = style;
        self
    }

    /// Set the table name prefix for all tables
    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    pub fn registry(&mut self, registry: Arc<Registry>) -> &mut Self {
        self.registry = Some(registry);
        self
    }

    /// Resolves every registered model, then opens the executor.
    ///
    /// Schema errors surface here rather than on first use.
    pub fn build(&mut self, executor: impl Executor) -> Result<Db> {
        let registry = self.registry.clone().unwrap_or_default();

        for model in &self.models {
            registry.register(*model);
        }

        for model in &self.models {
            registry.describe(*model)?;
        }

        let mut serializer = Serializer::new(self.flavor).with_param_style(self.param_style);
        if let Some(prefix) = &self.table_name_prefix {
            serializer = serializer.with_table_prefix(prefix.as_str());
        }

        let mut executor: Box<dyn Executor> = Box::new(executor);
        executor.open()?;

        tracing::debug!(
            flavor = ?self.flavor,
            models = self.models.len(),
            "crouton.open"
        );

        Ok(Db {
            registry,
            serializer,
            executor,
        })
    }
}
