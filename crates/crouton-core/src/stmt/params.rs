use crate::{schema::TypeDescriptor, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// Base name for parameters registered without one.
pub const DEFAULT_PARAM: &str = "x";

/// The named parameters of a statement, in registration order.
///
/// Each parameter is bound to the descriptor of its type. At most one is
/// marked default: the statement's root entity.
#[derive(Debug, Clone, Default)]
pub struct ParameterSet {
    params: IndexMap<String, Arc<TypeDescriptor>>,
    default: Option<usize>,
}

impl ParameterSet {
    pub fn new() -> ParameterSet {
        ParameterSet::default()
    }

    /// Registers a parameter and returns the name it was given.
    ///
    /// A name already in use is suffixed with an increasing integer
    /// (`x`, `x1`, `x2`, ...). Marking a second parameter default fails.
    pub fn register(
        &mut self,
        name: Option<&str>,
        descriptor: Arc<TypeDescriptor>,
        is_default: bool,
    ) -> Result<String> {
        if is_default {
            if let Some((existing, _)) = self.default_param() {
                crate::bail!(
                    "parameter `{existing}` is already the default; cannot register `{}` as default",
                    name.unwrap_or(DEFAULT_PARAM)
                );
            }
        }

        let base = name.unwrap_or(DEFAULT_PARAM);
        let mut name = base.to_string();
        let mut suffix = 1;

        while self.params.contains_key(&name) {
            name = format!("{base}{suffix}");
            suffix += 1;
        }

        let (index, _) = self.params.insert_full(name.clone(), descriptor);

        if is_default {
            self.default = Some(index);
        }

        Ok(name)
    }

    /// The default parameter and its type.
    pub fn default_param(&self) -> Option<(&str, &Arc<TypeDescriptor>)> {
        let (name, descriptor) = self.params.get_index(self.default?)?;
        Some((name, descriptor))
    }

    pub fn default_name(&self) -> Option<&str> {
        self.default_param().map(|(name, _)| name)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<TypeDescriptor>> {
        self.params.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<TypeDescriptor>)> + '_ {
        self.params
            .iter()
            .map(|(name, descriptor)| (name.as_str(), descriptor))
    }
}
