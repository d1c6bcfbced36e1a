use super::{resolve::Resolver, ModelRef, Persistent, TypeDescriptor};
use crate::Result;

use indexmap::IndexMap;
use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, OnceLock, PoisonError, RwLock},
};

/// Process-wide cache of type descriptors.
///
/// Descriptors are built lazily on first lookup. Building happens without
/// holding any lock; the finished descriptor is published under a short
/// write lock and the first completed build wins. Concurrent first lookups
/// may build twice but always observe the same cached `Arc` afterwards.
#[derive(Debug, Default)]
pub struct Registry {
    descriptors: RwLock<HashMap<TypeId, Arc<TypeDescriptor>>>,

    /// Types registered up front. Their declarations are consulted when
    /// looking for incoming foreign keys.
    registered: RwLock<IndexMap<TypeId, ModelRef>>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// The shared registry used unless a caller passes its own.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    /// Makes a type's declaration known without building its descriptor.
    pub fn register(&self, model: ModelRef) {
        self.registered
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(model.id())
            .or_insert(model);
    }

    pub fn describe_model<T: Persistent>(&self) -> Result<Arc<TypeDescriptor>> {
        self.describe(ModelRef::of::<T>())
    }

    /// Returns the descriptor for `model`, building it on first use.
    pub fn describe(&self, model: ModelRef) -> Result<Arc<TypeDescriptor>> {
        if let Some(descriptor) = self.cached(model.id()) {
            return Ok(descriptor);
        }

        let registered: Vec<_> = self
            .registered
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .copied()
            .collect();

        let descriptor = Arc::new(Resolver::new(model, &registered).resolve()?);

        tracing::trace!(
            model = model.name(),
            table = %descriptor.table,
            columns = descriptor.columns.len(),
            relations = descriptor.relations.len(),
            "crouton.describe"
        );

        let mut descriptors = self
            .descriptors
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(descriptors.entry(model.id()).or_insert(descriptor).clone())
    }

    /// Looks a descriptor up by type identity alone.
    ///
    /// Returns `None` for types that were never registered or described,
    /// since a bare `TypeId` carries no declaration to build from. A
    /// registered type whose declaration does not resolve is an error.
    pub fn describe_by_id(&self, id: TypeId) -> Result<Option<Arc<TypeDescriptor>>> {
        if let Some(descriptor) = self.cached(id) {
            return Ok(Some(descriptor));
        }

        let model = self
            .registered
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .copied();

        model.map(|model| self.describe(model)).transpose()
    }

    fn cached(&self, id: TypeId) -> Option<Arc<TypeDescriptor>> {
        self.descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }
}
