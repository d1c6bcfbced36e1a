use crate::{Model, Record, Result};

use std::fmt;

/// The loaded side of a has-many relation.
///
/// A relation the query did not include stays unloaded; one it included
/// holds every related instance, possibly none.
pub struct HasMany<T> {
    values: Option<Vec<T>>,
}

impl<T: Model> HasMany<T> {
    pub fn load(records: &[Record]) -> Result<Self> {
        let values = records.iter().map(T::load).collect::<Result<Vec<_>>>()?;
        Ok(Self::loaded(values))
    }
}

impl<T> HasMany<T> {
    pub fn loaded(values: Vec<T>) -> Self {
        Self {
            values: Some(values),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.values.is_some()
    }

    #[track_caller]
    pub fn get(&self) -> &[T] {
        self.values
            .as_ref()
            .expect("association not loaded")
            .as_slice()
    }

    pub fn try_get(&self) -> Option<&[T]> {
        self.values.as_deref()
    }
}

impl<T> Default for HasMany<T> {
    fn default() -> Self {
        Self { values: None }
    }
}

impl<T: Clone> Clone for HasMany<T> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for HasMany<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.values {
            Some(values) => fmt.debug_list().entries(values).finish(),
            None => fmt.write_str("<not loaded>"),
        }
    }
}
