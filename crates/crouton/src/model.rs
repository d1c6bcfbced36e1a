use crate::{Record, Result};

use crouton_core::{
    schema::Persistent,
    stmt::{Row, Value},
    track::Tracked,
};

/// A persistent type the repository can load and store.
///
/// The declaration comes from [`Persistent`]; change tracking from
/// [`Tracked`], usually by delegating to an embedded
/// [`ChangeSet`](crate::ChangeSet).
pub trait Model: Persistent + Tracked + Sized {
    /// Load an instance of the model, populating fields from the record.
    fn load(record: &Record) -> Result<Self>;

    /// Column values of the instance, keyed by column name.
    ///
    /// A primary key left out or set to null asks the database to generate
    /// one on insert.
    fn to_row(&self) -> Row;

    /// Stores the primary key the database generated for a new instance.
    fn assign_key(&mut self, key: Value) -> Result<()>;
}
