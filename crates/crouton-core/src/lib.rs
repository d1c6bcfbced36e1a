pub mod driver;
pub use driver::Executor;

mod error;
pub use error::{Error, IntoError};

pub mod schema;
pub use schema::Registry;

pub mod stmt;

pub mod track;
pub use track::{ChangeSet, Tracked};

/// A Result type alias that uses Crouton's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
