pub mod db;
pub use db::Db;

mod hydrate;
pub use hydrate::{Hydrator, Record};

mod model;
pub use model::Model;

pub mod relation;
pub use relation::HasMany;

pub mod stmt;
pub use stmt::{Expr, Field, IntoExpr, Path, Query, Relation};

pub use crouton_core::{
    driver::Executor,
    row,
    schema::{FieldDecl, ModelDecl, Persistent, Registry},
    stmt::{Row, Type, Value},
    track::{ChangeSet, Tracked},
    Error, Result,
};
pub use crouton_sql::{Flavor, ParamStyle};
