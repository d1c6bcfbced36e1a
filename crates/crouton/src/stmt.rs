mod expr;
pub use expr::Expr;

mod field;
pub use field::{Field, Relation};

mod into_expr;
pub use into_expr::IntoExpr;

mod path;
pub use path::Path;

mod query;
pub use query::Query;

pub use crouton_core::stmt::Join;
