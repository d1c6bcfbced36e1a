mod compile;
pub use compile::{compile, Scope};

mod condition;
pub use condition::{CallKind, CondBinary, CondCall, CondMember, CondParameter, Condition};

mod delete;
pub use delete::Delete;

mod eval;
pub use eval::{Input, RowScope};

mod expr;
pub use expr::{Expr, ExprBinaryOp, ExprInList, ExprMember, ParamRef};

mod insert;
pub use insert::Insert;

mod op_binary;
pub use op_binary::BinaryOp;

mod params;
pub use params::{ParameterSet, DEFAULT_PARAM};

mod relation;
pub use relation::RelationSpec;

mod row;
pub use row::Row;

mod select;
pub use select::{ColumnRef, Join, Select};

mod statement;
pub use statement::Statement;

mod ty;
pub use ty::Type;

mod update;
pub use update::{Update, UpdateRow};

mod value;
pub use value::{FromValue, Key, Value};
