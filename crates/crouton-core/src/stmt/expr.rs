use super::{BinaryOp, Value};
use crate::schema::ModelRef;

/// A predicate as written by the caller, before compilation.
///
/// Built by the typed query DSL. Member references are still expressed as
/// member paths over the model; the compiler resolves them into columns of
/// a statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Binary expression
    BinaryOp(ExprBinaryOp),

    /// Set membership: `expr IN list`
    InList(ExprInList),

    /// Null test
    IsNull(Box<Expr>),

    /// Member path rooted at a statement parameter
    Member(ExprMember),

    /// Logical negation
    Not(Box<Expr>),

    /// Constant value
    Value(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprBinaryOp {
    pub lhs: Box<Expr>,
    pub op: BinaryOp,
    pub rhs: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprInList {
    pub expr: Box<Expr>,
    pub list: Box<Expr>,
}

/// A chain of member accesses starting at a parameter, e.g. `c.player.id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprMember {
    /// Parameter the chain starts at
    pub param: ParamRef,

    /// Model of that parameter
    pub model: ModelRef,

    /// Member names. Empty when the expression is the parameter itself.
    pub path: Vec<String>,
}

/// How a member expression names its parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamRef {
    /// Whichever parameter of the member's model is in scope
    Implicit,

    /// The parameter registered under this name
    Named(String),
}

impl Expr {
    pub fn binary_op(lhs: impl Into<Self>, op: BinaryOp, rhs: impl Into<Self>) -> Self {
        ExprBinaryOp {
            lhs: Box::new(lhs.into()),
            op,
            rhs: Box::new(rhs.into()),
        }
        .into()
    }

    pub fn eq(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(lhs, BinaryOp::Eq, rhs)
    }

    pub fn ne(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(lhs, BinaryOp::Ne, rhs)
    }

    pub fn lt(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(lhs, BinaryOp::Lt, rhs)
    }

    pub fn le(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(lhs, BinaryOp::Le, rhs)
    }

    pub fn gt(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(lhs, BinaryOp::Gt, rhs)
    }

    pub fn ge(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(lhs, BinaryOp::Ge, rhs)
    }

    pub fn and(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(lhs, BinaryOp::And, rhs)
    }

    pub fn or(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(lhs, BinaryOp::Or, rhs)
    }

    pub fn in_list(expr: impl Into<Self>, list: impl Into<Self>) -> Self {
        ExprInList {
            expr: Box::new(expr.into()),
            list: Box::new(list.into()),
        }
        .into()
    }

    pub fn is_null(expr: impl Into<Self>) -> Self {
        Self::IsNull(Box::new(expr.into()))
    }

    pub fn not(expr: impl Into<Self>) -> Self {
        Self::Not(Box::new(expr.into()))
    }

    pub fn member(param: ParamRef, model: ModelRef, path: Vec<String>) -> Self {
        ExprMember { param, model, path }.into()
    }
}

impl ExprMember {
    /// Rebinds the member to a named parameter.
    pub fn of(mut self, param: impl Into<String>) -> Self {
        self.param = ParamRef::Named(param.into());
        self
    }
}

impl From<ExprBinaryOp> for Expr {
    fn from(value: ExprBinaryOp) -> Self {
        Self::BinaryOp(value)
    }
}

impl From<ExprInList> for Expr {
    fn from(value: ExprInList) -> Self {
        Self::InList(value)
    }
}

impl From<ExprMember> for Expr {
    fn from(value: ExprMember) -> Self {
        Self::Member(value)
    }
}

impl<T: Into<Value>> From<T> for Expr {
    fn from(value: T) -> Self {
        Self::Value(value.into())
    }
}
