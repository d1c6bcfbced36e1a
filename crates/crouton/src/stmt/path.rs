use super::{Expr, IntoExpr};

use crouton_core::{
    schema::ModelRef,
    stmt::{self, ParamRef},
};
use std::{fmt, marker::PhantomData};

/// A member path evaluating to `T`, rooted at a statement parameter.
pub struct Path<T: ?Sized> {
    param: ParamRef,
    model: ModelRef,
    steps: Vec<String>,
    _p: PhantomData<T>,
}

impl<T: ?Sized> Path<T> {
    pub(crate) fn new(model: ModelRef, steps: Vec<String>) -> Self {
        Self {
            param: ParamRef::Implicit,
            model,
            steps,
            _p: PhantomData,
        }
    }

    /// Roots the path at the parameter registered under `param`.
    pub fn of(mut self, param: impl Into<String>) -> Self {
        self.param = ParamRef::Named(param.into());
        self
    }

    pub fn eq(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::eq(self.into_stmt(), rhs.into_expr().untyped))
    }

    pub fn ne(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::ne(self.into_stmt(), rhs.into_expr().untyped))
    }

    pub fn gt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::gt(self.into_stmt(), rhs.into_expr().untyped))
    }

    pub fn ge(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::ge(self.into_stmt(), rhs.into_expr().untyped))
    }

    pub fn lt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::lt(self.into_stmt(), rhs.into_expr().untyped))
    }

    pub fn le(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::le(self.into_stmt(), rhs.into_expr().untyped))
    }

    pub fn in_list(self, rhs: impl IntoExpr<[T]>) -> Expr<bool>
    where
        T: Sized,
    {
        Expr::from_untyped(stmt::Expr::in_list(
            self.into_stmt(),
            rhs.into_expr().untyped,
        ))
    }

    fn into_stmt(self) -> stmt::Expr {
        stmt::Expr::member(self.param, self.model, self.steps)
    }
}

impl<T: ?Sized> Clone for Path<T> {
    fn clone(&self) -> Self {
        Self {
            param: self.param.clone(),
            model: self.model,
            steps: self.steps.clone(),
            _p: PhantomData,
        }
    }
}

impl<T: ?Sized> IntoExpr<T> for Path<T> {
    fn into_expr(self) -> Expr<T> {
        Expr::from_untyped(self.into_stmt())
    }
}

impl<T: ?Sized> fmt::Debug for Path<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = match &self.param {
            ParamRef::Implicit => self.model.name(),
            ParamRef::Named(name) => name,
        };

        write!(f, "{root}")?;
        for step in &self.steps {
            write!(f, ".{step}")?;
        }
        Ok(())
    }
}
