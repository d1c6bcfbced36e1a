use crouton_core::stmt::{self, Value};

use std::{fmt, marker::PhantomData};

/// An expression evaluating to `T`.
pub struct Expr<T: ?Sized> {
    pub(crate) untyped: stmt::Expr,
    _p: PhantomData<T>,
}

impl<T: ?Sized> Expr<T> {
    pub(crate) fn from_untyped(untyped: impl Into<stmt::Expr>) -> Self {
        Self {
            untyped: untyped.into(),
            _p: PhantomData,
        }
    }

    pub(crate) fn from_value(value: impl Into<Value>) -> Self {
        Self::from_untyped(stmt::Expr::Value(value.into()))
    }

    pub fn into_untyped(self) -> stmt::Expr {
        self.untyped
    }
}

impl Expr<bool> {
    pub fn and(self, rhs: impl Into<Expr<bool>>) -> Self {
        Self::from_untyped(stmt::Expr::and(self.untyped, rhs.into().untyped))
    }

    pub fn or(self, rhs: impl Into<Expr<bool>>) -> Self {
        Self::from_untyped(stmt::Expr::or(self.untyped, rhs.into().untyped))
    }
}

impl<T: ?Sized> Clone for Expr<T> {
    fn clone(&self) -> Self {
        Self::from_untyped(self.untyped.clone())
    }
}

impl<T: ?Sized> From<Expr<T>> for stmt::Expr {
    fn from(value: Expr<T>) -> Self {
        value.untyped
    }
}

impl<T: ?Sized> fmt::Debug for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.untyped.fmt(f)
    }
}
