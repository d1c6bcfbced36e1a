use super::{Expr, IntoExpr, Join, Path};

use crouton_core::schema::{ModelRef, Persistent};
use std::marker::PhantomData;

/// A member of model `M` holding a `T`.
///
/// Models expose their members as associated constants:
///
/// ```ignore
/// impl Player {
///     pub const NAME: Field<Player, String> = Field::new("name");
/// }
///
/// let adults = Player::AGE.ge(18);
/// ```
pub struct Field<M, T> {
    name: &'static str,
    _p: PhantomData<(fn() -> M, fn() -> T)>,
}

/// A has-many navigation member of model `M` leading to `T`.
pub struct Relation<M, T> {
    name: &'static str,
    _p: PhantomData<(fn() -> M, fn() -> T)>,
}

impl<M, T> Field<M, T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _p: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<M: Persistent, T> Field<M, T> {
    pub fn path(self) -> Path<T> {
        Path::new(ModelRef::of::<M>(), vec![self.name.to_string()])
    }

    /// The member read from the parameter registered under `param`.
    pub fn of(self, param: impl Into<String>) -> Path<T> {
        self.path().of(param)
    }

    /// Navigates through this reference to `key` on the referenced model.
    ///
    /// Only the referenced model's primary key can be reached this way.
    pub fn then<N, U>(self, key: Field<N, U>) -> Path<U> {
        Path::new(
            ModelRef::of::<M>(),
            vec![self.name.to_string(), key.name.to_string()],
        )
    }

    pub fn eq(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.path().eq(rhs)
    }

    pub fn ne(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.path().ne(rhs)
    }

    pub fn gt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.path().gt(rhs)
    }

    pub fn ge(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.path().ge(rhs)
    }

    pub fn lt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.path().lt(rhs)
    }

    pub fn le(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.path().le(rhs)
    }

    pub fn in_list(self, rhs: impl IntoExpr<[T]>) -> Expr<bool> {
        self.path().in_list(rhs)
    }
}

impl<M, T> Clone for Field<M, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, T> Copy for Field<M, T> {}

impl<M: Persistent, T> IntoExpr<T> for Field<M, T> {
    fn into_expr(self) -> Expr<T> {
        self.path().into_expr()
    }
}

impl<M, T> Relation<M, T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _p: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Joins from the parameter registered under `param` instead of the
    /// query's root.
    pub fn from(self, param: impl Into<String>) -> Join {
        Join::new(self.name).from(param)
    }

    /// Names the parameter the related rows are bound to.
    pub fn alias(self, param: impl Into<String>) -> Join {
        Join::new(self.name).alias(param)
    }

    /// Joins on an explicit condition instead of the relation's keys.
    pub fn on(self, condition: Expr<bool>) -> Join {
        Join::new(self.name).on(condition.untyped)
    }
}

impl<M, T> Clone for Relation<M, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, T> Copy for Relation<M, T> {}

impl<M, T> From<Relation<M, T>> for Join {
    fn from(value: Relation<M, T>) -> Self {
        Join::new(value.name)
    }
}
