use super::Expr;

use crouton_core::stmt::Value;

pub trait IntoExpr<T: ?Sized> {
    fn into_expr(self) -> Expr<T>;
}

impl<T: ?Sized> IntoExpr<T> for Expr<T> {
    fn into_expr(self) -> Expr<T> {
        self
    }
}

macro_rules! impl_into_expr_for_value {
    ( $( $ty:ty ),* ) => {
        $(
            impl IntoExpr<$ty> for $ty {
                fn into_expr(self) -> Expr<$ty> {
                    Expr::from_value(self)
                }
            }

            impl IntoExpr<$ty> for &$ty {
                fn into_expr(self) -> Expr<$ty> {
                    Expr::from_value(self.clone())
                }
            }

            impl IntoExpr<Option<$ty>> for Option<$ty> {
                fn into_expr(self) -> Expr<Option<$ty>> {
                    Expr::from_value(self)
                }
            }
        )*
    };
}

impl_into_expr_for_value!(bool, f64, i16, i32, i64, String);

impl IntoExpr<String> for &str {
    fn into_expr(self) -> Expr<String> {
        Expr::from_value(self)
    }
}

impl<T> IntoExpr<[T]> for Vec<T>
where
    T: Into<Value>,
{
    fn into_expr(self) -> Expr<[T]> {
        Expr::from_value(Value::List(self.into_iter().map(Into::into).collect()))
    }
}

impl<T, const N: usize> IntoExpr<[T]> for [T; N]
where
    T: Into<Value>,
{
    fn into_expr(self) -> Expr<[T]> {
        Expr::from_value(Value::List(self.into_iter().map(Into::into).collect()))
    }
}

impl<T> IntoExpr<[T]> for &[T]
where
    T: Clone + Into<Value>,
{
    fn into_expr(self) -> Expr<[T]> {
        Expr::from_value(Value::List(self.iter().cloned().map(Into::into).collect()))
    }
}
