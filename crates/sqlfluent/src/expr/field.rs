use super::{BinaryOp, Expr, MemberPath};
use crate::reflect::Entity;
use crate::value::ToValue;
use std::marker::PhantomData;
use std::ops::Not;

/// Typed handle on property `V` of entity `T`.
///
/// Generated per property by `#[derive(Entity)]`; users reach it through the
/// closure argument of fluent command methods.
pub struct Field<T, V> {
    path: MemberPath,
    _marker: PhantomData<fn() -> (T, V)>,
}

impl<T, V> Clone for Field<T, V> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, V> std::fmt::Debug for Field<T, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Field").field(&self.path.path()).finish()
    }
}

impl<T, V> Field<T, V> {
    pub fn new(declaring_type: &'static str, name: &'static str) -> Self {
        Self {
            path: MemberPath::new(declaring_type, name),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &MemberPath {
        &self.path
    }

    pub(crate) fn into_path(self) -> MemberPath {
        self.path
    }

    fn compare(&self, op: BinaryOp, value: impl Comparand<V>) -> TypedExpr<T> {
        TypedExpr::new(Expr::binary(
            op,
            Expr::Member(self.path.clone()),
            Expr::Constant(value.to_value()),
        ))
    }

    /// `field = value` (`IS NULL` when `value` is `None`)
    pub fn eq(&self, value: impl Comparand<V>) -> TypedExpr<T> {
        self.compare(BinaryOp::Equal, value)
    }

    /// `field != value` (`IS NOT NULL` when `value` is `None`)
    pub fn ne(&self, value: impl Comparand<V>) -> TypedExpr<T> {
        self.compare(BinaryOp::NotEqual, value)
    }

    pub fn lt(&self, value: impl Comparand<V>) -> TypedExpr<T> {
        self.compare(BinaryOp::LessThan, value)
    }

    pub fn le(&self, value: impl Comparand<V>) -> TypedExpr<T> {
        self.compare(BinaryOp::LessThanOrEqual, value)
    }

    pub fn gt(&self, value: impl Comparand<V>) -> TypedExpr<T> {
        self.compare(BinaryOp::GreaterThan, value)
    }

    pub fn ge(&self, value: impl Comparand<V>) -> TypedExpr<T> {
        self.compare(BinaryOp::GreaterThanOrEqual, value)
    }
}

impl<T, V: Entity> Field<T, V> {
    /// Descend into a nested entity: `p.address.then(|a| a.city)`.
    pub fn then<U, F>(self, select: F) -> Field<T, U>
    where
        F: FnOnce(V::Fields) -> Field<V, U>,
    {
        let inner = select(V::fields());
        Field {
            path: self.path.join(inner.path),
            _marker: PhantomData,
        }
    }
}

/// A value a `Field<_, V>` can be compared against.
///
/// Implemented for `V` itself, `&V`, `Option<V>` (`None` compares as NULL),
/// `&Option<V>` and, for text fields, `&str`. Anything else is a type error:
///
/// ```compile_fail
/// use sqlfluent::prelude::*;
///
/// #[derive(Debug, Clone, Default, Entity)]
/// struct Person {
///     age: i32,
/// }
///
/// let _ = Person::fields().age.eq("not a number");
/// ```
pub trait Comparand<V>: ToValue {}

impl<V: ToValue> Comparand<V> for V {}

impl<V: ToValue> Comparand<V> for &V {}

impl<V: ToValue> Comparand<V> for Option<V> {}

impl<V: ToValue> Comparand<V> for &Option<V> {}

impl Comparand<String> for &str {}

/// `!p.active` selects rows where the flag is false.
impl<T> Not for Field<T, bool> {
    type Output = TypedExpr<T>;

    fn not(self) -> TypedExpr<T> {
        TypedExpr::new(Expr::not(Expr::Member(self.path)))
    }
}

/// An expression over entity `T` that is not a bare field.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedExpr<T> {
    expr: Expr,
    _entity: PhantomData<fn() -> T>,
}

impl<T> TypedExpr<T> {
    pub fn new(expr: Expr) -> Self {
        Self {
            expr,
            _entity: PhantomData,
        }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub(crate) fn into_expr(self) -> Expr {
        self.expr
    }

    /// Logical AND of two expressions.
    ///
    /// Predicates are single comparisons; a combined expression is rejected
    /// when used as a WHERE clause. Chain `and_where` calls instead.
    pub fn and(self, other: TypedExpr<T>) -> TypedExpr<T> {
        TypedExpr::new(Expr::binary(BinaryOp::And, self.expr, other.expr))
    }

    /// Logical OR of two expressions. Rejected as a WHERE clause, like [`and`](Self::and).
    pub fn or(self, other: TypedExpr<T>) -> TypedExpr<T> {
        TypedExpr::new(Expr::binary(BinaryOp::Or, self.expr, other.expr))
    }
}
