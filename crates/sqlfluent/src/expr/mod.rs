//! Typed selector and predicate expressions.
//!
//! Fluent command methods accept closures over an entity's field selectors:
//!
//! ```ignore
//! db.select::<Person>()?
//!     .column(|p| p.name)?
//!     .where_(|p| p.age.gt(18))?;
//! ```
//!
//! Each closure produces a small expression tree ([`Expr`]) wrapped in a
//! [`Lambda`]. The [`analyze`] functions walk that tree to extract member
//! paths, comparison operators and literal values.

pub mod analyze;
mod field;

pub use analyze::{evaluate, member_path, predicate, sort_path, sql_operator, Predicate};
pub use field::{Comparand, Field, TypedExpr};

use crate::value::Value;
use std::fmt;
use std::marker::PhantomData;

/// Binary operators that can appear in an expression tree.
///
/// Only the comparisons translate to SQL; the rest exist so that unsupported
/// shapes can be represented and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Add,
    Subtract,
    And,
    Or,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A property access chain rooted at an entity, e.g. `Address.City`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberPath {
    /// Type that declares the last segment.
    pub declaring_type: &'static str,
    pub segments: Vec<&'static str>,
}

impl MemberPath {
    pub fn new(declaring_type: &'static str, name: &'static str) -> Self {
        Self {
            declaring_type,
            segments: vec![name],
        }
    }

    /// Dotted property chain, e.g. `Address.City`.
    pub fn path(&self) -> String {
        self.segments.join(".")
    }

    /// `[DeclaringType].[Dotted.Path]`
    pub fn qualified(&self) -> String {
        format!("[{}].[{}]", self.declaring_type, self.path())
    }

    /// Append `inner` below this path; the declaring type becomes `inner`'s.
    pub fn join(mut self, inner: MemberPath) -> Self {
        self.segments.extend(inner.segments);
        self.declaring_type = inner.declaring_type;
        self
    }
}

/// Expression tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Member(MemberPath),
    Constant(Value),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Not(Box<Expr>),
    /// Conversion wrapper, as produced when a selector body is boxed into
    /// the lambda's return type.
    Convert(Box<Expr>),
}

impl Expr {
    pub fn constant(value: impl crate::value::ToValue) -> Self {
        Expr::Constant(value.to_value())
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(inner: Expr) -> Self {
        Expr::Not(Box::new(inner))
    }

    pub fn convert(inner: Expr) -> Self {
        Expr::Convert(Box::new(inner))
    }

    /// Node kind name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Member(_) => "MemberExpression",
            Expr::Constant(_) => "ConstantExpression",
            Expr::Binary { .. } => "BinaryExpression",
            Expr::Not(_) | Expr::Convert(_) => "UnaryExpression",
        }
    }
}

/// A selector or predicate body for entity `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda<T> {
    body: Expr,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Lambda<T> {
    /// Use `body` exactly as given, without the conversion wrapper.
    pub fn from_body(body: Expr) -> Self {
        Self {
            body,
            _entity: PhantomData,
        }
    }

    pub fn body(&self) -> &Expr {
        &self.body
    }
}

/// Anything a fluent command method accepts as a selector or predicate.
///
/// Typed fields and comparisons are wrapped in [`Expr::Convert`] on the way
/// in; a [`Lambda`] passes through untouched.
pub trait IntoLambda<T> {
    fn into_lambda(self) -> Lambda<T>;
}

impl<T> IntoLambda<T> for Lambda<T> {
    fn into_lambda(self) -> Lambda<T> {
        self
    }
}

impl<T, V> IntoLambda<T> for Field<T, V> {
    fn into_lambda(self) -> Lambda<T> {
        Lambda::from_body(Expr::convert(Expr::Member(self.into_path())))
    }
}

impl<T> IntoLambda<T> for TypedExpr<T> {
    fn into_lambda(self) -> Lambda<T> {
        Lambda::from_body(Expr::convert(self.into_expr()))
    }
}

/// Anything a WHERE clause accepts: a comparison, a (negated) boolean field,
/// or a prebuilt [`Lambda`].
///
/// A bare non-boolean field is not a predicate:
///
/// ```compile_fail
/// use sqlfluent::prelude::*;
///
/// #[derive(Debug, Clone, Default, Entity)]
/// struct Person {
///     name: String,
/// }
///
/// fn build<D: Driver>(db: &D) -> OrmResult<String> {
///     Ok(db.select::<Person>()?.star().where_(|p| p.name)?.to_sql())
/// }
/// ```
pub trait IntoPredicate<T>: IntoLambda<T> {}

impl<T> IntoPredicate<T> for Lambda<T> {}

impl<T> IntoPredicate<T> for TypedExpr<T> {}

impl<T> IntoPredicate<T> for Field<T, bool> {}
