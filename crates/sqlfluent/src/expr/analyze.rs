//! Expression analysis: member paths, predicates and operator mapping.
//!
//! All functions here are pure. An unsupported shape is a programmer error
//! and is reported as [`OrmError::ExpressionShape`] naming the offending node.

use super::{BinaryOp, Expr, Lambda, MemberPath};
use crate::clause::SqlOperator;
use crate::error::{OrmError, OrmResult};
use crate::value::Value;

/// A single comparison extracted from a predicate lambda.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub left: MemberPath,
    pub operator: SqlOperator,
    pub value: Value,
}

/// Member path of a column selector. Conversion wrappers are unwrapped.
pub fn member_path<T>(lambda: &Lambda<T>) -> OrmResult<MemberPath> {
    match unwrap_convert(lambda.body()) {
        Expr::Member(path) => Ok(path.clone()),
        other => Err(OrmError::expression_shape(other.kind(), "column")),
    }
}

/// Member path of a sort selector.
///
/// The body must be a conversion wrapper around a member access.
pub fn sort_path<T>(lambda: &Lambda<T>) -> OrmResult<MemberPath> {
    let Expr::Convert(inner) = lambda.body() else {
        return Err(OrmError::expression_shape(lambda.body().kind(), "order"));
    };
    match unwrap_convert(inner) {
        Expr::Member(path) => Ok(path.clone()),
        other => Err(OrmError::expression_shape(other.kind(), "order")),
    }
}

/// Translate a predicate lambda into a single comparison.
///
/// Supported shapes, all under an outer conversion wrapper:
/// - `member <op> constant`
/// - `member` (boolean shorthand, `= 1`)
/// - `!member` (boolean shorthand, `= 0`)
pub fn predicate<T>(lambda: &Lambda<T>) -> OrmResult<Predicate> {
    match lambda.body() {
        Expr::Convert(inner) => wrapped_predicate(inner),
        other => Err(OrmError::expression_shape(other.kind(), "clause")),
    }
}

fn wrapped_predicate(expr: &Expr) -> OrmResult<Predicate> {
    match expr {
        Expr::Binary { op, left, right } => {
            let left = match unwrap_convert(left) {
                Expr::Member(path) => path.clone(),
                other => return Err(OrmError::expression_shape(other.kind(), "clause")),
            };
            Ok(Predicate {
                left,
                operator: sql_operator(*op)?,
                value: evaluate(right)?,
            })
        }
        Expr::Member(path) => Ok(boolean_shorthand(path, true)),
        Expr::Not(inner) => match inner.as_ref() {
            Expr::Member(path) => Ok(boolean_shorthand(path, false)),
            other => Err(OrmError::expression_shape(other.kind(), "clause")),
        },
        Expr::Convert(inner) => wrapped_predicate(inner),
        Expr::Constant(_) => Err(OrmError::expression_shape(expr.kind(), "clause")),
    }
}

fn boolean_shorthand(path: &MemberPath, positive: bool) -> Predicate {
    Predicate {
        left: path.clone(),
        operator: SqlOperator::Eq,
        value: Value::Bool(positive),
    }
}

/// Map a comparison operator to its SQL token.
pub fn sql_operator(op: BinaryOp) -> OrmResult<SqlOperator> {
    match op {
        BinaryOp::Equal => Ok(SqlOperator::Eq),
        BinaryOp::NotEqual => Ok(SqlOperator::Ne),
        BinaryOp::LessThan => Ok(SqlOperator::Lt),
        BinaryOp::LessThanOrEqual => Ok(SqlOperator::Le),
        BinaryOp::GreaterThan => Ok(SqlOperator::Gt),
        BinaryOp::GreaterThanOrEqual => Ok(SqlOperator::Ge),
        other => Err(OrmError::expression_shape(other.to_string(), "operator")),
    }
}

/// Evaluate the right-hand side of a comparison to a value.
///
/// Constants evaluate to themselves; numeric `+`/`-` between constants is
/// folded. Member accesses have no instance to read from and are rejected.
pub fn evaluate(expr: &Expr) -> OrmResult<Value> {
    match expr {
        Expr::Constant(value) => Ok(value.clone()),
        Expr::Convert(inner) => evaluate(inner),
        Expr::Binary {
            op: op @ (BinaryOp::Add | BinaryOp::Subtract),
            left,
            right,
        } => fold_arithmetic(*op, evaluate(left)?, evaluate(right)?)
            .ok_or_else(|| OrmError::expression_shape(expr.kind(), "value")),
        other => Err(OrmError::expression_shape(other.kind(), "value")),
    }
}

fn fold_arithmetic(op: BinaryOp, left: Value, right: Value) -> Option<Value> {
    let subtract = op == BinaryOp::Subtract;
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => {
            let folded = if subtract { a.checked_sub(b) } else { a.checked_add(b) };
            folded.map(Value::Int)
        }
        (Value::Int(a), Value::Float(b)) => Some(Value::Float(float_op(a as f64, b, subtract))),
        (Value::Float(a), Value::Int(b)) => Some(Value::Float(float_op(a, b as f64, subtract))),
        (Value::Float(a), Value::Float(b)) => Some(Value::Float(float_op(a, b, subtract))),
        _ => None,
    }
}

fn float_op(a: f64, b: f64, subtract: bool) -> f64 {
    if subtract { a - b } else { a + b }
}

fn unwrap_convert(expr: &Expr) -> &Expr {
    match expr {
        Expr::Convert(inner) => unwrap_convert(inner),
        other => other,
    }
}
