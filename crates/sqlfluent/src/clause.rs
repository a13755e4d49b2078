//! WHERE clauses and ORDER BY entries.

use crate::error::OrmResult;
use crate::expr::{self, IntoLambda};
use crate::value::Value;
use std::fmt;

/// Comparison operator of a WHERE clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlOperator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Is,
    IsNot,
}

impl SqlOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            SqlOperator::Eq => "=",
            SqlOperator::Ne => "!=",
            SqlOperator::Lt => "<",
            SqlOperator::Le => "<=",
            SqlOperator::Gt => ">",
            SqlOperator::Ge => ">=",
            SqlOperator::Is => "IS",
            SqlOperator::IsNot => "IS NOT",
        }
    }
}

impl fmt::Display for SqlOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One WHERE condition: `left operator right`.
#[derive(Debug, Clone, PartialEq)]
pub struct PredicateClause {
    /// Qualified column, e.g. `[Person].[Name]`.
    pub left: String,
    pub operator: SqlOperator,
    /// Inline literal form of the compared value.
    pub right: String,
    /// Assigned when the clause is attached to a command (`@w1`, `@w2`, ...).
    pub parameter_name: String,
    pub value: Value,
    /// Whether `value` is sent as a bound parameter instead of `right`.
    pub has_bound_value: bool,
}

impl PredicateClause {
    /// Build a clause from a predicate lambda.
    ///
    /// Comparisons against NULL are rewritten here: `=` becomes `IS` and
    /// `!=` becomes `IS NOT`.
    pub fn build<T>(predicate: impl IntoLambda<T>) -> OrmResult<Self> {
        let pred = expr::predicate(&predicate.into_lambda())?;
        let right = pred.value.to_sql_literal();

        let operator = match pred.operator {
            SqlOperator::Eq if pred.value.is_null() => SqlOperator::Is,
            SqlOperator::Ne if pred.value.is_null() => SqlOperator::IsNot,
            other => other,
        };

        Ok(Self {
            left: pred.left.qualified(),
            operator,
            right,
            parameter_name: String::new(),
            value: pred.value,
            has_bound_value: false,
        })
    }

    /// Attach this clause to a command as its `index`-th (1-based) clause.
    pub(crate) fn attach(mut self, index: usize, bind: bool) -> Self {
        self.parameter_name = format!("@w{index}");
        self.has_bound_value = bind && !self.value.is_null();
        self
    }

    /// Render as `left op right`, or `left op @wN` for a bound value.
    pub fn render(&self) -> String {
        if self.has_bound_value {
            format!("{} {} {}", self.left, self.operator, self.parameter_name)
        } else {
            format!("{} {} {}", self.left, self.operator, self.right)
        }
    }
}

impl fmt::Display for PredicateClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// One ORDER BY column; always ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
}

impl SortSpec {
    pub fn build<T>(selector: impl IntoLambda<T>) -> OrmResult<Self> {
        let path = expr::sort_path(&selector.into_lambda())?;
        Ok(Self {
            column: path.qualified(),
        })
    }
}
