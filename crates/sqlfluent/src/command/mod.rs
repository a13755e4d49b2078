//! Fluent command accumulators.
//!
//! A command is opened against a driver (through [`SqlSession`](crate::SqlSession)
//! or [`DriverExt`](crate::DriverExt)), accumulates columns, clauses and sort
//! specs through the [`SqlCommand`] methods, and is rendered by its dialect
//! when executed or when [`SqlCommand::to_sql`] is called.
//!
//! Methods that take a selector return `OrmResult<Self>`: an unsupported
//! selector shape fails right there and the command is dropped.

mod bulk;
mod delete;
mod insert;
mod select;
mod update;

pub use bulk::SqlBulkInsert;
pub use delete::SqlDelete;
pub use insert::SqlInsert;
pub use select::SqlSelect;
pub use update::SqlUpdate;

use crate::clause::{PredicateClause, SortSpec};
use crate::column::ColumnBinding;
use crate::config::SqlConfig;
use crate::dialect::Dialect;
use crate::driver::Driver;
use crate::error::{OrmError, OrmResult};
use crate::expr::{IntoLambda, IntoPredicate};
use crate::mapper::{self, FromRow};
use crate::params::Parameters;
use crate::reflect::{Entity, Reflect};
use crate::value::FromValue;

/// Accumulated state of one command, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandState {
    /// Table as rendered, e.g. `[Person]`.
    pub table: String,
    pub columns: Vec<ColumnBinding>,
    pub clauses: Vec<PredicateClause>,
    pub orders: Vec<SortSpec>,
    /// Ask for the dialect's no-lock table hint (select only).
    pub no_lock: bool,
    /// Render clause values as `@wN` parameters.
    pub bind_predicates: bool,
}

impl CommandState {
    /// State for entity `type_name`, table defaulting to `[type_name]`.
    pub fn new(type_name: &str) -> Self {
        Self {
            table: format!("[{type_name}]"),
            ..Self::default()
        }
    }

    /// Append a clause, numbering its parameter after the existing ones.
    pub fn push_clause(&mut self, clause: PredicateClause) {
        let index = self.clauses.len() + 1;
        self.clauses.push(clause.attach(index, self.bind_predicates));
    }

    /// Values of clauses rendered as bound parameters.
    pub fn predicate_parameters(&self) -> Parameters {
        self.clauses
            .iter()
            .filter(|c| c.has_bound_value)
            .map(|c| (c.parameter_name.clone(), c.value.clone()))
            .collect()
    }

    /// Column parameters followed by bound clause values.
    ///
    /// A bound clause value replaces a column parameter of the same name;
    /// [`checked_parameters`](Self::checked_parameters) rejects that instead.
    pub fn parameters(&self) -> Parameters {
        let mut params = Parameters::from_columns(&self.columns);
        for (name, value) in &self.predicate_parameters() {
            params.insert(name.clone(), value.clone());
        }
        params
    }

    /// [`parameters`](Self::parameters), failing when a column parameter
    /// collides with a bound `@wN` name.
    pub fn checked_parameters(&self) -> OrmResult<Parameters> {
        let mut params = Parameters::from_columns(&self.columns);
        for (name, value) in &self.predicate_parameters() {
            if params.contains(name) {
                return Err(OrmError::DuplicateParameter(name.clone()));
            }
            params.insert(name.clone(), value.clone());
        }
        Ok(params)
    }
}

/// Driver, dialect and settings a command executes with.
///
/// The dialect is resolved once, when the command is opened.
#[derive(Clone)]
pub struct CommandContext<'a> {
    driver: &'a dyn Driver,
    dialect: Dialect,
    config: SqlConfig,
}

impl<'a> CommandContext<'a> {
    /// Resolve the dialect from `config` or, when unset, the driver kind.
    pub fn new(driver: &'a dyn Driver, config: SqlConfig) -> OrmResult<Self> {
        let dialect = match config.dialect {
            Some(dialect) => dialect,
            None => Dialect::from_driver_kind(driver.kind())?,
        };
        Ok(Self {
            driver,
            dialect,
            config,
        })
    }

    pub fn driver(&self) -> &'a dyn Driver {
        self.driver
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn config(&self) -> &SqlConfig {
        &self.config
    }

    fn new_state<T: Entity>(&self) -> CommandState {
        CommandState {
            bind_predicates: self.config.bind_predicates,
            ..CommandState::new(T::TYPE_NAME)
        }
    }
}

impl std::fmt::Debug for CommandContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandContext")
            .field("driver", &self.driver.kind())
            .field("dialect", &self.dialect)
            .field("config", &self.config)
            .finish()
    }
}

/// The fluent builder surface shared by every statement kind.
///
/// Selector closures receive `T::Fields`, the typed field handles of the
/// entity, and return a field, a comparison or a negated boolean field.
pub trait SqlCommand<T: Entity>: Sized {
    fn state(&self) -> &CommandState;

    fn state_mut(&mut self) -> &mut CommandState;

    fn context(&self) -> &CommandContext<'_>;

    /// Object column values are read from, if any.
    fn target(&self) -> Option<&dyn Reflect>;

    /// Render the command with its dialect.
    fn to_sql(&self) -> String;

    /// Use `table` verbatim as the table name.
    fn from(mut self, table: impl Into<String>) -> Self {
        self.state_mut().table = table.into();
        self
    }

    /// Use `[U]` as the table name.
    fn from_type<U: Entity>(self) -> Self {
        self.from(format!("[{}]", U::TYPE_NAME))
    }

    /// Add a column given by its raw name, parameter `@name`.
    fn column_named(mut self, name: &str) -> Self {
        let column = ColumnBinding::named(self.target(), name);
        self.state_mut().columns.push(column);
        self
    }

    /// Add a column for a property selector, e.g. `.column(|p| p.name)?`.
    fn column<X, F>(mut self, select: F) -> OrmResult<Self>
    where
        X: IntoLambda<T>,
        F: FnOnce(T::Fields) -> X,
    {
        let column = ColumnBinding::build::<T>(self.target(), select(T::fields()))?;
        self.state_mut().columns.push(column);
        Ok(self)
    }

    /// Add a column for a property selector under another column name.
    ///
    /// `name` is used verbatim as the column and prefixed for the parameter.
    /// With bound predicates, `w1`, `w2`, ... are taken by WHERE values and
    /// executing a command that reuses one fails.
    fn column_as<X, F>(mut self, select: F, name: &str) -> OrmResult<Self>
    where
        X: IntoLambda<T>,
        F: FnOnce(T::Fields) -> X,
    {
        let column = ColumnBinding::build::<T>(self.target(), select(T::fields()))?.renamed(name);
        self.state_mut().columns.push(column);
        Ok(self)
    }

    /// Add `MAX([Column])`.
    fn max<X, F>(mut self, select: F) -> OrmResult<Self>
    where
        X: IntoLambda<T>,
        F: FnOnce(T::Fields) -> X,
    {
        let column = ColumnBinding::build::<T>(self.target(), select(T::fields()))?.max();
        self.state_mut().columns.push(column);
        Ok(self)
    }

    /// Add `COUNT(1)`.
    fn count(mut self) -> Self {
        self.state_mut().columns.push(ColumnBinding::pseudo("COUNT(1)"));
        self
    }

    /// Add `*`.
    fn star(mut self) -> Self {
        self.state_mut().columns.push(ColumnBinding::pseudo("*"));
        self
    }

    /// Add a WHERE clause.
    fn where_<X, F>(self, predicate: F) -> OrmResult<Self>
    where
        X: IntoPredicate<T>,
        F: FnOnce(T::Fields) -> X,
    {
        self.where_if(predicate, true)
    }

    /// Add a WHERE clause only when `only_if` holds.
    ///
    /// With `only_if == false` the predicate is not even analyzed.
    fn where_if<X, F>(mut self, predicate: F, only_if: bool) -> OrmResult<Self>
    where
        X: IntoPredicate<T>,
        F: FnOnce(T::Fields) -> X,
    {
        if only_if {
            let clause = PredicateClause::build::<T>(predicate(T::fields()))?;
            self.state_mut().push_clause(clause);
        }
        Ok(self)
    }

    /// Add another WHERE clause, AND-joined with the previous ones.
    fn and_where<X, F>(self, predicate: F) -> OrmResult<Self>
    where
        X: IntoPredicate<T>,
        F: FnOnce(T::Fields) -> X,
    {
        self.where_if(predicate, true)
    }

    /// Add an ascending ORDER BY column.
    fn order_by<X, F>(mut self, select: F) -> OrmResult<Self>
    where
        X: IntoLambda<T>,
        F: FnOnce(T::Fields) -> X,
    {
        let order = SortSpec::build::<T>(select(T::fields()))?;
        self.state_mut().orders.push(order);
        Ok(self)
    }

    /// Ordered `@param → value` mapping of every parameterized column,
    /// followed by bound clause values when predicate binding is on.
    fn to_parameters(&self) -> Parameters {
        self.state().parameters()
    }

    /// Execute and map every row to `T`.
    fn query(&self) -> OrmResult<Vec<T>>
    where
        T: FromRow,
    {
        self.query_as::<T>()
    }

    /// Execute and map every row to `U`.
    ///
    /// Only bound clause values are sent; column parameters are not.
    fn query_as<U: FromRow>(&self) -> OrmResult<Vec<U>> {
        let ctx = self.context();
        mapper::query(
            ctx.driver,
            &ctx.config,
            &self.to_sql(),
            &self.state().predicate_parameters(),
        )
    }

    /// Execute with [`to_parameters`](Self::to_parameters) bound and return
    /// the affected row count.
    ///
    /// Fails before reaching the driver when a column parameter collides
    /// with a bound WHERE value.
    fn execute_non_query(&self) -> OrmResult<u64> {
        self.state().checked_parameters()?;
        let ctx = self.context();
        mapper::execute_non_query(ctx.driver, &ctx.config, &self.to_sql(), &self.to_parameters())
    }

    /// Execute with [`to_parameters`](Self::to_parameters) bound and convert
    /// the scalar result; NULL yields `U::default()`.
    fn execute_scalar<U: FromValue + Default>(&self) -> OrmResult<U> {
        self.state().checked_parameters()?;
        let ctx = self.context();
        mapper::execute_scalar(ctx.driver, &ctx.config, &self.to_sql(), &self.to_parameters())
    }
}
