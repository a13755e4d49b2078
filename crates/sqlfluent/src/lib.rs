//! # sqlfluent
//!
//! Typed, fluent SQL command building for ADO-style drivers.
//!
//! ## Features
//!
//! - **Typed selectors**: columns, predicates and sort specs come from field
//!   handles generated by `#[derive(Entity)]`, not from strings
//! - **Fluent commands**: INSERT, SELECT, UPDATE, DELETE and bulk INSERT
//!   accumulate state in call order and render on demand
//! - **Pluggable dialects**: SQLite and SQL Server renderers, chosen
//!   explicitly or from the driver's reported kind
//! - **Row mapping**: rows map back onto entities by column name; missing
//!   columns keep their defaults and extra columns are ignored
//! - **Driver agnostic**: anything implementing [`Driver`] works, a
//!   connection and a transaction alike
//!
//! ## Example
//!
//! ```ignore
//! use sqlfluent::prelude::*;
//!
//! #[derive(Debug, Default, Entity)]
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! let bob = Person { name: "Bob".into(), age: 50 };
//!
//! // INSERT INTO [Person]
//! // ([Name], [Age])
//! // VALUES (@Name, @Age);SELECT last_insert_rowid();
//! let id: i64 = conn
//!     .insert(&bob)?
//!     .column(|p| p.name)?
//!     .column(|p| p.age)?
//!     .execute_scalar()?;
//!
//! // SELECT [Name], [Age] FROM [Person] WHERE [Person].[Name] = 'Bob'
//! let people: Vec<Person> = conn
//!     .select::<Person>()?
//!     .column(|p| p.name)?
//!     .column(|p| p.age)?
//!     .where_(|p| p.name.eq("Bob"))?
//!     .query()?;
//! ```
//!
//! WHERE values and bulk insert values are embedded as literals and string
//! literals are **not** escaped. Use [`SqlConfig::with_bound_predicates`] to
//! send WHERE values as parameters instead.

pub mod clause;
pub mod column;
pub mod command;
pub mod config;
pub mod dialect;
pub mod driver;
pub mod error;
pub mod expr;
pub mod mapper;
pub mod params;
pub mod prelude;
pub mod reflect;
pub mod session;
pub mod trace;
pub mod value;

pub use clause::{PredicateClause, SortSpec, SqlOperator};
pub use column::ColumnBinding;
pub use command::{
    CommandContext, CommandState, SqlBulkInsert, SqlCommand, SqlDelete, SqlInsert, SqlSelect,
    SqlUpdate,
};
pub use config::SqlConfig;
pub use dialect::{Dialect, GenericDialect, MsSqlDialect, SqlDialect, SqliteDialect};
pub use driver::{Driver, DriverCommand, DriverError, Row};
pub use error::{DataOperationError, OrmError, OrmResult};
pub use expr::{Comparand, Expr, Field, IntoLambda, IntoPredicate, Lambda, MemberPath, TypedExpr};
pub use mapper::{FromRow, map_entity};
pub use params::Parameters;
pub use reflect::{Entity, Property, Reflect, resolve_path};
pub use session::{DriverExt, SqlSession};
pub use trace::SqlTracer;
pub use value::{FromValue, ToValue, Value, ValueError};

#[cfg(feature = "derive")]
pub use sqlfluent_derive::{Entity, SqlEnum};
