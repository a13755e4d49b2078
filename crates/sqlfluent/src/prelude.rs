//! Convenient imports for typical `sqlfluent` usage.
//!
//! ```ignore
//! use sqlfluent::prelude::*;
//! ```

pub use crate::{
    Dialect, Driver, DriverExt, Entity, FromRow, OrmError, OrmResult, Parameters, SqlCommand,
    SqlConfig, SqlSession, Value,
};

#[cfg(feature = "derive")]
pub use crate::SqlEnum;
