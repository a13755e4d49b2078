//! Entry points for opening commands against a driver.

use crate::command::{CommandContext, SqlBulkInsert, SqlDelete, SqlInsert, SqlSelect, SqlUpdate};
use crate::config::SqlConfig;
use crate::driver::Driver;
use crate::error::OrmResult;
use crate::mapper::{self, FromRow};
use crate::params::Parameters;
use crate::reflect::Entity;
use crate::value::FromValue;

/// A driver (connection or transaction) paired with command settings.
///
/// Every command opened here resolves its dialect once, at open time: from
/// [`SqlConfig::dialect`] when set, otherwise from [`Driver::kind`].
///
/// # Example
///
/// ```ignore
/// use sqlfluent::prelude::*;
///
/// let session = SqlSession::new(&conn);
/// let adults: Vec<Person> = session
///     .select::<Person>()?
///     .star()
///     .where_(|p| p.age.ge(18))?
///     .order_by(|p| p.name)?
///     .query()?;
/// ```
#[derive(Clone)]
pub struct SqlSession<'a> {
    driver: &'a dyn Driver,
    config: SqlConfig,
}

impl<'a> SqlSession<'a> {
    pub fn new(driver: &'a dyn Driver) -> Self {
        Self::with_config(driver, SqlConfig::default())
    }

    pub fn with_config(driver: &'a dyn Driver, config: SqlConfig) -> Self {
        Self { driver, config }
    }

    pub fn config(&self) -> &SqlConfig {
        &self.config
    }

    pub fn driver(&self) -> &'a dyn Driver {
        self.driver
    }

    fn context(&self) -> OrmResult<CommandContext<'a>> {
        CommandContext::new(self.driver, self.config.clone())
    }

    pub fn select<T: Entity>(&self) -> OrmResult<SqlSelect<'a, T>> {
        Ok(SqlSelect::new(self.context()?))
    }

    pub fn insert<T: Entity>(&self, target: &'a T) -> OrmResult<SqlInsert<'a, T>> {
        Ok(SqlInsert::new(self.context()?, target))
    }

    pub fn update<T: Entity>(&self, target: &'a T) -> OrmResult<SqlUpdate<'a, T>> {
        Ok(SqlUpdate::new(self.context()?, target))
    }

    pub fn delete<T: Entity>(&self) -> OrmResult<SqlDelete<'a, T>> {
        Ok(SqlDelete::new(self.context()?))
    }

    pub fn bulk_insert<T: Entity>(&self, items: &'a [T]) -> OrmResult<SqlBulkInsert<'a, T>> {
        Ok(SqlBulkInsert::new(self.context()?, items))
    }

    /// Run hand-written SQL and map every row to `U`.
    pub fn query<U: FromRow>(&self, sql: &str) -> OrmResult<Vec<U>> {
        mapper::query(self.driver, &self.config, sql, &Parameters::new())
    }

    /// Run hand-written SQL with parameters; returns the affected row count.
    pub fn execute_non_query(&self, sql: &str, params: &Parameters) -> OrmResult<u64> {
        mapper::execute_non_query(self.driver, &self.config, sql, params)
    }

    /// Run hand-written SQL with parameters and convert the scalar result.
    pub fn execute_scalar<U: FromValue + Default>(
        &self,
        sql: &str,
        params: &Parameters,
    ) -> OrmResult<U> {
        mapper::execute_scalar(self.driver, &self.config, sql, params)
    }
}

impl std::fmt::Debug for SqlSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlSession")
            .field("driver", &self.driver.kind())
            .field("config", &self.config)
            .finish()
    }
}

/// Command entry points directly on any driver, using default settings.
///
/// Equivalent to `SqlSession::new(driver).<method>(...)`. Raw statements
/// with parameters go through [`session`](DriverExt::session), since
/// [`Driver`] already owns the `execute_*` names.
pub trait DriverExt: Driver + Sized {
    fn session(&self) -> SqlSession<'_> {
        SqlSession::new(self)
    }

    fn select<T: Entity>(&self) -> OrmResult<SqlSelect<'_, T>> {
        self.session().select()
    }

    fn insert<'a, T: Entity>(&'a self, target: &'a T) -> OrmResult<SqlInsert<'a, T>> {
        self.session().insert(target)
    }

    fn update<'a, T: Entity>(&'a self, target: &'a T) -> OrmResult<SqlUpdate<'a, T>> {
        self.session().update(target)
    }

    fn delete<T: Entity>(&self) -> OrmResult<SqlDelete<'_, T>> {
        self.session().delete()
    }

    fn bulk_insert<'a, T: Entity>(&'a self, items: &'a [T]) -> OrmResult<SqlBulkInsert<'a, T>> {
        self.session().bulk_insert(items)
    }

    fn query<U: FromRow>(&self, sql: &str) -> OrmResult<Vec<U>> {
        self.session().query(sql)
    }
}

impl<D: Driver> DriverExt for D {}
