use super::{CommandContext, CommandState, SqlCommand};
use crate::dialect::SqlDialect;
use crate::reflect::{Entity, Reflect};
use std::marker::PhantomData;

/// `SELECT ... FROM [T] [WHERE ...] [ORDER BY ...]`
#[derive(Debug)]
pub struct SqlSelect<'a, T> {
    ctx: CommandContext<'a>,
    state: CommandState,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T: Entity> SqlSelect<'a, T> {
    pub fn new(ctx: CommandContext<'a>) -> Self {
        let state = ctx.new_state::<T>();
        Self {
            ctx,
            state,
            _entity: PhantomData,
        }
    }

    /// Request the dialect's no-lock table hint (`WITH(NOLOCK)` on SQL Server).
    ///
    /// Dialects without such a hint ignore it.
    pub fn with_no_lock(mut self) -> Self {
        self.state.no_lock = true;
        self
    }
}

impl<'a, T: Entity> SqlCommand<T> for SqlSelect<'a, T> {
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn context(&self) -> &CommandContext<'_> {
        &self.ctx
    }

    fn target(&self) -> Option<&dyn Reflect> {
        None
    }

    fn to_sql(&self) -> String {
        self.ctx.dialect.select(&self.state)
    }
}
