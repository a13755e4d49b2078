use super::{CommandContext, CommandState, SqlCommand};
use crate::dialect::SqlDialect;
use crate::reflect::{Entity, Reflect};
use std::marker::PhantomData;

/// `DELETE [T] [WHERE ...]`
///
/// Without a WHERE clause every row of the table is deleted.
#[derive(Debug)]
pub struct SqlDelete<'a, T> {
    ctx: CommandContext<'a>,
    state: CommandState,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T: Entity> SqlDelete<'a, T> {
    pub fn new(ctx: CommandContext<'a>) -> Self {
        let state = ctx.new_state::<T>();
        Self {
            ctx,
            state,
            _entity: PhantomData,
        }
    }
}

impl<'a, T: Entity> SqlCommand<T> for SqlDelete<'a, T> {
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
        self.ctx.dialect.delete(&self.state)
    }
}
