use super::{CommandContext, CommandState, SqlCommand};
use crate::dialect::SqlDialect;
use crate::reflect::{Entity, Reflect};

/// `UPDATE [T] SET [Col] = @Col, ... [WHERE ...]`, values read from `target`.
#[derive(Debug)]
pub struct SqlUpdate<'a, T> {
    ctx: CommandContext<'a>,
    state: CommandState,
    target: &'a T,
}

impl<'a, T: Entity> SqlUpdate<'a, T> {
    pub fn new(ctx: CommandContext<'a>, target: &'a T) -> Self {
        let state = ctx.new_state::<T>();
        Self { ctx, state, target }
    }
}

impl<'a, T: Entity> SqlCommand<T> for SqlUpdate<'a, T> {
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
        Some(self.target)
    }

    fn to_sql(&self) -> String {
        self.ctx.dialect.update(&self.state)
    }
}
