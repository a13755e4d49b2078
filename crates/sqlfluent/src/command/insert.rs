use super::{CommandContext, CommandState, SqlCommand};
use crate::dialect::SqlDialect;
use crate::reflect::{Entity, Reflect};

/// `INSERT INTO [T] (...) VALUES (@...)`, values read from `target`.
///
/// [`execute_scalar`](SqlCommand::execute_scalar) returns the new identity
/// through the dialect's identity retrieval statement.
#[derive(Debug)]
pub struct SqlInsert<'a, T> {
    ctx: CommandContext<'a>,
    state: CommandState,
    target: &'a T,
}

impl<'a, T: Entity> SqlInsert<'a, T> {
    pub fn new(ctx: CommandContext<'a>, target: &'a T) -> Self {
        let state = ctx.new_state::<T>();
        Self { ctx, state, target }
    }
}

impl<'a, T: Entity> SqlCommand<T> for SqlInsert<'a, T> {
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
        self.ctx.dialect.insert(&self.state)
    }
}
