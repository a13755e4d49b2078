use super::{CommandContext, CommandState, SqlCommand};
use crate::dialect::SqlDialect;
use crate::params::Parameters;
use crate::reflect::{Entity, Reflect};

/// A single INSERT carrying one literal tuple per item.
///
/// Columns are chosen with the usual selectors; their values are resolved
/// from each item at render time and embedded as literals, strings
/// unescaped. Nothing is sent as a bound parameter.
#[derive(Debug)]
pub struct SqlBulkInsert<'a, T> {
    ctx: CommandContext<'a>,
    state: CommandState,
    items: &'a [T],
}

impl<'a, T: Entity> SqlBulkInsert<'a, T> {
    pub fn new(ctx: CommandContext<'a>, items: &'a [T]) -> Self {
        let state = ctx.new_state::<T>();
        Self { ctx, state, items }
    }

    pub fn items(&self) -> &'a [T] {
        self.items
    }
}

impl<'a, T: Entity> SqlCommand<T> for SqlBulkInsert<'a, T> {
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
        let rows: Vec<&dyn Reflect> = self.items.iter().map(|item| item as &dyn Reflect).collect();
        self.ctx.dialect.bulk_insert(&self.state, &rows)
    }

    /// Values are embedded in the SQL text, so the mapping is empty.
    fn to_parameters(&self) -> Parameters {
        Parameters::new()
    }
}
