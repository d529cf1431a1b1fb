use serde::Serialize;

use super::runtime::BoxFuture;
use crate::kernel::apply::CommandDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum CommandOutcome {
    Succeeded { output: String },
    Failed { message: String },
}

pub trait CommandExecutor: Send + Sync {
    fn execute(&self, command: CommandDescriptor) -> BoxFuture<CommandOutcome>;
}
