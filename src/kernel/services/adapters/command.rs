use crate::kernel::apply::CommandDescriptor;
use crate::kernel::services::ports::{BoxFuture, CommandExecutor, CommandOutcome};

/// Records `run_command` requests in the log without running anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingCommandExecutor;

impl CommandExecutor for LoggingCommandExecutor {
    fn execute(&self, command: CommandDescriptor) -> BoxFuture<CommandOutcome> {
        Box::pin(async move {
            let CommandDescriptor(descriptor) = command;
            tracing::info!(command = %descriptor, "run_command requested");
            CommandOutcome::Succeeded {
                output: format!("logged {}", descriptor),
            }
        })
    }
}
