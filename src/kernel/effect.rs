use crate::kernel::apply::CommandDescriptor;
use crate::kernel::chat::{MessageId, TurnId};
use crate::kernel::project::SourceFile;
use crate::kernel::services::ports::ChatContext;

/// Asynchronous work requested by a reducer; the session runs it and feeds
/// the completion back as an [`crate::kernel::Action`].
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    RequestReply {
        turn: TurnId,
        text: String,
        context: ChatContext,
    },
    Compile {
        generation: u64,
        files: Vec<SourceFile>,
    },
    ExecuteCommand {
        message_id: MessageId,
        index: usize,
        command: CommandDescriptor,
    },
}
