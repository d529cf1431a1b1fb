//! Service ports: collaborator traits + data contracts.

pub mod assistant;
pub mod command;
pub mod compiler;
pub mod runtime;
pub mod settings;

pub use assistant::{Assistant, AssistantError, AssistantReply, ChatContext, ReplyResult};
pub use command::{CommandExecutor, CommandOutcome};
pub use compiler::{
    CompileError, CompileResult, PreviewArtifact, PreviewCompiler, PreviewError, Severity,
};
pub use runtime::{AsyncExecutor, BoxFuture};
pub use settings::{ChatSettings, LayoutSettings, PreviewSettings, Settings};
