//! Headless session core (state/action/effect).

pub mod action;
pub mod apply;
pub mod chat;
pub mod editor;
pub mod effect;
pub mod error;
pub mod language;
pub mod preview;
pub mod project;
pub mod services;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod template;

pub use action::Action;
pub use apply::{
    apply_actions, ActionApplyFailure, ActionKind, ActionOutcome, ActionStatus, AppliedResult,
    AssistantAction, CommandDescriptor,
};
pub use chat::{ChatMessage, ChatState, ChatStatus, MessageId, Role, TurnId, TurnRecord};
pub use editor::{EditorSession, Position, Selection};
pub use effect::Effect;
pub use error::{Result, SessionError};
pub use language::LanguageTag;
pub use preview::{BuildPipeline, BuildState, DeviceType};
pub use project::{
    ChangeKind, FileChange, FileKind, FileMetadata, FileNode, FileStore, SourceFile, TreeRow,
};
pub use snapshot::{ChatSnapshot, PreviewSnapshot, ProjectSnapshot, SessionSnapshot, StatusSummary};
pub use state::{
    BuildTool, Environment, Framework, PanelSizes, ProjectInfo, ProjectSettings, SessionState,
    UiMode, UiState,
};
pub use store::{DispatchResult, Store};
pub use template::ProjectTemplate;
