//! Applies assistant-proposed mutations to the file store.
//!
//! Actions of one message run strictly in order and independently: a failed
//! action is recorded and the next one still runs. Editor tabs follow through
//! the store's change notifications, never through this module.

use serde::{Deserialize, Serialize};

use super::project::FileStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum AssistantAction {
    CreateFile(FilePayload),
    UpdateFile(FilePayload),
    DeleteFile(PathPayload),
    RunCommand(CommandDescriptor),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePayload {
    #[serde(alias = "filename")]
    pub path: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPayload {
    #[serde(alias = "filename")]
    pub path: String,
}

/// Opaque command handed to the command executor as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandDescriptor(pub serde_json::Value);

impl AssistantAction {
    pub fn create_file(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::CreateFile(FilePayload {
            path: path.into(),
            content: content.into(),
        })
    }

    pub fn update_file(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::UpdateFile(FilePayload {
            path: path.into(),
            content: content.into(),
        })
    }

    pub fn delete_file(path: impl Into<String>) -> Self {
        Self::DeleteFile(PathPayload { path: path.into() })
    }

    pub fn run_command(descriptor: serde_json::Value) -> Self {
        Self::RunCommand(CommandDescriptor(descriptor))
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::CreateFile(_) => ActionKind::CreateFile,
            Self::UpdateFile(_) => ActionKind::UpdateFile,
            Self::DeleteFile(_) => ActionKind::DeleteFile,
            Self::RunCommand(_) => ActionKind::RunCommand,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Self::CreateFile(payload) | Self::UpdateFile(payload) => Some(&payload.path),
            Self::DeleteFile(payload) => Some(&payload.path),
            Self::RunCommand(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CreateFile,
    UpdateFile,
    DeleteFile,
    RunCommand,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::CreateFile => "create file",
            Self::UpdateFile => "update file",
            Self::DeleteFile => "delete file",
            Self::RunCommand => "run command",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionApplyFailure {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ActionStatus {
    Applied,
    Pending,
    Failed(ActionApplyFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub index: usize,
    pub kind: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub status: ActionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ActionOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, ActionStatus::Failed(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppliedResult {
    pub outcomes: Vec<ActionOutcome>,
    /// `run_command` actions left for the executor, keyed by action index.
    pub commands: Vec<(usize, CommandDescriptor)>,
}

impl AppliedResult {
    pub fn failures(&self) -> impl Iterator<Item = &ActionOutcome> + '_ {
        self.outcomes.iter().filter(|outcome| outcome.is_failed())
    }

    /// Paths written by create/update actions, in action order.
    pub fn written_paths(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| {
                matches!(o.kind, ActionKind::CreateFile | ActionKind::UpdateFile)
                    && o.status == ActionStatus::Applied
            })
            .filter_map(|o| o.path.as_deref())
            .collect()
    }
}

pub fn apply_actions(files: &mut FileStore, actions: &[AssistantAction]) -> AppliedResult {
    let mut result = AppliedResult::default();
    for (index, action) in actions.iter().enumerate() {
        let status = match action {
            AssistantAction::CreateFile(payload) | AssistantAction::UpdateFile(payload) => {
                match files.set(&payload.path, payload.content.as_str()) {
                    Ok(_) => ActionStatus::Applied,
                    Err(err) => failed(err.to_string()),
                }
            }
            AssistantAction::DeleteFile(payload) => {
                files.remove(&payload.path);
                ActionStatus::Applied
            }
            AssistantAction::RunCommand(descriptor) => {
                result.commands.push((index, descriptor.clone()));
                ActionStatus::Pending
            }
        };

        if let ActionStatus::Failed(failure) = &status {
            tracing::warn!(
                index,
                kind = action.kind().label(),
                error = %failure.message,
                "assistant action failed"
            );
        }

        result.outcomes.push(ActionOutcome {
            index,
            kind: action.kind(),
            path: action.path().map(str::to_string),
            status,
            detail: None,
        });
    }
    result
}

fn failed(message: String) -> ActionStatus {
    ActionStatus::Failed(ActionApplyFailure { message })
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/apply.rs"]
mod tests;
