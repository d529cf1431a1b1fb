//! Read-only projection of a session handed to subscribers.

use serde::Serialize;

use super::chat::{ChatMessage, TurnRecord};
use super::editor::EditorSession;
use super::preview::{BuildState, DeviceType};
use super::project::{FileNode, TreeRow};
use super::services::ports::{PreviewArtifact, Severity};
use super::state::{ProjectSettings, SessionState, UiState};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Store revision this snapshot was taken at.
    pub revision: u64,
    pub project: ProjectSnapshot,
    pub editor: EditorSession,
    pub chat: ChatSnapshot,
    pub preview: PreviewSnapshot,
    pub ui: UiState,
    pub status: StatusSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    pub id: String,
    pub display_name: String,
    pub settings: ProjectSettings,
    pub files: Vec<FileNode>,
    pub tree: Vec<TreeRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSnapshot {
    pub messages: Vec<ChatMessage>,
    pub awaiting_reply: bool,
    pub turns: Vec<TurnRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSnapshot {
    pub device: DeviceType,
    pub build: BuildState,
    pub artifact: Option<PreviewArtifact>,
    pub artifact_generation: Option<u64>,
    pub stale: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub file_count: usize,
    pub open_tab_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
}

impl SessionSnapshot {
    pub fn capture(state: &SessionState, revision: u64) -> Self {
        Self {
            revision,
            project: ProjectSnapshot {
                id: state.project.id.clone(),
                display_name: state.project.display_name.clone(),
                settings: state.project.settings.clone(),
                files: state.files.list().map(|(_, node)| node.clone()).collect(),
                tree: state.files.tree(),
            },
            editor: state.editor.clone(),
            chat: ChatSnapshot {
                messages: state.chat.messages().to_vec(),
                awaiting_reply: state.chat.is_awaiting_reply(),
                turns: state.chat.turns().to_vec(),
            },
            preview: PreviewSnapshot {
                device: state.preview.device(),
                build: state.preview.state().clone(),
                artifact: state.preview.artifact().cloned(),
                artifact_generation: state.preview.artifact_generation(),
                stale: state.preview.artifact_is_stale(),
            },
            ui: state.ui.clone(),
            status: StatusSummary::of(state),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl StatusSummary {
    pub fn of(state: &SessionState) -> Self {
        Self {
            file_count: state.files.file_count(),
            open_tab_count: state.editor.open_tabs().len(),
            error_count: state.preview.count(Severity::Error),
            warning_count: state.preview.count(Severity::Warning),
        }
    }
}
