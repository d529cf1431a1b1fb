use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::chat::ChatState;
use super::editor::EditorSession;
use super::error::{Result, SessionError};
use super::preview::BuildPipeline;
use super::project::FileStore;
use super::services::ports::{LayoutSettings, Settings};
use super::template::ProjectTemplate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiMode {
    #[default]
    Workspace,
    Preview,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    React,
    Vue,
    Vanilla,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildTool {
    #[default]
    Vite,
    Webpack,
    Parcel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    pub framework: Framework,
    pub build_tool: BuildTool,
    pub dependencies: IndexMap<String, String>,
    pub environment: Environment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub id: String,
    pub display_name: String,
    pub settings: ProjectSettings,
}

/// Chat, editor and preview widths in percent.
pub type PanelSizes = [u32; 3];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub mode: UiMode,
    pub panel_sizes: PanelSizes,
    pub sidebar_collapsed: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self::from_settings(&LayoutSettings::default())
    }
}

impl UiState {
    pub fn from_settings(layout: &LayoutSettings) -> Self {
        let panel_sizes = match validate_panel_sizes(layout.panel_sizes) {
            Ok(()) => layout.panel_sizes,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring configured panel sizes");
                LayoutSettings::default().panel_sizes
            }
        };
        Self {
            mode: layout.mode,
            panel_sizes,
            sidebar_collapsed: layout.sidebar_collapsed,
        }
    }

    pub fn set_mode(&mut self, mode: UiMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    pub fn set_panel_sizes(&mut self, sizes: PanelSizes) -> Result<bool> {
        validate_panel_sizes(sizes)?;
        let changed = self.panel_sizes != sizes;
        self.panel_sizes = sizes;
        Ok(changed)
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) -> bool {
        let changed = self.sidebar_collapsed != collapsed;
        self.sidebar_collapsed = collapsed;
        changed
    }
}

/// Every panel must be visible and the widths must add up to 100 (±1 for
/// rounding in the resize handles).
pub fn validate_panel_sizes(sizes: PanelSizes) -> Result<()> {
    if sizes.iter().any(|size| *size == 0) {
        return Err(SessionError::InvalidLayout(format!(
            "every panel needs a positive width, got {:?}",
            sizes
        )));
    }
    let total: u32 = sizes.iter().sum();
    if total.abs_diff(100) > 1 {
        return Err(SessionError::InvalidLayout(format!(
            "panel widths must sum to 100, got {}",
            total
        )));
    }
    Ok(())
}

#[derive(Debug)]
pub struct SessionState {
    pub project: ProjectInfo,
    pub files: FileStore,
    pub editor: EditorSession,
    pub chat: ChatState,
    pub preview: BuildPipeline,
    pub ui: UiState,
}

impl SessionState {
    pub fn new(template: ProjectTemplate, settings: &Settings) -> Result<Self> {
        let mut files = FileStore::new();
        for file in &template.files {
            files.set(&file.path, file.content.as_str())?;
        }
        // Seeding is not an edit; the first build comes from `build_on_start`.
        files.take_changes();

        let mut editor = EditorSession::new();
        if let Some(active) = template.active_file.as_deref() {
            editor.focus(&files, active)?;
        }

        let mut chat = ChatState::new();
        if let Some(welcome) = settings.chat.welcome_message.as_deref() {
            chat.push_system(welcome);
        }

        let mut preview = BuildPipeline::new(settings.preview.debounce());
        preview.set_device(settings.preview.device);

        Ok(Self {
            project: ProjectInfo {
                id: template.id,
                display_name: template.display_name,
                settings: template.settings,
            },
            files,
            editor,
            chat,
            preview,
            ui: UiState::from_settings(&settings.layout),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
