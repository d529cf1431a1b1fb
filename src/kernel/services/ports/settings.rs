use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::kernel::preview::DeviceType;
use crate::kernel::state::UiMode;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub preview: PreviewSettings,
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub chat: ChatSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    pub debounce_ms: u64,
    pub build_on_start: bool,
    pub device: DeviceType,
}

impl PreviewSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 1500,
            build_on_start: true,
            device: DeviceType::Desktop,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub mode: UiMode,
    pub panel_sizes: [u32; 3],
    pub sidebar_collapsed: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            mode: UiMode::Workspace,
            panel_sizes: [30, 40, 30],
            sidebar_collapsed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    pub welcome_message: Option<String>,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            welcome_message: Some(
                "Welcome to Lumi IDE! I'm here to help you build amazing applications. \
                 What would you like to create today?"
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
