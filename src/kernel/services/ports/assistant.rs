//! Assistant backend contract.

use serde::{Deserialize, Serialize};

use super::runtime::BoxFuture;
use crate::kernel::apply::AssistantAction;

/// Read-only view of the project taken when a message is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    pub project_files: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub body: String,
    #[serde(default)]
    pub actions: Vec<AssistantAction>,
}

impl AssistantReply {
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            actions: Vec::new(),
        }
    }

    pub fn with_actions(body: impl Into<String>, actions: Vec<AssistantAction>) -> Self {
        Self {
            body: body.into(),
            actions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantError {
    pub message: String,
}

impl AssistantError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AssistantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Assistant error: {}", self.message)
    }
}

impl std::error::Error for AssistantError {}

pub type ReplyResult = Result<AssistantReply, AssistantError>;

pub trait Assistant: Send + Sync {
    fn generate_reply(&self, text: String, context: ChatContext) -> BoxFuture<ReplyResult>;
}
