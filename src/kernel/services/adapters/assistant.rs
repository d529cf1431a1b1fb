use std::time::Duration;

use crate::kernel::apply::AssistantAction;
use crate::kernel::services::ports::{
    Assistant, AssistantReply, BoxFuture, ChatContext, ReplyResult,
};

const DEFAULT_BODY: &str = "I understand what you want to build. Let me help you with that. \
                            I'll start by creating the necessary files and components.";

/// Offline stand-in for an assistant backend: answers every message with the
/// same reply after a fixed delay.
#[derive(Debug, Clone)]
pub struct ScriptedAssistant {
    delay: Duration,
    reply: AssistantReply,
}

impl Default for ScriptedAssistant {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(2),
            reply: AssistantReply::with_actions(
                DEFAULT_BODY,
                vec![AssistantAction::create_file(
                    "src/NewComponent.tsx",
                    "// Generated component",
                )],
            ),
        }
    }
}

impl ScriptedAssistant {
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Assistant for ScriptedAssistant {
    fn generate_reply(&self, text: String, context: ChatContext) -> BoxFuture<ReplyResult> {
        let delay = self.delay;
        let reply = self.reply.clone();
        Box::pin(async move {
            tracing::debug!(
                chars = text.len(),
                files = context.project_files.len(),
                current_file = context.current_file.as_deref().unwrap_or(""),
                "scripted assistant replying"
            );
            tokio::time::sleep(delay).await;
            Ok(reply)
        })
    }
}
