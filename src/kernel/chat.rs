//! Append-only conversation log and the single-flight assistant turn.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use super::apply::{ActionOutcome, ActionStatus, AssistantAction};
use super::error::{Result, SessionError};
use super::services::ports::{AssistantError, AssistantReply};

pub type MessageId = u64;
pub type TurnId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: Role,
    pub body: String,
    pub created_at: SystemTime,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attached_actions: Vec<AssistantAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ChatStatus {
    Idle,
    AwaitingReply { turn: TurnId },
}

/// What happened to the actions attached to one assistant message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRecord {
    pub turn: TurnId,
    pub message_id: MessageId,
    pub outcomes: Vec<ActionOutcome>,
}

impl TurnRecord {
    pub fn failures(&self) -> impl Iterator<Item = &ActionOutcome> + '_ {
        self.outcomes.iter().filter(|outcome| outcome.is_failed())
    }
}

#[derive(Debug)]
pub struct ChatState {
    messages: Vec<ChatMessage>,
    status: ChatStatus,
    turns: Vec<TurnRecord>,
    next_message_id: MessageId,
    next_turn: TurnId,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            status: ChatStatus::Idle,
            turns: Vec::new(),
            next_message_id: 1,
            next_turn: 1,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn status(&self) -> ChatStatus {
        self.status
    }

    pub fn is_awaiting_reply(&self) -> bool {
        matches!(self.status, ChatStatus::AwaitingReply { .. })
    }

    pub fn is_current_turn(&self, turn: TurnId) -> bool {
        self.status == ChatStatus::AwaitingReply { turn }
    }

    pub fn turns(&self) -> &[TurnRecord] {
        &self.turns
    }

    pub fn turn_for_message(&self, message_id: MessageId) -> Option<&TurnRecord> {
        self.turns.iter().find(|record| record.message_id == message_id)
    }

    pub fn push_system(&mut self, body: impl Into<String>) -> MessageId {
        self.push(Role::System, body.into(), Vec::new())
    }

    /// Accepts a user message and opens a turn. The text is logged and
    /// returned as typed; whitespace-only input is rejected.
    pub fn begin_turn(&mut self, text: &str) -> Result<(TurnId, String)> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        if self.is_awaiting_reply() {
            return Err(SessionError::Busy);
        }

        let turn = self.next_turn;
        self.next_turn += 1;
        self.push(Role::User, text.to_string(), Vec::new());
        self.status = ChatStatus::AwaitingReply { turn };
        tracing::info!(turn, "chat turn started");
        Ok((turn, text.to_string()))
    }

    /// Appends the assistant message for `turn`; the turn stays open until
    /// [`ChatState::complete_turn`]. Returns `None` for a superseded turn.
    pub fn accept_reply(&mut self, turn: TurnId, reply: &AssistantReply) -> Option<MessageId> {
        if !self.is_current_turn(turn) {
            tracing::debug!(turn, "dropping reply for superseded turn");
            return None;
        }
        Some(self.push(Role::Assistant, reply.body.clone(), reply.actions.clone()))
    }

    pub fn complete_turn(
        &mut self,
        turn: TurnId,
        message_id: MessageId,
        outcomes: Vec<ActionOutcome>,
    ) {
        if !self.is_current_turn(turn) {
            return;
        }
        self.turns.push(TurnRecord {
            turn,
            message_id,
            outcomes,
        });
        self.status = ChatStatus::Idle;
        tracing::info!(turn, message_id, "chat turn completed");
    }

    pub fn fail_turn(&mut self, turn: TurnId, error: &AssistantError) -> bool {
        if !self.is_current_turn(turn) {
            tracing::debug!(turn, "dropping failure for superseded turn");
            return false;
        }
        tracing::warn!(turn, error = %error.message, "assistant reply failed");
        self.push_system(format!("The assistant could not reply: {}", error.message));
        self.status = ChatStatus::Idle;
        true
    }

    /// Abandons an outstanding turn; a late reply for it is ignored.
    pub fn reset(&mut self) -> bool {
        match self.status {
            ChatStatus::AwaitingReply { turn } => {
                tracing::info!(turn, "chat turn abandoned");
                self.status = ChatStatus::Idle;
                true
            }
            ChatStatus::Idle => false,
        }
    }

    /// Records the executor's verdict for a pending `run_command` action.
    pub fn resolve_action(
        &mut self,
        message_id: MessageId,
        index: usize,
        status: ActionStatus,
        detail: Option<String>,
    ) -> bool {
        let Some(outcome) = self
            .turns
            .iter_mut()
            .find(|record| record.message_id == message_id)
            .and_then(|record| record.outcomes.iter_mut().find(|o| o.index == index))
        else {
            return false;
        };
        if outcome.status != ActionStatus::Pending {
            return false;
        }
        outcome.status = status;
        outcome.detail = detail;
        true
    }

    fn push(&mut self, role: Role, body: String, attached_actions: Vec<AssistantAction>) -> MessageId {
        let id = self.next_message_id;
        self.next_message_id += 1;
        self.messages.push(ChatMessage {
            id,
            role,
            body,
            created_at: SystemTime::now(),
            attached_actions,
        });
        id
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/chat.rs"]
mod tests;
