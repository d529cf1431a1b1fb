use std::time::Instant;

use super::apply::{apply_actions, ActionApplyFailure, ActionStatus};
use super::error::Result;
use super::services::ports::{AssistantReply, ChatContext, CommandOutcome, ReplyResult};
use super::snapshot::SessionSnapshot;
use super::{Action, Effect, SessionState};

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }

    fn with_effect(effect: Effect) -> Self {
        Self {
            effects: vec![effect],
            state_changed: true,
        }
    }
}

pub struct Store {
    state: SessionState,
    revision: u64,
}

impl Store {
    pub fn new(state: SessionState) -> Self {
        Self { state, revision: 0 }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Bumped once per dispatch that changed observable state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn dispatch(&mut self, action: Action) -> Result<DispatchResult> {
        self.dispatch_at(action, Instant::now())
    }

    /// Applies `action` as of `now`. File store notifications raised by the
    /// action are routed to the editor and the build pipeline before this
    /// returns, so the caller never observes a half-propagated mutation.
    pub fn dispatch_at(&mut self, action: Action, now: Instant) -> Result<DispatchResult> {
        let name = action.name();
        let mut result = self.reduce(action, now).inspect_err(|err| {
            tracing::debug!(action = name, error = %err, "action rejected");
        })?;

        result.state_changed |= self.route_file_changes(now);
        if result.state_changed {
            self.revision += 1;
        }
        Ok(result)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.state, self.revision)
    }

    /// When the next [`Action::Tick`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.preview.deadline()
    }

    /// What the assistant gets to see for a message accepted right now.
    pub fn chat_context(&self) -> ChatContext {
        let state = &self.state;
        let errors = state.preview.errors();
        let error_context = (!errors.is_empty()).then(|| {
            errors
                .iter()
                .map(|error| match (&error.file, error.line) {
                    (Some(file), Some(line)) => format!("{}:{}: {}", file, line, error.message),
                    (Some(file), None) => format!("{}: {}", file, error.message),
                    _ => error.message.clone(),
                })
                .collect::<Vec<_>>()
                .join("\n")
        });

        ChatContext {
            project_files: state
                .files
                .list()
                .filter(|(_, node)| node.is_file())
                .map(|(path, _)| path.to_string())
                .collect(),
            current_file: state.editor.active_file().map(str::to_string),
            selected_code: state.editor.selected_text(&state.files),
            error_context,
        }
    }

    fn reduce(&mut self, action: Action, now: Instant) -> Result<DispatchResult> {
        let state = &mut self.state;
        let result = match action {
            Action::SendMessage(text) => {
                let context = self.chat_context();
                let (turn, text) = self.state.chat.begin_turn(&text)?;
                DispatchResult::with_effect(Effect::RequestReply {
                    turn,
                    text,
                    context,
                })
            }
            Action::ReplyReceived { turn, result } => self.reduce_reply(turn, result),
            Action::ResetChat => DispatchResult::changed(state.chat.reset()),
            Action::Focus(path) => DispatchResult::changed(state.editor.focus(&state.files, &path)?),
            Action::OpenTab(path) => {
                DispatchResult::changed(state.editor.open_tab(&state.files, &path)?)
            }
            Action::CloseTab(path) => DispatchResult::changed(state.editor.close_tab(&path)),
            Action::SetCursor(position) => {
                DispatchResult::changed(state.editor.set_cursor(position))
            }
            Action::SetSelection(selection) => {
                DispatchResult::changed(state.editor.set_selection(selection))
            }
            Action::UpdateFileContent { path, content } => {
                state.files.get(&path)?;
                state.files.set(&path, content)?;
                DispatchResult::changed(true)
            }
            Action::CreateFile { path, content } => {
                state.files.set(&path, content)?;
                DispatchResult::changed(true)
            }
            Action::CreateDirectory(path) => {
                DispatchResult::changed(state.files.create_dir(&path)?)
            }
            Action::DeleteFile(path) => {
                DispatchResult::changed(!state.files.remove(&path).is_empty())
            }
            Action::SetDevice(device) => DispatchResult::changed(state.preview.set_device(device)),
            Action::SetMode(mode) => DispatchResult::changed(state.ui.set_mode(mode)),
            Action::SetPanelSizes(sizes) => {
                DispatchResult::changed(state.ui.set_panel_sizes(sizes)?)
            }
            Action::SetSidebarCollapsed(collapsed) => {
                DispatchResult::changed(state.ui.set_sidebar_collapsed(collapsed))
            }
            Action::RefreshPreview => {
                let generation = state.preview.start();
                DispatchResult::with_effect(Effect::Compile {
                    generation,
                    files: state.files.source_snapshot(),
                })
            }
            Action::CompileFinished { generation, result } => {
                DispatchResult::changed(state.preview.finish(generation, result))
            }
            Action::CommandFinished {
                message_id,
                index,
                outcome,
            } => {
                let (status, detail) = match outcome {
                    CommandOutcome::Succeeded { output } => (ActionStatus::Applied, Some(output)),
                    CommandOutcome::Failed { message } => {
                        tracing::warn!(message_id, index, error = %message, "command failed");
                        (ActionStatus::Failed(ActionApplyFailure { message }), None)
                    }
                };
                DispatchResult::changed(state.chat.resolve_action(message_id, index, status, detail))
            }
            Action::Tick => match state.preview.poll(now) {
                Some(generation) => DispatchResult::with_effect(Effect::Compile {
                    generation,
                    files: state.files.source_snapshot(),
                }),
                None => DispatchResult::changed(false),
            },
        };
        Ok(result)
    }

    /// Appends the assistant message first, then applies its actions, so the
    /// log reads "said X, then did Y" even when Y fails.
    fn reduce_reply(&mut self, turn: u64, result: ReplyResult) -> DispatchResult {
        let chat = &mut self.state.chat;
        let reply: AssistantReply = match result {
            Ok(reply) => reply,
            Err(err) => return DispatchResult::changed(chat.fail_turn(turn, &err)),
        };
        let Some(message_id) = chat.accept_reply(turn, &reply) else {
            return DispatchResult::changed(false);
        };

        let applied = apply_actions(&mut self.state.files, &reply.actions);
        let failed = applied.failures().count();
        if failed > 0 {
            tracing::info!(turn, message_id, failed, "reply applied with failures");
        }

        let effects = applied
            .commands
            .iter()
            .map(|(index, command)| Effect::ExecuteCommand {
                message_id,
                index: *index,
                command: command.clone(),
            })
            .collect();
        self.state
            .chat
            .complete_turn(turn, message_id, applied.outcomes);

        DispatchResult {
            effects,
            state_changed: true,
        }
    }

    fn route_file_changes(&mut self, now: Instant) -> bool {
        let changes = self.state.files.take_changes();
        if changes.is_empty() {
            return false;
        }
        for change in &changes {
            tracing::debug!(path = %change.path, kind = ?change.kind, "file changed");
            self.state.editor.apply_change(change);
        }
        self.state.preview.schedule(now);
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
