use super::Session;
use crate::kernel::{Action, Effect, Result};
use std::sync::Arc;
use std::time::Instant;

/// Session clock. Follows tokio's clock so paused-time tests see debounce
/// deadlines expire.
pub(super) fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

impl Session {
    pub(super) fn dispatch(&mut self, action: Action) -> Result<()> {
        self.dispatch_at(action, now()).map(|_| ())
    }

    pub(super) fn dispatch_at(&mut self, action: Action, now: Instant) -> Result<bool> {
        self.ensure_alive()?;
        let result = self.store.dispatch_at(action, now)?;
        for effect in result.effects {
            self.run_effect(effect);
        }
        if result.state_changed {
            self.publish();
        }
        Ok(result.state_changed)
    }

    fn run_effect(&self, effect: Effect) {
        let ctx = self.host.context();
        match effect {
            Effect::RequestReply {
                turn,
                text,
                context,
            } => {
                let reply = self.collaborators.assistant.generate_reply(text, context);
                let task_ctx = ctx.clone();
                ctx.spawn_future(async move {
                    let result = reply.await;
                    task_ctx.dispatch(Action::ReplyReceived { turn, result });
                });
            }
            Effect::Compile { generation, files } => {
                let build = self.collaborators.compiler.compile(files);
                let task_ctx = ctx.clone();
                ctx.spawn_future(async move {
                    let result = build.await;
                    task_ctx.dispatch(Action::CompileFinished { generation, result });
                });
            }
            Effect::ExecuteCommand {
                message_id,
                index,
                command,
            } => {
                let run = self.collaborators.commands.execute(command);
                let task_ctx = ctx.clone();
                ctx.spawn_future(async move {
                    let outcome = run.await;
                    task_ctx.dispatch(Action::CommandFinished {
                        message_id,
                        index,
                        outcome,
                    });
                });
            }
        }
    }

    /// Sends the current snapshot to every subscriber; receivers that went
    /// away are dropped.
    fn publish(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = Arc::new(self.store.snapshot());
        self.subscribers
            .retain(|_, tx| tx.send(Arc::clone(&snapshot)).is_ok());
    }
}
