use super::bridge::now;
use super::Session;
use crate::kernel::services::{KernelMessage, KernelMessagePayload};
use crate::kernel::{Action, ActionStatus, BuildState, Result};
use std::time::Instant;
use tokio::sync::mpsc::error::TryRecvError;

impl Session {
    /// Fires the preview debounce if its deadline has passed.
    pub fn tick(&mut self) -> Result<bool> {
        self.tick_at(now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Result<bool> {
        self.dispatch_at(Action::Tick, now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.store.next_deadline()
    }

    /// Applies completions already waiting on the kernel bus without
    /// blocking. Returns whether any of them changed state.
    pub fn poll_kernel_bus(&mut self) -> Result<bool> {
        self.ensure_alive()?;
        let mut changed = false;
        let mut drained = 0usize;
        loop {
            if drained >= super::MAX_KERNEL_BUS_DRAIN_PER_TICK {
                break;
            }
            match self.host.try_recv() {
                Ok(msg) => {
                    drained += 1;
                    changed |= self.deliver(msg)?;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }
        Ok(changed)
    }

    /// Waits for the next completion or the debounce deadline, whichever
    /// comes first, and applies it.
    pub async fn step(&mut self) -> Result<bool> {
        self.ensure_alive()?;
        let msg = match self.store.next_deadline() {
            Some(deadline) => {
                match tokio::time::timeout_at(deadline.into(), self.host.recv()).await {
                    Ok(msg) => msg,
                    Err(_) => return self.tick(),
                }
            }
            None => self.host.recv().await,
        };
        match msg {
            Some(msg) => self.deliver(msg),
            None => Ok(false),
        }
    }

    /// Steps until no reply, build, debounce or command is outstanding.
    pub async fn settle(&mut self) -> Result<()> {
        while !self.is_idle() {
            self.step().await?;
        }
        Ok(())
    }

    pub fn is_idle(&self) -> bool {
        let state = self.store.state();
        let commands_pending = state
            .chat
            .turns()
            .iter()
            .flat_map(|record| record.outcomes.iter())
            .any(|outcome| matches!(outcome.status, ActionStatus::Pending));
        !state.chat.is_awaiting_reply()
            && state.preview.deadline().is_none()
            && !matches!(state.preview.state(), BuildState::Building { .. })
            && !commands_pending
    }

    fn deliver(&mut self, msg: KernelMessage) -> Result<bool> {
        let queue_wait = msg.enqueued_at.elapsed();
        if queue_wait.as_millis() > 1 {
            tracing::debug!(
                queue_wait_ms = queue_wait.as_millis() as u64,
                target = "session.bus",
                "kernel bus queue wait"
            );
        }
        match msg.payload {
            KernelMessagePayload::Action(action) => self.dispatch_at(action, now()),
        }
    }
}
