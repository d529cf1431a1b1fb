//! The session aggregate: owns the kernel store, runs its effects on the
//! injected executor and publishes a snapshot after every transition.
//!
//! Every action method returns once the synchronous part of the transition
//! is applied. Assistant replies, compile results and command outcomes come
//! back over the kernel bus and are applied by [`Session::poll_kernel_bus`]
//! or [`Session::step`].

use crate::kernel::services::ports::{
    Assistant, AsyncExecutor, CommandExecutor, PreviewArtifact, PreviewCompiler, Settings,
};
use crate::kernel::services::KernelServiceHost;
use crate::kernel::{
    Action, DeviceType, FileNode, PanelSizes, Position, ProjectTemplate, Result, Selection,
    SessionError, SessionSnapshot, SessionState, Store, UiMode,
};
use rustc_hash::FxHashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

mod bridge;
mod tick;

const MAX_KERNEL_BUS_DRAIN_PER_TICK: usize = 256;

pub type SubscriptionId = u64;

/// External collaborators the session delegates to.
#[derive(Clone)]
pub struct Collaborators {
    pub assistant: Arc<dyn Assistant>,
    pub compiler: Arc<dyn PreviewCompiler>,
    pub commands: Arc<dyn CommandExecutor>,
}

pub struct Session {
    store: Store,
    host: KernelServiceHost,
    collaborators: Collaborators,
    subscribers: FxHashMap<SubscriptionId, Sender<Arc<SessionSnapshot>>>,
    next_subscription: SubscriptionId,
}

impl Session {
    /// Starts a session on the React starter project.
    pub fn new(
        settings: &Settings,
        collaborators: Collaborators,
        executor: Arc<dyn AsyncExecutor>,
    ) -> Result<Self> {
        Self::with_project(
            ProjectTemplate::react_starter(),
            settings,
            collaborators,
            executor,
        )
    }

    pub fn with_project(
        template: ProjectTemplate,
        settings: &Settings,
        collaborators: Collaborators,
        executor: Arc<dyn AsyncExecutor>,
    ) -> Result<Self> {
        let project_id = template.id.clone();
        let state = SessionState::new(template, settings)?;
        let mut session = Self {
            store: Store::new(state),
            host: KernelServiceHost::new(executor),
            collaborators,
            subscribers: FxHashMap::default(),
            next_subscription: 1,
        };
        tracing::info!(project = %project_id, "session started");

        if settings.preview.build_on_start {
            session.refresh_preview()?;
        }
        Ok(session)
    }

    pub fn state(&self) -> &SessionState {
        self.store.state()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.store.snapshot()
    }

    pub fn file(&self, path: &str) -> Result<&FileNode> {
        self.store.state().files.get(path)
    }

    /// Artifact to open outside the embedded preview, if any build succeeded.
    pub fn preview_artifact(&self) -> Option<&PreviewArtifact> {
        self.store.state().preview.artifact()
    }

    pub fn is_alive(&self) -> bool {
        self.host.is_alive()
    }

    pub fn subscribe(&mut self) -> (SubscriptionId, Receiver<Arc<SessionSnapshot>>) {
        let (tx, rx) = mpsc::channel();
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.subscribers.insert(id, tx);
        (id, rx)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    pub fn send_message(&mut self, text: &str) -> Result<()> {
        self.dispatch(Action::SendMessage(text.to_string()))
    }

    pub fn reset_chat(&mut self) -> Result<()> {
        self.dispatch(Action::ResetChat)
    }

    pub fn focus(&mut self, path: &str) -> Result<()> {
        self.dispatch(Action::Focus(path.to_string()))
    }

    pub fn open_tab(&mut self, path: &str) -> Result<()> {
        self.dispatch(Action::OpenTab(path.to_string()))
    }

    pub fn close_tab(&mut self, path: &str) -> Result<()> {
        self.dispatch(Action::CloseTab(path.to_string()))
    }

    pub fn set_cursor(&mut self, position: Position) -> Result<()> {
        self.dispatch(Action::SetCursor(position))
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) -> Result<()> {
        self.dispatch(Action::SetSelection(selection))
    }

    pub fn update_file_content(&mut self, path: &str, content: impl Into<String>) -> Result<()> {
        self.dispatch(Action::UpdateFileContent {
            path: path.to_string(),
            content: content.into(),
        })
    }

    pub fn create_file(&mut self, path: &str, content: impl Into<String>) -> Result<()> {
        self.dispatch(Action::CreateFile {
            path: path.to_string(),
            content: content.into(),
        })
    }

    pub fn create_directory(&mut self, path: &str) -> Result<()> {
        self.dispatch(Action::CreateDirectory(path.to_string()))
    }

    pub fn delete_file(&mut self, path: &str) -> Result<()> {
        self.dispatch(Action::DeleteFile(path.to_string()))
    }

    pub fn set_device(&mut self, device: DeviceType) -> Result<()> {
        self.dispatch(Action::SetDevice(device))
    }

    pub fn set_mode(&mut self, mode: UiMode) -> Result<()> {
        self.dispatch(Action::SetMode(mode))
    }

    pub fn set_panel_sizes(&mut self, sizes: PanelSizes) -> Result<()> {
        self.dispatch(Action::SetPanelSizes(sizes))
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) -> Result<()> {
        self.dispatch(Action::SetSidebarCollapsed(collapsed))
    }

    pub fn refresh_preview(&mut self) -> Result<()> {
        self.dispatch(Action::RefreshPreview)
    }

    /// Tears the session down. In-flight assistant, compile and command
    /// tasks keep running but their results are dropped.
    pub fn shutdown(&mut self) {
        if self.host.shutdown() {
            self.subscribers.clear();
            tracing::info!(project = %self.store.state().project.id, "session closed");
        }
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.host.is_alive() {
            Ok(())
        } else {
            Err(SessionError::SessionClosed)
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/session.rs"]
mod tests;
