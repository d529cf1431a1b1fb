use crate::kernel::chat::{MessageId, TurnId};
use crate::kernel::editor::{Position, Selection};
use crate::kernel::preview::DeviceType;
use crate::kernel::services::ports::{CommandOutcome, CompileResult, ReplyResult};
use crate::kernel::state::{PanelSizes, UiMode};

#[derive(Debug, Clone)]
pub enum Action {
    SendMessage(String),
    ReplyReceived {
        turn: TurnId,
        result: ReplyResult,
    },
    ResetChat,
    Focus(String),
    OpenTab(String),
    CloseTab(String),
    SetCursor(Position),
    SetSelection(Option<Selection>),
    UpdateFileContent {
        path: String,
        content: String,
    },
    CreateFile {
        path: String,
        content: String,
    },
    CreateDirectory(String),
    DeleteFile(String),
    SetDevice(DeviceType),
    SetMode(UiMode),
    SetPanelSizes(PanelSizes),
    SetSidebarCollapsed(bool),
    RefreshPreview,
    CompileFinished {
        generation: u64,
        result: CompileResult,
    },
    CommandFinished {
        message_id: MessageId,
        index: usize,
        outcome: CommandOutcome,
    },
    Tick,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SendMessage(_) => "send_message",
            Action::ReplyReceived { .. } => "reply_received",
            Action::ResetChat => "reset_chat",
            Action::Focus(_) => "focus",
            Action::OpenTab(_) => "open_tab",
            Action::CloseTab(_) => "close_tab",
            Action::SetCursor(_) => "set_cursor",
            Action::SetSelection(_) => "set_selection",
            Action::UpdateFileContent { .. } => "update_file_content",
            Action::CreateFile { .. } => "create_file",
            Action::CreateDirectory(_) => "create_directory",
            Action::DeleteFile(_) => "delete_file",
            Action::SetDevice(_) => "set_device",
            Action::SetMode(_) => "set_mode",
            Action::SetPanelSizes(_) => "set_panel_sizes",
            Action::SetSidebarCollapsed(_) => "set_sidebar_collapsed",
            Action::RefreshPreview => "refresh_preview",
            Action::CompileFinished { .. } => "compile_finished",
            Action::CommandFinished { .. } => "command_finished",
            Action::Tick => "tick",
        }
    }
}
