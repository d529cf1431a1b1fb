pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    NotFound(String),
    InvalidPath { path: String, reason: &'static str },
    UnknownFile(String),
    EmptyMessage,
    Busy,
    InvalidLayout(String),
    SessionClosed,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::NotFound(path) => write!(f, "File not found: {}", path),
            SessionError::InvalidPath { path, reason } => {
                write!(f, "Invalid path {:?}: {}", path, reason)
            }
            SessionError::UnknownFile(path) => write!(f, "Unknown file: {}", path),
            SessionError::EmptyMessage => write!(f, "Message is empty"),
            SessionError::Busy => write!(f, "Assistant is still replying"),
            SessionError::InvalidLayout(reason) => write!(f, "Invalid panel layout: {}", reason),
            SessionError::SessionClosed => write!(f, "Session has been closed"),
        }
    }
}

impl std::error::Error for SessionError {}
