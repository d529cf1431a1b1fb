//! Service adapters: runtime, bundled collaborators and settings IO.

pub mod assistant;
pub mod command;
pub mod compiler;
pub mod runtime;
pub mod settings;

pub use assistant::ScriptedAssistant;
pub use command::LoggingCommandExecutor;
pub use compiler::{render_document, HtmlPreviewCompiler};
pub use runtime::{AsyncRuntime, TokioExecutor};
pub use settings::{
    ensure_log_dir, ensure_settings_file, get_log_dir, get_settings_path, load_settings,
    load_settings_from, write_default_settings,
};
