use std::io;
use std::sync::Arc;

use zplay::app::{Collaborators, Session};
use zplay::kernel::services::adapters::{
    ensure_settings_file, load_settings, AsyncRuntime, HtmlPreviewCompiler,
    LoggingCommandExecutor, ScriptedAssistant,
};
use zplay::kernel::services::ports::Settings;

mod logging;

const DEMO_PROMPT: &str = "Build me a landing page with a hero section";

fn main() -> io::Result<()> {
    let _logging = logging::init();

    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "failed to create default settings file");
    }
    let settings = load_settings().unwrap_or_else(Settings::default);

    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEMO_PROMPT.to_string());

    let runtime = AsyncRuntime::new()?;
    let collaborators = Collaborators {
        assistant: Arc::new(ScriptedAssistant::default()),
        compiler: Arc::new(HtmlPreviewCompiler::new()),
        commands: Arc::new(LoggingCommandExecutor),
    };

    let snapshot = runtime.block_on(async {
        let mut session = Session::new(&settings, collaborators, runtime.executor())
            .map_err(io::Error::other)?;
        session.send_message(&prompt).map_err(io::Error::other)?;
        session.settle().await.map_err(io::Error::other)?;
        let snapshot = session.snapshot();
        session.shutdown();
        Ok::<_, io::Error>(snapshot)
    })?;

    let json = snapshot.to_json().map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}
