use std::time::Duration;

use crate::kernel::project::SourceFile;
use crate::kernel::services::ports::{
    BoxFuture, CompileResult, PreviewArtifact, PreviewCompiler, PreviewError,
};

pub const ENTRY_MODULE: &str = "src/App.tsx";
pub const STYLESHEET: &str = "src/index.css";

const EXPORT_MARKER: &str = "export default App;";
const MOUNT_SCRIPT: &str = "
        const root = ReactDOM.createRoot(document.getElementById('root'));
        root.render(React.createElement(App));
        ";

/// Assembles the entry component and stylesheet into one standalone HTML
/// page that loads React and Babel from a CDN.
#[derive(Debug, Clone, Default)]
pub struct HtmlPreviewCompiler {
    latency: Duration,
}

impl HtmlPreviewCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated build time before the result resolves.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl PreviewCompiler for HtmlPreviewCompiler {
    fn compile(&self, files: Vec<SourceFile>) -> BoxFuture<CompileResult> {
        let latency = self.latency;
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            render_document(&files)
        })
    }
}

pub fn render_document(files: &[SourceFile]) -> CompileResult {
    let find = |path: &str| files.iter().find(|file| file.path == path);

    let Some(entry) = find(ENTRY_MODULE) else {
        return Err(vec![PreviewError::error(format!(
            "Entry module {} not found",
            ENTRY_MODULE
        ))
        .at(ENTRY_MODULE, None)]);
    };
    if !entry.content.contains(EXPORT_MARKER) {
        let line = entry.content.lines().count() as u32;
        return Err(vec![PreviewError::error(format!(
            "Expected `{}` in the entry module",
            EXPORT_MARKER
        ))
        .at(ENTRY_MODULE, Some(line.max(1)))]);
    }

    let css = find(STYLESHEET).map(|file| file.content.as_str()).unwrap_or("");
    let script = entry.content.replacen(EXPORT_MARKER, MOUNT_SCRIPT, 1);

    Ok(PreviewArtifact::new(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Preview</title>
    <style>
        {css}
        body {{ margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', sans-serif; }}
    </style>
    <script src="https://unpkg.com/react@18/umd/react.development.js"></script>
    <script src="https://unpkg.com/react-dom@18/umd/react-dom.development.js"></script>
    <script src="https://unpkg.com/@babel/standalone/babel.min.js"></script>
</head>
<body>
    <div id="root"></div>
    <script type="text/babel">
        {script}
    </script>
</body>
</html>"#
    )))
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/compiler.rs"]
mod tests;
