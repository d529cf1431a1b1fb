use super::*;
use crate::kernel::template::ProjectTemplate;

#[test]
fn starter_project_renders_mount_script_and_styles() {
    let files = ProjectTemplate::react_starter().files;

    let artifact = render_document(&files).unwrap();

    assert!(artifact.document.starts_with("<!DOCTYPE html>"));
    assert!(artifact.document.contains("root.render(React.createElement(App));"));
    assert!(!artifact.document.contains(EXPORT_MARKER));
    assert!(artifact.document.contains(".App-header"));
}

#[test]
fn rendering_is_deterministic() {
    let files = ProjectTemplate::react_starter().files;
    assert_eq!(render_document(&files), render_document(&files));
}

#[test]
fn missing_entry_is_a_compile_error() {
    let files = vec![SourceFile::new(STYLESHEET, "body {}")];

    let errors = render_document(&files).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].file.as_deref(), Some(ENTRY_MODULE));
}

#[test]
fn entry_without_default_export_points_at_last_line() {
    let files = vec![SourceFile::new(ENTRY_MODULE, "const App = 1;\nconsole.log(App);")];

    let errors = render_document(&files).unwrap_err();

    assert_eq!(errors[0].line, Some(2));
}

#[tokio::test(start_paused = true)]
async fn compile_resolves_after_latency() {
    let compiler = HtmlPreviewCompiler::with_latency(Duration::from_millis(1500));
    let started = tokio::time::Instant::now();

    let result = compiler
        .compile(ProjectTemplate::react_starter().files)
        .await;

    assert!(result.is_ok());
    assert!(started.elapsed() >= Duration::from_millis(1500));
}
