use super::*;
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn events_reach_console_as_they_happen_and_the_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let console = Captured::default();
    let sink = console.clone();
    let (writer, guard) = tee_to_file(dir.path(), move || sink.clone());

    let subscriber = tracing_subscriber::registry().with(
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer),
    );
    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(generation = 7, "build started");
        let seen = String::from_utf8(console.0.lock().unwrap().clone()).unwrap();
        assert!(seen.contains("build started"));
        assert!(seen.contains("generation=7"));
    });
    drop(guard);

    let logged: String = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("zplay.log"))
        })
        .map(|path| std::fs::read_to_string(path).unwrap())
        .collect();
    assert!(logged.contains("build started"));
}
