use super::*;
use crate::kernel::services::bus::KernelMessagePayload;
use crate::kernel::Action;
use std::sync::Mutex;

#[derive(Default)]
struct QueueExecutor {
    tasks: Mutex<Vec<BoxFuture>>,
}

impl AsyncExecutor for QueueExecutor {
    fn spawn(&self, task: BoxFuture) {
        self.tasks.lock().unwrap().push(task);
    }
}

#[test]
fn context_delivers_actions_while_alive() {
    let mut host = KernelServiceHost::new(Arc::new(QueueExecutor::default()));
    let ctx = host.context();

    assert!(ctx.dispatch(Action::Tick));

    match host.try_recv() {
        Ok(KernelMessage {
            payload: KernelMessagePayload::Action(Action::Tick),
            ..
        }) => {}
        other => panic!("unexpected: {other:?}"),
    }
    assert!(matches!(host.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn shutdown_drops_queued_and_late_results() {
    let mut host = KernelServiceHost::new(Arc::new(QueueExecutor::default()));
    let ctx = host.context();
    ctx.dispatch(Action::RefreshPreview);

    assert!(host.shutdown());
    assert!(!host.shutdown());
    assert!(!ctx.is_alive());

    assert!(!ctx.dispatch(Action::Tick));
    assert!(matches!(host.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn spawn_goes_through_executor() {
    let executor = Arc::new(QueueExecutor::default());
    let host = KernelServiceHost::new(executor.clone());

    host.context().spawn_future(async {});

    assert_eq!(executor.tasks.lock().unwrap().len(), 1);
}
