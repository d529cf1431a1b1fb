use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::bus::{kernel_bus, KernelBusReceiver, KernelBusSender, KernelMessage};
use super::ports::{AsyncExecutor, BoxFuture};
use tokio::sync::mpsc::error::TryRecvError;

/// Owns the receiving end of the kernel bus and the executor that runs
/// effect tasks. Tasks get a [`KernelServiceContext`] to report back with.
pub struct KernelServiceHost {
    bus: KernelBusSender,
    rx: KernelBusReceiver,
    executor: Arc<dyn AsyncExecutor>,
    alive: Arc<AtomicBool>,
}

/// Cloneable handle captured by spawned tasks. Once the host shuts down,
/// `dispatch` drops whatever a task still tries to deliver.
#[derive(Clone)]
pub struct KernelServiceContext {
    bus: KernelBusSender,
    executor: Arc<dyn AsyncExecutor>,
    alive: Arc<AtomicBool>,
}

impl KernelServiceHost {
    pub fn new(executor: Arc<dyn AsyncExecutor>) -> Self {
        let (bus, rx) = kernel_bus();
        Self {
            bus,
            rx,
            executor,
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn context(&self) -> KernelServiceContext {
        KernelServiceContext {
            bus: self.bus.clone(),
            executor: Arc::clone(&self.executor),
            alive: Arc::clone(&self.alive),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Marks the host dead and discards anything already queued.
    pub fn shutdown(&mut self) -> bool {
        let was_alive = self.alive.swap(false, Ordering::AcqRel);
        while self.rx.try_recv().is_ok() {}
        was_alive
    }

    pub fn try_recv(&mut self) -> Result<KernelMessage, TryRecvError> {
        self.rx.try_recv()
    }

    pub async fn recv(&mut self) -> Option<KernelMessage> {
        self.rx.recv().await
    }
}

impl KernelServiceContext {
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Returns `false` when the result was dropped because the host is gone.
    pub fn dispatch(&self, action: crate::kernel::Action) -> bool {
        if !self.is_alive() {
            tracing::debug!(action = action.name(), "dropping result for closed session");
            return false;
        }
        self.bus.send_action(action).is_ok()
    }

    pub fn spawn(&self, task: BoxFuture) {
        self.executor.spawn(task);
    }

    pub fn spawn_future<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.executor.spawn(Box::pin(task));
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/services/host.rs"]
mod tests;
