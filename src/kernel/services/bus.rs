use std::time::Instant;
use tokio::sync::mpsc::{self, error::SendError, error::TryRecvError, UnboundedReceiver, UnboundedSender};

#[derive(Debug)]
pub enum KernelMessagePayload {
    Action(crate::kernel::Action),
}

#[derive(Debug)]
pub struct KernelMessage {
    pub enqueued_at: Instant,
    pub payload: KernelMessagePayload,
}

#[derive(Clone)]
pub struct KernelBusSender {
    tx: UnboundedSender<KernelMessage>,
}

pub struct KernelBusReceiver {
    rx: UnboundedReceiver<KernelMessage>,
}

pub fn kernel_bus() -> (KernelBusSender, KernelBusReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (KernelBusSender { tx }, KernelBusReceiver { rx })
}

impl KernelBusSender {
    pub fn send(&self, msg: KernelMessage) -> Result<(), SendError<KernelMessage>> {
        self.tx.send(msg)
    }

    pub fn send_action(&self, action: crate::kernel::Action) -> Result<(), SendError<KernelMessage>> {
        self.send(KernelMessage {
            enqueued_at: Instant::now(),
            payload: KernelMessagePayload::Action(action),
        })
    }
}

impl KernelBusReceiver {
    pub fn try_recv(&mut self) -> Result<KernelMessage, TryRecvError> {
        self.rx.try_recv()
    }

    pub async fn recv(&mut self) -> Option<KernelMessage> {
        self.rx.recv().await
    }
}
