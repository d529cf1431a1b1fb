//! Host side of the kernel: runs effects and publishes snapshots.

pub mod session;

pub use session::{Collaborators, Session, SubscriptionId};
