//! Services layer (ports + adapters).
//!
//! - `ports`: collaborator contracts and the data they exchange.
//! - `adapters`: bundled implementations (tokio runtime, demo collaborators, settings IO).

pub mod adapters;
pub mod bus;
pub mod host;
pub mod ports;

pub use bus::{kernel_bus, KernelBusReceiver, KernelBusSender, KernelMessage, KernelMessagePayload};
pub use host::{KernelServiceContext, KernelServiceHost};
