//! Messaging between the panel, the element and the host.
//!
//! Provides:
//! - [`ActionEvent`] values the panel emits through an [`ActionCallback`]
//! - [`HostSignal`]s the element dispatches for the host
//! - [`SignalBus`] carrying those signals to any number of listeners

mod bus;
mod types;

pub use bus::{BusError, SignalBus, SignalReceiver, SignalSender, DEFAULT_BUS_CAPACITY};
pub use types::*;
