// Adapters layer: concrete implementations for external systems
// (store, webhook transports, display, wall clock).

pub mod clock;
pub mod display;
pub mod store;
pub mod webhook;
