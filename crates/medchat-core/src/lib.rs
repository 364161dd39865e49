//! MedChat core: the conversation store, the chat session that drives one
//! turn at a time, and the ports the browser adapters implement.

pub mod ports;
pub mod event_bus;
pub mod store;
pub mod session;
