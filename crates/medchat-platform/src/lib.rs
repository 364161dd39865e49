//! Browser adapters for the MedChat ports: `localStorage` / in-memory
//! storage and the HTTP reply client.

pub mod storage;
pub mod reply;
