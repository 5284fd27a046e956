//! Marionette server: presence registry, shared effect state and command
//! routing over WebSocket.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
