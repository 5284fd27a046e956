//! Utilities shared by the Marionette server and clients.

pub mod logger;
pub mod time;
