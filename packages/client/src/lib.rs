//! Marionette clients: the viewer-side command reconciler with its animation
//! scheduler, and the operator console.

pub mod animation;
pub mod chat;
pub mod connection;
pub mod error;
pub mod identity;
pub mod operator;
pub mod reconciler;
pub mod viewer;

mod ui;
