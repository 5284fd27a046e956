//! InMemory repositories.

mod session;
mod shared_state;

pub use session::InMemorySessionRepository;
pub use shared_state::InMemorySharedStateRepository;
