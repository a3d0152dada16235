//! Session lifecycle handlers.

mod complete_session;
mod create_session;
mod get_session;

pub use complete_session::{CompleteSessionHandler, SessionSummary};
pub use create_session::CreateSessionHandler;
pub use get_session::GetSessionHandler;
