mod editor;
mod error;
mod forward;
mod session;

pub use editor::Editor;
pub use error::SessionError;
pub use forward::{ForwardDecision, ForwardQueue, Queued};
pub use session::{SendTicket, SentResponse, Session};
