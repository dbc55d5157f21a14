//! Chat transcript, session state and the scheduler-driven driver.

pub mod driver;
pub mod message;
pub mod session;

pub use driver::ChatDriver;
pub use message::{ChatMessage, Sender};
pub use session::{ChatSession, PendingReply};
