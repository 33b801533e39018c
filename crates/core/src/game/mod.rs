//! Game session and its timing

pub mod clock;
mod session;

pub use clock::{Clock, ManualClock, SystemClock, Timer};
pub use session::{CheckNotice, ClickResult, GameSession, SessionEvent, Status};
