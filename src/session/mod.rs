//! Turn sessions.
//!
//! A turn is one user message and the streamed assistant reply to it. The
//! session owns the accumulator and the lifecycle state; the caller owns the
//! reconciler and decides where the finalized message goes.

mod callbacks;
mod guard;
mod state;
mod turn;

pub use callbacks::{ChannelCallbacks, NoopCallbacks, RecordingCallbacks, TurnCallbacks, TurnUpdate};
pub use guard::{ActiveTurns, TurnGuard};
pub use state::TurnState;
pub use turn::{TurnOutcome, TurnSession};
