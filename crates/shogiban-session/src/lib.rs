//! # shogiban-session
//!
//! Front-end facing state machines over the rules engine.
//!
//! - `game`: `GameSession`, one live game driven by square clicks
//! - `replay`: `AnaliseSession`, stepping through a stored game
//! - `clock`, `prompt`, `recorder`: collaborators a front end plugs in

pub mod clock;
pub mod error;
pub mod game;
pub mod prompt;
pub mod recorder;
pub mod replay;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::ReplayError;
pub use game::{GameSession, SessionState, SessionTransition};
pub use prompt::PromotionPrompt;
pub use recorder::GameRecorder;
pub use replay::AnaliseSession;
