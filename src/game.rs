//! Game layer.
//!
//! Implements the play rules on top of the catalog:
//! - Rounds with a hidden target and a bounded number of guesses
//! - Runs that chain rounds with a score and lives
//! - A single-slot timer for the automatic next round
//! - Sessions that tie it together for a front end

mod round;
mod run;
mod schedule;
mod session;

pub use round::{Guess, Round, RoundStatus};
pub use run::{Run, RunStatus};
pub use schedule::Deferred;
pub use session::{Session, StatusMessage, Tone};
