//! Wordeau core - guess feedback, hint aggregation and hard-mode rules.
//!
//! Everything here is pure game logic with no I/O:
//!
//! - **Letters**: per-letter feedback and evaluated guesses
//! - **Hints**: cumulative letter/position knowledge folded from history
//! - **Hard mode**: checks a candidate guess against the hints
//! - **Guard**: advisory single-slot lock for in-flight submissions

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod guard;
mod hard_mode;
mod hints;
mod letter;

pub use guard::{GuardPermit, SubmissionGuard};
pub use hard_mode::unused_hint_letters;
pub use hints::{Hints, LetterHints, PositionHints, derive_hints};
pub use letter::{
    FeedbackError, Guess, LetterFeedback, LetterState, MAX_ATTEMPTS, WORD_LENGTH,
    is_winning_guess,
};
