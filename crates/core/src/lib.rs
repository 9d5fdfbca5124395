//! Domain types for the flashcard quiz client: generated questions, the
//! quiz session state machine, scoring, and the card/source rules around it.

#![forbid(unsafe_code)]

pub mod model;
pub mod time;

pub use time::Clock;
