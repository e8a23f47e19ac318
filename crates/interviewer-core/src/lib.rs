//! interviewer-core: session model, sequencing and the submission cycle.
//!
//! This crate holds the interview flow logic: picking the next question,
//! driving the submit → feedback → advance cycle, and projecting a finished
//! session into its report view. The service itself sits behind the
//! [`traits::InterviewGateway`] trait.

pub mod cycle;
pub mod error;
pub mod history;
pub mod model;
pub mod sequencer;
pub mod summary;
pub mod traits;

pub use cycle::{Advance, AdvanceTicket, CycleState, SubmissionCycle};
pub use error::InterviewError;
pub use sequencer::{next_actionable, NextAction};
pub use summary::{project, SummaryView};
pub use traits::InterviewGateway;
