//! Form participation: validity, reset/submit dispatch, submission encoding.

pub mod form;
pub mod validity;

pub use form::{Form, FormData, ParticipantHandle, SubmitBlocked};
pub use validity::Validity;
