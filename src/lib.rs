//! Multi-speaker voice conversion over a hosted generative model.
//!
//! Reference clips are profiled into voices, the source clip is transcribed
//! with speaker labels, and the transcript is resynthesized with one voice per
//! speaker. The result is served as a WAV file.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
