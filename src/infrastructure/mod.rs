pub mod audio;
pub mod gemini;
pub mod observability;
