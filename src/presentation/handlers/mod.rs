mod audio_upload;
mod conversions;
mod error_response;
mod health;
mod outputs;
mod session;

pub use conversions::start_conversion_handler;
pub use error_response::ErrorResponse;
pub use health::health_handler;
pub use outputs::download_output_handler;
pub use session::{
    add_reference_handler, delete_source_handler, remove_reference_handler, session_handler,
    set_mode_handler, source_preview_handler, upload_source_handler,
};
