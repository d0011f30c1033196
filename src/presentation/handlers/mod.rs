mod chat;
mod error_response;
mod health;
mod prescriptions;
mod save;
mod transcribe;

pub use chat::chat_handler;
pub use error_response::ErrorResponse;
pub use health::health_handler;
pub use prescriptions::list_prescriptions_handler;
pub use save::save_prescription_handler;
pub use transcribe::transcribe_stream_handler;
