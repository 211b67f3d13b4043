pub mod client;
pub mod errors;
pub mod multipart;

pub use client::{HttpClient, endpoint, error_message_from_body};
pub use errors::HttpError;
pub use multipart::MultipartForm;
