// Utility modules for the recipe backend

pub mod code_alphabet;
pub mod service_error;

pub use service_error::ServiceError;
