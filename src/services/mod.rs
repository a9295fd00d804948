pub mod certificates;
pub mod errors;
pub mod pdf;

pub use errors::{ServiceError, ServiceResult};
