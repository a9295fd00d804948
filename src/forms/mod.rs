pub mod certificates;
pub mod upload;
