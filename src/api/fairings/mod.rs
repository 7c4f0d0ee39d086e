pub mod cache;
pub mod guards;
