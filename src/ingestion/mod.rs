pub mod cache;
pub mod campus;
