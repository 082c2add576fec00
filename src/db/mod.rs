pub mod pool;
pub mod queries;
