mod error;
pub mod models;
pub mod seed;

pub use error::*;
pub use models::*;
