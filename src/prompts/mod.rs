pub mod instructions;
pub mod schema;
pub mod types;

pub use types::*;
