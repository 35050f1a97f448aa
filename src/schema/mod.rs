pub mod outputs;
pub mod tables;
pub mod types;

pub use outputs::*;
pub use tables::*;
pub use types::*;
