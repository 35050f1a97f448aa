pub mod cpp;
pub mod output;

pub use cpp::*;
pub use output::*;
