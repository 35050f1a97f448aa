pub mod columnar;
pub mod key_index;

pub use columnar::*;
pub use key_index::*;
