pub mod address;
pub mod error;
pub mod result;

pub use address::*;
pub use error::*;
pub use result::*;
