pub mod fs;
pub use fs::*;

pub mod hex;
pub use hex::*;
