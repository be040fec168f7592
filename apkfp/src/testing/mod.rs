mod temp;
pub use temp::*;

mod fixtures;
pub use fixtures::*;
