//! Analysis results as produced by the APK analyzer.

pub mod general;
pub use general::*;

pub mod certificate;
pub use certificate::*;

pub mod component;
pub use component::*;

pub mod file;
pub use file::*;

pub mod resource;
pub use resource::*;

pub mod detail;
pub use detail::*;
