pub mod hash;
pub use hash::{hash_list, HashAccumulator, StableHash};

pub mod model;
pub use model::{AppDetailData, Component};

pub mod basic_info;
pub use basic_info::{AppBasicInfo, IconCache, IconHandle};

pub mod server_data;
pub use server_data::{Category, FingerprintDiff, ServerSideAppData};

pub mod load;

pub mod config;

pub mod errors;
pub use errors::{Error, Result};

pub mod version;
pub use version::{Version, VERSION};

pub mod utils;

#[cfg(test)]
pub mod testing;
