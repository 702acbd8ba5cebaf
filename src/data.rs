//! Data processing and serialization.

pub mod fix_plan;
pub mod summary;
pub mod yaml;

pub use fix_plan::*;
pub use summary::*;
pub use yaml::*;
