pub mod common;
pub mod compare;
pub mod config;
pub mod copy;
pub mod global;
pub mod project;
pub mod scan;
pub mod write;

pub use common::Options;
pub use compare::Compare;
pub use config::Config;
pub use copy::CopyFile;
pub use global::Global;
pub use project::Project;
pub use scan::Scan;
pub use write::WriteFile;
