pub mod bootstrap;
pub mod cache;
pub mod repository;

pub use cache::SessionCache;
pub use repository::{LoadReport, Repository};
