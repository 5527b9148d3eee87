pub mod catalog;
pub mod stats;
pub mod sync_service;

pub use catalog::CourseCatalog;
pub use stats::DashboardStats;
pub use sync_service::{LoadSource, Loaded, SyncService};
