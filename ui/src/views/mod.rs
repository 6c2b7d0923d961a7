mod dashboard;
pub mod performance;

pub use dashboard::{Dashboard, LocalizedDashboard};
pub use performance::PerformanceMetrics;
