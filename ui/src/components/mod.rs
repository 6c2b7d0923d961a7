//! Presentation components for the dashboard page.

pub mod header;
pub mod layout;
pub mod metric_card;
pub mod platform_info;
pub mod tabs;

pub use header::DashboardHeader;
pub use layout::DashboardLayout;
pub use metric_card::{CardGauge, MetricCard, ProgressBar};
pub use platform_info::PlatformInfo;
pub use tabs::TabList;
