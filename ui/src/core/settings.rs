//! Dashboard timing and presentation settings.
//!
//! Launchers may override these through context:
//! ```ignore
//! use_context_provider(|| DashboardSettings { loading_delay_ms: 0, ..Default::default() });
//! ```
//! Components fall back to [`DashboardSettings::default`] when none is provided.

use dioxus::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    /// Spinner shown before the snapshot is loaded.
    pub loading_delay_ms: u64,
    /// Count-up length for card values.
    pub count_up_ms: f64,
    pub header_reveal_ms: u64,
    pub system_panel_reveal_ms: u64,
    /// First card delay; later cards add `reveal_step_ms` each.
    pub card_reveal_ms: u64,
    pub chart_reveal_ms: u64,
    pub reveal_step_ms: u64,
    pub chart_height: f64,
    pub tall_chart_height: f64,
    /// Default series color (CSS value).
    pub chart_color: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            loading_delay_ms: 500,
            count_up_ms: 1000.0,
            header_reveal_ms: 100,
            system_panel_reveal_ms: 800,
            card_reveal_ms: 100,
            chart_reveal_ms: 500,
            reveal_step_ms: 100,
            chart_height: 300.0,
            tall_chart_height: 400.0,
            chart_color: "var(--color-primary)".to_string(),
        }
    }
}

impl DashboardSettings {
    /// Reveal delay of the `index`-th card in a row.
    pub fn card_delay(&self, index: usize) -> u64 {
        self.card_reveal_ms + self.reveal_step_ms * index as u64
    }

    /// Reveal delay of the `index`-th chart in a tab.
    pub fn chart_delay(&self, index: usize) -> u64 {
        self.chart_reveal_ms + self.reveal_step_ms * index as u64
    }
}

/// Settings from context, or defaults.
pub fn use_settings() -> DashboardSettings {
    try_use_context::<DashboardSettings>().unwrap_or_default()
}
