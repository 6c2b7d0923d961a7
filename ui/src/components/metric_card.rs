use dioxus::prelude::*;

use crate::core::format::{format_card_value, format_percent};
use crate::core::settings::use_settings;
use crate::core::transform::ratio_percent;
use crate::hooks::{use_count_up, use_reveal};
use crate::t;

/// Optional bar under a card's value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CardGauge {
    #[default]
    None,
    /// Value relative to a maximum; the bar reflects the final ratio immediately.
    Usage { max: f64 },
    /// A percentage that counts up alongside the value.
    Progress(f64),
}

#[component]
pub fn MetricCard(
    #[props(into)] title: String,
    value: f64,
    #[props(into, default)] unit: String,
    #[props(default)] gauge: CardGauge,
    #[props(into, default)] icon: String,
    #[props(default = true)] animated: bool,
    #[props(default)] delay_ms: u64,
) -> Element {
    let settings = use_settings();
    let visible = use_reveal(if animated { delay_ms } else { 0 });

    let progress_target = match gauge {
        CardGauge::Progress(pct) => pct,
        _ => 0.0,
    };
    let counted_value = use_count_up(value, visible, settings.count_up_ms);
    let counted_progress = use_count_up(progress_target, visible, settings.count_up_ms);

    let (shown_value, shown_progress) = if animated {
        (counted_value(), counted_progress())
    } else {
        (value, progress_target)
    };
    let display = format_card_value(shown_value, value);

    let state_class = if visible() {
        "metric-card--visible"
    } else {
        "metric-card--hidden"
    };

    rsx! {
        article { class: "metric-card {state_class}",
            header { class: "metric-card__title",
                if !icon.is_empty() {
                    span { class: "metric-card__icon", aria_hidden: "true", "{icon}" }
                }
                span { "{title}" }
            }

            div { class: "metric-card__value",
                "{display}"
                if !unit.is_empty() {
                    span { class: "metric-card__unit", "{unit}" }
                }
            }

            {match gauge {
                CardGauge::Progress(_) => {
                    let label = format_percent(shown_progress);
                    rsx! {
                        div { class: "metric-card__gauge",
                            div { class: "metric-card__gauge-row",
                                span { class: "metric-card__gauge-label", {t!("card-progress")} }
                                span { "{label}" }
                            }
                            ProgressBar { value: shown_progress }
                        }
                    }
                }
                CardGauge::Usage { max } => {
                    let usage = ratio_percent(value, max);
                    let label = format_percent(usage);
                    rsx! {
                        div { class: "metric-card__gauge",
                            div { class: "metric-card__gauge-row",
                                span { class: "metric-card__gauge-label", {t!("card-usage")} }
                                span { "{label}" }
                            }
                            ProgressBar { value: usage }
                        }
                    }
                }
                CardGauge::None => rsx! {},
            }}
        }
    }
}

/// Thin horizontal bar filled to `value` percent (clamped to 0..=100).
#[component]
pub fn ProgressBar(value: f64) -> Element {
    let width = if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let style = format!("width: {width:.2}%;");
    let now = format!("{width:.0}");

    rsx! {
        div {
            class: "progress",
            role: "progressbar",
            aria_valuemin: "0",
            aria_valuemax: "100",
            aria_valuenow: "{now}",
            div { class: "progress__fill", style: "{style}" }
        }
    }
}
