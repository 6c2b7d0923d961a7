use dioxus::prelude::*;

use crate::components::metric_card::ProgressBar;
use crate::core::format::{format_bytes, format_number};
use crate::core::settings::use_settings;
use crate::core::transform::StartupFigures;
use crate::hooks::use_reveal;
use crate::t;

/// "System Information" side panel built from the startup section.
#[component]
pub fn PlatformInfo(
    #[props(into)] platform: String,
    #[props(into)] arch: String,
    startup: StartupFigures,
) -> Element {
    let settings = use_settings();
    let visible = use_reveal(settings.system_panel_reveal_ms);

    let cpu = format!("{}%", format_number(startup.cpu_percent));
    let wakeups = t!("system-per-second", count = startup.idle_wakeups.to_string());
    let heap_used = format_bytes(startup.heap_used, 2);
    let heap_total = format_bytes(startup.heap_total, 2);

    let state_class = if visible() {
        "system-panel--visible"
    } else {
        "system-panel--hidden"
    };

    rsx! {
        aside { class: "system-panel {state_class}",
            h3 { class: "system-panel__title", {t!("system-title")} }
            hr { class: "system-panel__rule" }

            div { class: "system-panel__group",
                span { class: "system-panel__icon", aria_hidden: "true", "▣" }
                div { class: "system-panel__body",
                    div { class: "system-panel__row",
                        span { class: "system-panel__label", {t!("system-platform")} }
                        span { class: "system-panel__value system-panel__value--capitalize", "{platform}" }
                    }
                    div { class: "system-panel__row",
                        span { class: "system-panel__label", {t!("system-arch")} }
                        span { class: "system-panel__value", "{arch}" }
                    }
                }
            }

            hr { class: "system-panel__rule" }

            div { class: "system-panel__group",
                span { class: "system-panel__icon", aria_hidden: "true", "◈" }
                div { class: "system-panel__body",
                    div { class: "system-panel__row",
                        span { class: "system-panel__label", {t!("system-cpu")} }
                        span { class: "system-panel__value", "{cpu}" }
                    }
                    ProgressBar { value: startup.cpu_percent }
                    div { class: "system-panel__row system-panel__row--minor",
                        span { class: "system-panel__label", {t!("system-idle-wakeups")} }
                        span { class: "system-panel__value", "{wakeups}" }
                    }
                }
            }

            hr { class: "system-panel__rule" }

            div { class: "system-panel__group",
                span { class: "system-panel__icon", aria_hidden: "true", "◔" }
                div { class: "system-panel__body",
                    div { class: "system-panel__row",
                        span { class: "system-panel__label", {t!("system-memory")} }
                        span { class: "system-panel__value", "{heap_used}" }
                    }
                    ProgressBar { value: startup.heap_percent() }
                    div { class: "system-panel__row system-panel__row--minor",
                        span { class: "system-panel__label", {t!("system-total-available")} }
                        span { class: "system-panel__value", "{heap_total}" }
                    }
                }
            }
        }
    }
}
