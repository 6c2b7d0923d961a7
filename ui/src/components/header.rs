use dioxus::prelude::*;

use crate::core::format::format_capture_time;
use crate::core::settings::use_settings;
use crate::hooks::use_reveal;
use crate::i18n;
use crate::t;

/// Page title, capture time and platform pills, plus the locale switcher.
///
/// Launchers may provide a `Signal<String>` language code through context; the
/// switcher writes the selected tag back into it so the platform can remount the
/// tree in the new language.
#[component]
pub fn DashboardHeader(
    #[props(into)] timestamp: String,
    #[props(into)] platform: String,
    #[props(into)] arch: String,
) -> Element {
    let settings = use_settings();
    let visible = use_reveal(settings.header_reveal_ms);

    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let mut current_lang = use_signal(|| {
        lang_code_ctx
            .map(|code| code.peek().clone())
            .unwrap_or_else(i18n::current_language)
    });
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;

    let on_change = move |evt: FormEvent| {
        let val = evt.value();
        match i18n::set_language(&val) {
            Ok(()) => {
                current_lang.set(val.clone());
                if let Some(mut code) = lang_code_ctx {
                    code.set(val);
                }
            }
            Err(err) => tracing::warn!(%err, tag = %val, "language switch failed"),
        }
    };

    // Unparseable timestamps are shown verbatim.
    let captured = format_capture_time(&timestamp).unwrap_or_else(|| timestamp.clone());

    let state_class = if visible() {
        "dashboard-header--visible"
    } else {
        "dashboard-header--hidden"
    };

    rsx! {
        header { class: "dashboard-header {state_class}",
            div { class: "dashboard-header__intro",
                span { class: "dashboard-header__badge",
                    span { class: "dashboard-header__badge-icon", aria_hidden: "true", "◎" }
                    span { {t!("header-badge")} }
                }
                h1 { class: "dashboard-header__title", {t!("app-title")} }
                p { class: "dashboard-header__captured",
                    span { aria_hidden: "true", "▤" }
                    span { "{captured}" }
                }
            }

            div { class: "dashboard-header__meta",
                span { class: "pill pill--capitalize",
                    span { class: "pill__icon", aria_hidden: "true", "◈" }
                    "{platform}"
                }
                span { class: "pill",
                    span { class: "pill__icon", aria_hidden: "true", "▥" }
                    "{arch}"
                }

                if show_switcher {
                    div { class: "dashboard-header__locale",
                        label {
                            class: "visually-hidden",
                            r#for: "locale-select",
                            {t!("nav-language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{current_lang()}",
                            oninput: on_change,
                            for code in langs() {
                                option { key: "{code}", value: "{code}", "{code}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
