use dioxus::prelude::*;

/// Segmented tab strip. `active` holds the index of the selected label.
#[component]
pub fn TabList(labels: Vec<String>, active: Signal<usize>) -> Element {
    let mut active = active;
    let selected = active();

    rsx! {
        div { class: "tab-list", role: "tablist",
            for (idx, label) in labels.into_iter().enumerate() {
                button {
                    key: "{idx}",
                    r#type: "button",
                    role: "tab",
                    class: if idx == selected { "tab-list__tab tab-list__tab--active" } else { "tab-list__tab" },
                    aria_selected: if idx == selected { "true" } else { "false" },
                    onclick: move |_| active.set(idx),
                    "{label}"
                }
            }
        }
    }
}
