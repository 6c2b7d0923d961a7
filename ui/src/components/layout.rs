use dioxus::prelude::*;

/// Page shell; fades its content in once mounted.
#[component]
pub fn DashboardLayout(children: Element) -> Element {
    let mut loaded = use_signal(|| false);

    use_effect(move || {
        loaded.set(true);
    });

    let state_class = if loaded() {
        "dashboard-shell--loaded"
    } else {
        "dashboard-shell--loading"
    };

    rsx! {
        div { class: "dashboard-shell {state_class}",
            div { class: "dashboard-shell__inner", {children} }
        }
    }
}
