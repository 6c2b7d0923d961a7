use dioxus::prelude::*;

use ui::core::settings::DashboardSettings;
use ui::core::source::SnapshotProvider;
use ui::i18n;
use ui::LocalizedDashboard;

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    i18n::init();

    // Written by the header's locale switcher; `LocalizedDashboard` remounts the
    // page when it changes so every `t!` lookup re-runs.
    let lang_code = use_signal(i18n::current_language);
    use_context_provider(|| lang_code);
    use_context_provider(DashboardSettings::default);

    let source = use_hook(SnapshotProvider::embedded);

    rsx! {
        document::Title { "Perfboard" }
        document::Style { "{MAIN_CSS_INLINE}" }

        LocalizedDashboard { source: source.clone() }
    }
}
