#![cfg(test)]
/*!
Theme selector lint for the desktop build.

The dashboard components in `ui` emit BEM-style class names; the shared theme at
`ui/assets/theme/main.css` must keep a rule for each of them. A substring check
is enough to catch a renamed or dropped selector before it ships.

When a component changes its markup, adjust REQUIRED_SELECTORS in the same commit.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".visually-hidden",
    ".dashboard-shell {",
    ".dashboard-shell__inner",
    ".dashboard-grid__main",
    ".dashboard-grid__side",
    // Page states
    ".loading__spinner",
    ".loading__label",
    ".load-error",
    "@keyframes spin",
    // Header
    ".dashboard-header {",
    ".dashboard-header__badge",
    ".dashboard-header__title",
    ".dashboard-header__captured",
    ".dashboard-header__locale",
    ".pill {",
    ".pill--capitalize",
    // Tabs
    ".tab-list {",
    ".tab-list__tab",
    ".tab-list__tab--active",
    ".metrics__panel",
    // Cards
    ".card-grid",
    ".metric-card {",
    ".metric-card__value",
    ".metric-card__unit",
    ".metric-card__gauge-row",
    ".progress {",
    ".progress__fill",
    // Charts
    ".chart-grid--pair",
    ".metric-chart {",
    ".metric-chart__title",
    ".metric-chart__grid",
    ".metric-chart__tick",
    ".metric-chart__category",
    ".metric-chart__dot--active",
    ".metric-chart__tooltip",
    ".metric-chart__placeholder",
    // System panel
    ".system-panel {",
    ".system-panel__row--minor",
    ".system-panel__value--capitalize",
    ".data-checks--warn",
    ".dashboard-locale",
    // Responsive block
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|sel| !THEME_CSS.contains(sel))
        .collect();

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({non_ws_len} non-whitespace chars); \
         did the file get truncated or path change?"
    );
}

#[test]
fn reveal_states_come_in_pairs() {
    // Every component that fades in toggles a --hidden / --visible pair.
    for block in ["dashboard-header", "metric-card", "metric-chart", "system-panel"] {
        let hidden = format!(".{block}--hidden");
        let visible = format!(".{block}--visible");
        assert!(
            THEME_CSS.contains(&hidden) && THEME_CSS.contains(&visible),
            "reveal classes missing for {block}"
        );
    }
}
