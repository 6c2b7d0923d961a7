//! Animation hooks shared by the dashboard components.
//!
//! Both hooks spawn into the calling component's scope and cancel their task when
//! the component is dropped, so a torn-down card never writes to a dead signal.

use dioxus::prelude::*;

use crate::core::animation::CountUp;
use crate::core::timing;
use crate::i18n;

/// Visibility flag that flips to `true` once `delay_ms` has elapsed.
///
/// A zero delay starts visible and schedules nothing.
pub fn use_reveal(delay_ms: u64) -> Signal<bool> {
    let mut visible = use_signal(|| delay_ms == 0);

    let timer = use_hook(move || {
        if delay_ms == 0 {
            return None;
        }
        Some(spawn(async move {
            timing::sleep_ms(delay_ms).await;
            visible.set(true);
        }))
    });

    use_drop(move || {
        if let Some(task) = timer {
            task.cancel();
        }
    });

    visible
}

/// Displayed value counting from 0 to `target` over `duration_ms`, starting when
/// `visible` turns true. A new target restarts the count.
pub fn use_count_up(target: f64, visible: Signal<bool>, duration_ms: f64) -> Signal<f64> {
    let mut shown = use_signal(|| 0.0);
    let mut running: Signal<Option<Task>> = use_signal(|| None);

    use_effect(use_reactive((&target,), move |(target,)| {
        if let Some(task) = running.write().take() {
            task.cancel();
        }

        if !visible() {
            shown.set(0.0);
            return;
        }

        let task = spawn(async move {
            let animation = CountUp::from_zero(timing::now_ms(), target, duration_ms);
            loop {
                let now = timing::next_frame().await;
                shown.set(animation.sample(now));
                if animation.is_finished(now) {
                    break;
                }
            }
        });
        running.set(Some(task));
    }));

    use_drop(move || {
        // The slot may already be gone if the scope's signals dropped first.
        if let Ok(mut slot) = running.try_write() {
            if let Some(task) = slot.take() {
                task.cancel();
            }
        }
    });

    shown
}

/// Active language tag. Reading it subscribes the caller to the launcher's
/// language `Signal<String>` when one is in context.
pub fn use_language() -> String {
    match try_use_context::<Signal<String>>() {
        Some(lang) => lang(),
        None => i18n::current_language(),
    }
}
