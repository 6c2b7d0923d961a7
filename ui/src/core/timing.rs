//! Host clock and timer primitives used by the animation hooks.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(not(target_arch = "wasm32"))]
use once_cell::sync::Lazy;

/// Tick length where the host has no frame callback (~60 Hz).
pub const FALLBACK_FRAME_MS: u64 = 16;

#[cfg(not(target_arch = "wasm32"))]
static EPOCH: Lazy<Instant> = Lazy::new(Instant::now);

/// Monotonic milliseconds on the same clock frame timestamps use.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|perf| perf.now())
        .unwrap_or(0.0)
}

/// Monotonic milliseconds on the same clock frame timestamps use.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    EPOCH.elapsed().as_secs_f64() * 1000.0
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u64) {
    let ms = u32::try_from(ms).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Resolve on the next display frame with its timestamp.
#[cfg(target_arch = "wasm32")]
pub async fn next_frame() -> f64 {
    use wasm_bindgen::JsValue;

    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window()
            .map(|window| window.request_animation_frame(&resolve).is_ok())
            .unwrap_or(false);
        if !scheduled {
            // No frame loop (hidden document, worker); resolve right away.
            let _ = resolve.call0(&JsValue::NULL);
        }
    });

    match wasm_bindgen_futures::JsFuture::from(promise).await {
        Ok(stamp) => stamp.as_f64().unwrap_or_else(now_ms),
        Err(_) => now_ms(),
    }
}

/// Resolve on the next display frame with its timestamp.
#[cfg(not(target_arch = "wasm32"))]
pub async fn next_frame() -> f64 {
    sleep_ms(FALLBACK_FRAME_MS).await;
    now_ms()
}
