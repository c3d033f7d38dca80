//! Platform glue shared by the web and desktop shells.

use std::future::Future;

/// Drive a UI-originated future to completion. Web hands it to the
/// microtask queue; native runs it inline, which is acceptable for the
/// short-lived export futures this app spawns.
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(target_arch = "wasm32")]
    wasm_bindgen_futures::spawn_local(future);

    #[cfg(not(target_arch = "wasm32"))]
    futures::executor::block_on(future);
}

/// Short platform tag recorded in export envelopes.
pub fn platform_string() -> &'static str {
    #[cfg(target_arch = "wasm32")]
    {
        "web"
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        "desktop"
    }
}
