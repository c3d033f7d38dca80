use dioxus::prelude::*;

use crate::core::sample;
use crate::core::source::{self, LoadedData};

/// Shared handle to the loaded survey. Provided once near the router root so
/// the dashboard and the data view read and swap the same dataset.
#[derive(Clone, Copy)]
pub struct SurveyStore {
    pub loaded: Signal<Option<LoadedData>>,
    pub error: Signal<Option<String>>,
}

impl SurveyStore {
    /// Replace whatever is loaded with a freshly generated demo survey.
    /// Also clears a load error, so the dashboard recovers from a failed
    /// fetch without a reload.
    pub fn swap_in_demo(&self) {
        let seed: u64 = rand::random();
        let dataset = sample::demo_dataset(seed);
        #[cfg(debug_assertions)]
        println!("[data] demo dataset seeded with {seed}");

        let mut error = self.error;
        error.set(None);
        let mut loaded = self.loaded;
        loaded.set(Some(LoadedData {
            dataset,
            origin: format!("demo (seed {seed})"),
        }));
    }
}

/// Mounts the store into context and kicks off the one-time survey load.
#[component]
pub fn SurveyProvider(children: Element) -> Element {
    let store = use_context_provider(|| SurveyStore {
        loaded: Signal::new(None),
        error: Signal::new(None),
    });

    use_future(move || async move {
        match source::load().await {
            Ok(data) => {
                #[cfg(debug_assertions)]
                println!(
                    "[data] {} rows ready from {} ({} skipped)",
                    data.dataset.len(),
                    data.origin,
                    data.dataset.skipped_rows()
                );
                let mut loaded = store.loaded;
                loaded.set(Some(data));
            }
            Err(err) => {
                eprintln!("[data] survey load failed: {err}");
                let mut error = store.error;
                error.set(Some(err.to_string()));
            }
        }
    });

    rsx! {
        {children}
    }
}
