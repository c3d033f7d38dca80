use dioxus::prelude::*;

use crate::components::survey_provider::SurveyStore;
use crate::core::format;

const PREVIEW_ROWS: usize = 12;

#[component]
pub fn Data() -> Element {
    let store = use_context::<SurveyStore>();
    let loaded = store.loaded;
    let error = store.error;

    rsx! {
        section { class: "page page-data",
            h1 { "Data" }
            p {
                "What the dashboard is currently working from. Swap in a generated demo "
                "survey at any time; the dashboard picks it up immediately."
            }

            div { class: "data-actions",
                button {
                    r#type: "button",
                    class: "button",
                    onclick: move |_| store.swap_in_demo(),
                    "Generate demo survey"
                }
            }

            if let Some(message) = error() {
                div { class: "dashboard-error",
                    h2 { "Survey data unavailable" }
                    p { class: "dashboard-error__message", "{message}" }
                }
            } else if let Some(data) = loaded() {
                dl { class: "data-facts",
                    div { class: "data-facts__item",
                        dt { "Source" }
                        dd { "{data.origin}" }
                    }
                    div { class: "data-facts__item",
                        dt { "Rows" }
                        dd { "{data.dataset.len()}" }
                    }
                    div { class: "data-facts__item",
                        dt { "Skipped rows" }
                        dd { "{data.dataset.skipped_rows()}" }
                    }
                    div { class: "data-facts__item",
                        dt { "Years" }
                        dd {
                            {
                                let years = data.dataset.years();
                                match (years.first(), years.last()) {
                                    (Some(first), Some(last)) if first != last => {
                                        format!("{first} – {last}")
                                    }
                                    (Some(first), _) => first.to_string(),
                                    _ => "none".to_string(),
                                }
                            }
                        }
                    }
                    div { class: "data-facts__item",
                        dt { "Genders" }
                        dd { {data.dataset.genders().join(", ")} }
                    }
                }

                h2 { "Preview" }
                table { class: "data-preview",
                    thead {
                        tr {
                            th { "Year" }
                            th { "Age group" }
                            th { "Gender" }
                            th { "Smoking %" }
                            th { "Drug exp. %" }
                            th { "Peer influence" }
                        }
                    }
                    tbody {
                        for record in data.dataset.records().iter().take(PREVIEW_ROWS) {
                            tr {
                                td { "{record.year}" }
                                td { "{record.age_group}" }
                                td { "{record.gender}" }
                                td { "{format::format_percent(record.smoking_prevalence)}" }
                                td { "{format::format_percent(record.drug_experimentation)}" }
                                td { "{format::format_number(record.peer_influence, 1)}" }
                            }
                        }
                    }
                }
                if data.dataset.len() > PREVIEW_ROWS {
                    p { class: "data-preview__note",
                        "Showing the first {PREVIEW_ROWS} of {data.dataset.len()} rows."
                    }
                }
            } else {
                p { class: "chart-card__placeholder", "Loading survey…" }
            }
        }
    }
}
