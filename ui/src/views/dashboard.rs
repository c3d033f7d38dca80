use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures_util::StreamExt;

use crate::charts::bars::{BarFigure, BarsPanel, BarsRenderer};
use crate::charts::heatmap::{HeatmapFigure, HeatmapPanel, HeatmapRenderer};
use crate::charts::scatter::{ScatterFigure, ScatterPanel, ScatterRenderer};
use crate::charts::trend::{TrendFigure, TrendOverlay, TrendPanel, TrendRenderer};
use crate::components::survey_provider::SurveyStore;
use crate::core::brush::{BrushChannel, BrushDimension, BrushEvent, Highlight};
use crate::core::coordinator::ViewCoordinator;
use crate::core::dataset::Metric;
use crate::core::filters::{FilterEvent, FilterState, GenderFilter, YearFilter};
use crate::export::ExportPanel;

#[component]
pub fn Dashboard() -> Element {
    let store = use_context::<SurveyStore>();
    let loaded = store.loaded;
    let error = store.error;

    let filters = use_signal(FilterState::default);
    let highlight = use_signal(|| Option::<Highlight>::None);

    let heatmap_figure = use_signal(|| Option::<HeatmapFigure>::None);
    let bars_figure = use_signal(|| Option::<BarFigure>::None);
    let trend_figure = use_signal(|| Option::<TrendFigure>::None);
    let trend_overlay = use_signal(|| Option::<TrendOverlay>::None);
    let scatter_figure = use_signal(|| Option::<ScatterFigure>::None);

    // Panels pick the channel up from context to publish their hovers.
    let channel = use_context_provider(BrushChannel::default);

    let coordinator: Rc<RefCell<ViewCoordinator>> = use_hook(|| {
        let mut coordinator = ViewCoordinator::new();
        coordinator.register(Rc::new(RefCell::new(HeatmapRenderer::new(heatmap_figure))));
        coordinator.register(Rc::new(RefCell::new(BarsRenderer::new(bars_figure))));
        coordinator.register(Rc::new(RefCell::new(TrendRenderer::new(
            trend_figure,
            trend_overlay,
        ))));
        coordinator.register(Rc::new(RefCell::new(ScatterRenderer::new(scatter_figure))));
        Rc::new(RefCell::new(coordinator))
    });

    // One subscription keeps the emphasis signal and the renderers in step
    // with every brush event, whichever panel emitted it.
    use_hook(|| {
        let coordinator = coordinator.clone();
        channel.subscribe(move |event: &BrushEvent| {
            // Subscribers are plain `Fn`; mutate through a local copy.
            let mut highlight_signal = highlight;
            match event {
                BrushEvent::Highlight(brushed) => highlight_signal.set(Some(brushed.clone())),
                BrushEvent::Clear => highlight_signal.set(None),
            }
            coordinator.borrow().notify_brush(event);
        });
    });

    let coroutine = {
        let coordinator_ref = coordinator.clone();
        let filters_ref = filters;
        let highlight_ref = highlight;
        let loaded_ref = loaded;

        use_coroutine(move |mut rx: UnboundedReceiver<FilterEvent>| {
            let coordinator = coordinator_ref.clone();
            let mut filters_signal = filters_ref;
            let highlight_signal = highlight_ref;
            let loaded_signal = loaded_ref;

            async move {
                while let Some(event) = rx.next().await {
                    // Drain the whole burst before recomputing, so a run of
                    // quick selector changes costs one cycle.
                    let mut next = filters_signal.peek().clone();
                    next.apply(event);
                    while let Ok(pending) = rx.try_recv() {
                        next.apply(pending);
                    }
                    filters_signal.set(next.clone());

                    let data = loaded_signal.peek().clone();
                    if let Some(data) = data {
                        let current = highlight_signal.peek().clone();
                        coordinator
                            .borrow()
                            .on_filter_changed(&data.dataset, &next, current);
                    }
                }
            }
        })
    };

    let send_event = move |event: FilterEvent| coroutine.send(event);

    // A new dataset (initial load or demo swap) resets the selection and
    // runs the first cycle on defaults.
    {
        let coordinator = coordinator.clone();
        let channel = channel.clone();
        let mut filters_signal = filters;
        use_effect(move || {
            if let Some(data) = loaded.read().as_ref() {
                filters_signal.set(FilterState::default());
                channel.clear();
                coordinator.borrow().on_data_ready(&data.dataset);
            }
        });
    }

    let current = filters();
    let selected_year = match current.year {
        YearFilter::Only(year) => Some(year),
        YearFilter::All => None,
    };
    let focus_caption = highlight().map(|brushed| match brushed.dimension {
        BrushDimension::AgeGroup => format!("Focus: ages {}", brushed.value),
        BrushDimension::Year => format!("Focus: {}", brushed.value),
    });

    rsx! {
        section { class: "page page-dashboard",
            h1 { "Dashboard" }
            p {
                "Filter the survey by gender, year, and metric pair; every panel below answers to the same selection."
            }

            if let Some(message) = error() {
                div { class: "dashboard-error",
                    h2 { "Survey data unavailable" }
                    p { class: "dashboard-error__message", "{message}" }
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        onclick: move |_| store.swap_in_demo(),
                        "Load demo data"
                    }
                }
            } else if let Some(data) = loaded() {
                div { class: "dashboard-controls",
                    label { class: "dashboard-controls__field",
                        span { "Gender" }
                        select {
                            value: "{current.gender.value()}",
                            onchange: {
                                let send = send_event.clone();
                                move |evt: FormEvent| {
                                    send(FilterEvent::SetGender(GenderFilter::from_value(&evt.value())));
                                }
                            },
                            option { value: "All", "All genders" }
                            for gender in data.dataset.genders() {
                                option { value: "{gender}", "{gender}" }
                            }
                        }
                    }

                    label { class: "dashboard-controls__field",
                        span { "Year" }
                        select {
                            value: "{current.year.value()}",
                            onchange: {
                                let send = send_event.clone();
                                move |evt: FormEvent| {
                                    send(FilterEvent::SetYear(YearFilter::from_value(&evt.value())));
                                }
                            },
                            option { value: "All", "All years" }
                            for year in data.dataset.years() {
                                option { value: "{year}", "{year}" }
                            }
                        }
                    }

                    label { class: "dashboard-controls__field",
                        span { "First metric" }
                        select {
                            value: "{current.metrics.first.key()}",
                            onchange: {
                                let send = send_event.clone();
                                let second = current.metrics.second.key().to_string();
                                move |evt: FormEvent| {
                                    send(FilterEvent::SetMetricKeys {
                                        first: evt.value(),
                                        second: second.clone(),
                                    });
                                }
                            },
                            for metric in Metric::ALL {
                                option { value: "{metric.key()}", "{metric.label()}" }
                            }
                        }
                    }

                    label { class: "dashboard-controls__field",
                        span { "Second metric" }
                        select {
                            value: "{current.metrics.second.key()}",
                            onchange: {
                                let send = send_event.clone();
                                let first = current.metrics.first.key().to_string();
                                move |evt: FormEvent| {
                                    send(FilterEvent::SetMetricKeys {
                                        first: first.clone(),
                                        second: evt.value(),
                                    });
                                }
                            },
                            for metric in Metric::ALL {
                                option { value: "{metric.key()}", "{metric.label()}" }
                            }
                        }
                    }
                }

                p { class: "dashboard-status",
                    span { class: "dashboard-status__origin",
                        "{data.dataset.len()} rows · {data.origin}"
                    }
                    if data.dataset.skipped_rows() > 0 {
                        span { class: "dashboard-status__skipped",
                            " · {data.dataset.skipped_rows()} rows skipped"
                        }
                    }
                    if let Some(caption) = focus_caption {
                        span { class: "dashboard-status__focus", " · {caption}" }
                    }
                }

                div { class: "dashboard-grid",
                    TrendPanel {
                        figure: trend_figure,
                        overlay: trend_overlay,
                        highlight,
                        selected_year,
                        on_pick_year: {
                            let send = send_event.clone();
                            move |year: Option<i32>| {
                                let filter = match year {
                                    Some(year) => YearFilter::Only(year),
                                    None => YearFilter::All,
                                };
                                send(FilterEvent::SetYear(filter));
                            }
                        },
                    }
                    BarsPanel { figure: bars_figure, highlight }
                    HeatmapPanel { figure: heatmap_figure, highlight }
                    ScatterPanel { figure: scatter_figure, highlight }
                }

                ExportPanel {
                    records: data.dataset.records().to_vec(),
                    filters: current.clone(),
                    origin: data.origin.clone(),
                }
            } else {
                p { class: "chart-card__placeholder", "Loading survey…" }
            }
        }
    }
}
