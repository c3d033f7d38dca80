//! Render-cycle orchestration across the chart set.
//!
//! The coordinator is the only place that walks the renderer list. A cycle
//! computes the gender-filtered base rows once, snapshots the filters, and
//! hands both to every registered renderer. One renderer failing is logged
//! and skipped; the rest of the cycle proceeds, and the next cycle retries
//! everyone.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use super::aggregate;
use super::brush::{BrushEvent, Highlight};
use super::dataset::{Dataset, Record};
use super::filters::FilterState;

/// A renderer that cannot produce output for a cycle says why. The
/// coordinator logs the message and moves on.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct RenderError(pub String);

/// Everything a renderer may consult during one cycle. All renderers in a
/// cycle receive the same snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    pub filters: FilterState,
    pub highlight: Option<Highlight>,
}

pub trait ChartRenderer {
    fn name(&self) -> &'static str;

    /// Recompute this chart's output from the gender-filtered base rows.
    /// Further narrowing (year, metric choice) is the renderer's own job.
    fn render(&mut self, records: &[Record], params: &RenderParams) -> Result<(), RenderError>;

    /// React to a highlight change without a full render cycle.
    fn on_brush(&mut self, _event: &BrushEvent) {}
}

pub type SharedRenderer = Rc<RefCell<dyn ChartRenderer>>;

#[derive(Default)]
pub struct ViewCoordinator {
    renderers: Vec<SharedRenderer>,
}

impl ViewCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer for subsequent cycles. A name already present is
    /// left alone, so wiring code may register unconditionally.
    pub fn register(&mut self, renderer: SharedRenderer) {
        let name = renderer.borrow().name();
        if self
            .renderers
            .iter()
            .any(|existing| existing.borrow().name() == name)
        {
            return;
        }
        self.renderers.push(renderer);
    }

    pub fn renderer_count(&self) -> usize {
        self.renderers.len()
    }

    /// First cycle after the dataset arrives, on default filters.
    pub fn on_data_ready(&self, dataset: &Dataset) -> usize {
        self.run_cycle(dataset, &FilterState::default(), None)
    }

    /// Full cycle against the given filter snapshot.
    pub fn on_filter_changed(
        &self,
        dataset: &Dataset,
        filters: &FilterState,
        highlight: Option<Highlight>,
    ) -> usize {
        self.run_cycle(dataset, filters, highlight)
    }

    /// Fan a brush event out to the renderers. No aggregation reruns here;
    /// highlights only restyle what the last cycle produced.
    pub fn notify_brush(&self, event: &BrushEvent) {
        for renderer in &self.renderers {
            renderer.borrow_mut().on_brush(event);
        }
    }

    fn run_cycle(
        &self,
        dataset: &Dataset,
        filters: &FilterState,
        highlight: Option<Highlight>,
    ) -> usize {
        let base = aggregate::filter_by_gender(dataset.records(), &filters.gender);
        let params = RenderParams {
            filters: filters.clone(),
            highlight,
        };

        let mut succeeded = 0usize;
        for renderer in &self.renderers {
            let mut renderer = renderer.borrow_mut();
            match renderer.render(&base, &params) {
                Ok(()) => succeeded += 1,
                Err(err) => {
                    eprintln!("[dashboard] renderer '{}' failed: {err}", renderer.name());
                }
            }
        }

        #[cfg(debug_assertions)]
        println!(
            "[dashboard] cycle done: {succeeded}/{} renderers, {} base rows",
            self.renderers.len(),
            base.len()
        );

        succeeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::brush::BrushDimension;
    use crate::core::filters::GenderFilter;

    struct Recording {
        name: &'static str,
        fail: bool,
        cycles: Rc<RefCell<Vec<(Vec<Record>, RenderParams)>>>,
        brushes: Rc<RefCell<Vec<BrushEvent>>>,
    }

    impl Recording {
        fn shared(
            name: &'static str,
            fail: bool,
        ) -> (
            SharedRenderer,
            Rc<RefCell<Vec<(Vec<Record>, RenderParams)>>>,
            Rc<RefCell<Vec<BrushEvent>>>,
        ) {
            let cycles = Rc::new(RefCell::new(Vec::new()));
            let brushes = Rc::new(RefCell::new(Vec::new()));
            let renderer = Rc::new(RefCell::new(Recording {
                name,
                fail,
                cycles: cycles.clone(),
                brushes: brushes.clone(),
            }));
            (renderer, cycles, brushes)
        }
    }

    impl ChartRenderer for Recording {
        fn name(&self) -> &'static str {
            self.name
        }

        fn render(&mut self, records: &[Record], params: &RenderParams) -> Result<(), RenderError> {
            if self.fail {
                return Err(RenderError("boom".to_string()));
            }
            self.cycles
                .borrow_mut()
                .push((records.to_vec(), params.clone()));
            Ok(())
        }

        fn on_brush(&mut self, event: &BrushEvent) {
            self.brushes.borrow_mut().push(event.clone());
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_csv(
            "Year,Age_Group,Gender,Smoking_Prevalence,Drug_Experimentation,Peer_Influence\n\
             2022,15-19,Male,10.0,5.0,40.0\n\
             2022,15-19,Female,12.0,6.0,42.0\n\
             2023,40-49,Female,8.0,3.0,30.0\n",
        )
        .unwrap()
    }

    #[test]
    fn a_failing_renderer_does_not_stop_the_cycle() {
        let mut coordinator = ViewCoordinator::new();
        let (good_a, cycles_a, _) = Recording::shared("bars", false);
        let (bad, cycles_bad, _) = Recording::shared("heatmap", true);
        let (good_b, cycles_b, _) = Recording::shared("trend", false);
        coordinator.register(good_a);
        coordinator.register(bad);
        coordinator.register(good_b);

        let dataset = dataset();
        let succeeded = coordinator.on_data_ready(&dataset);

        assert_eq!(succeeded, 2);
        assert_eq!(cycles_a.borrow().len(), 1);
        assert_eq!(cycles_b.borrow().len(), 1);
        assert!(cycles_bad.borrow().is_empty());

        // The failure is not sticky for the next cycle.
        let succeeded = coordinator.on_filter_changed(&dataset, &FilterState::default(), None);
        assert_eq!(succeeded, 2);
        assert_eq!(cycles_a.borrow().len(), 2);
    }

    #[test]
    fn every_renderer_sees_the_same_snapshot() {
        let mut coordinator = ViewCoordinator::new();
        let (first, cycles_first, _) = Recording::shared("bars", false);
        let (second, cycles_second, _) = Recording::shared("scatter", false);
        coordinator.register(first);
        coordinator.register(second);

        let dataset = dataset();
        let filters = FilterState {
            gender: GenderFilter::Only("Female".to_string()),
            ..FilterState::default()
        };
        coordinator.on_filter_changed(&dataset, &filters, None);

        let first_cycle = cycles_first.borrow();
        let second_cycle = cycles_second.borrow();
        assert_eq!(first_cycle[0].1, second_cycle[0].1);
        assert_eq!(first_cycle[0].0, second_cycle[0].0);
        assert!(first_cycle[0]
            .0
            .iter()
            .all(|record| record.gender == "Female"));
    }

    #[test]
    fn registration_is_idempotent_per_name() {
        let mut coordinator = ViewCoordinator::new();
        let (first, _, _) = Recording::shared("bars", false);
        let (duplicate, _, _) = Recording::shared("bars", false);
        coordinator.register(first);
        coordinator.register(duplicate);
        assert_eq!(coordinator.renderer_count(), 1);
    }

    #[test]
    fn data_ready_runs_on_default_filters() {
        let mut coordinator = ViewCoordinator::new();
        let (renderer, cycles, _) = Recording::shared("bars", false);
        coordinator.register(renderer);

        coordinator.on_data_ready(&dataset());

        let cycles = cycles.borrow();
        assert_eq!(cycles[0].1.filters, FilterState::default());
        assert_eq!(cycles[0].1.highlight, None);
        assert_eq!(cycles[0].0.len(), 3);
    }

    #[test]
    fn brush_events_fan_out_without_a_cycle() {
        let mut coordinator = ViewCoordinator::new();
        let (renderer, cycles, brushes) = Recording::shared("trend", false);
        coordinator.register(renderer);

        coordinator.notify_brush(&BrushEvent::Highlight(Highlight {
            dimension: BrushDimension::AgeGroup,
            value: "15-19".to_string(),
        }));

        assert_eq!(brushes.borrow().len(), 1);
        assert!(cycles.borrow().is_empty());
    }
}
