//! Cross-chart highlight channel.
//!
//! Hovering a mark in one chart emphasizes the matching slice in the others.
//! That link is deliberately separate from the filter state: highlights are
//! ephemeral, change no aggregates, and vanish on mouse-out. The channel is
//! a small single-threaded broadcast: subscribers register callbacks, and
//! the latest highlight is retained so late subscribers can catch up.

use std::cell::RefCell;
use std::rc::Rc;

/// Which slice of the data a highlight refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushDimension {
    AgeGroup,
    Year,
}

/// One active emphasis, e.g. age bucket "15-19" or year "2022".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub dimension: BrushDimension,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrushEvent {
    Highlight(Highlight),
    Clear,
}

type Subscriber = Rc<dyn Fn(&BrushEvent)>;

#[derive(Default)]
struct ChannelState {
    subscribers: Vec<Subscriber>,
    current: Option<Highlight>,
}

/// Shared handle to the highlight bus. Cloning shares the same channel.
#[derive(Clone, Default)]
pub struct BrushChannel {
    state: Rc<RefCell<ChannelState>>,
}

impl BrushChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber: impl Fn(&BrushEvent) + 'static) {
        self.state.borrow_mut().subscribers.push(Rc::new(subscriber));
    }

    /// Activate a highlight, replacing any previous one, and notify every
    /// subscriber exactly once.
    pub fn highlight(&self, dimension: BrushDimension, value: impl Into<String>) {
        let highlight = Highlight {
            dimension,
            value: value.into(),
        };
        self.state.borrow_mut().current = Some(highlight.clone());
        self.broadcast(BrushEvent::Highlight(highlight));
    }

    /// Drop the active highlight. Clearing an idle channel is a no-op and
    /// delivers nothing.
    pub fn clear(&self) {
        let was_active = self.state.borrow_mut().current.take().is_some();
        if was_active {
            self.broadcast(BrushEvent::Clear);
        }
    }

    pub fn current(&self) -> Option<Highlight> {
        self.state.borrow().current.clone()
    }

    fn broadcast(&self, event: BrushEvent) {
        // Deliver over a snapshot so a callback may inspect the channel or
        // publish again without hitting the RefCell twice.
        let subscribers: Vec<Subscriber> = self.state.borrow().subscribers.clone();
        for subscriber in &subscribers {
            subscriber(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_channel() -> (BrushChannel, Rc<RefCell<Vec<BrushEvent>>>) {
        let channel = BrushChannel::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        channel.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        (channel, seen)
    }

    #[test]
    fn every_subscriber_sees_each_event_once() {
        let channel = BrushChannel::new();
        let first = Rc::new(RefCell::new(0usize));
        let second = Rc::new(RefCell::new(0usize));

        let counter = first.clone();
        channel.subscribe(move |_| *counter.borrow_mut() += 1);
        let counter = second.clone();
        channel.subscribe(move |_| *counter.borrow_mut() += 1);

        channel.highlight(BrushDimension::AgeGroup, "15-19");
        assert_eq!(*first.borrow(), 1);
        assert_eq!(*second.borrow(), 1);
    }

    #[test]
    fn a_new_highlight_overwrites_the_previous_one() {
        let (channel, seen) = recording_channel();

        channel.highlight(BrushDimension::AgeGroup, "15-19");
        channel.highlight(BrushDimension::AgeGroup, "40-49");

        assert_eq!(
            channel.current(),
            Some(Highlight {
                dimension: BrushDimension::AgeGroup,
                value: "40-49".to_string(),
            })
        );
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn clear_returns_to_idle_and_notifies() {
        let (channel, seen) = recording_channel();

        channel.highlight(BrushDimension::Year, "2022");
        channel.clear();

        assert_eq!(channel.current(), None);
        assert_eq!(seen.borrow().last(), Some(&BrushEvent::Clear));
    }

    #[test]
    fn clearing_an_idle_channel_delivers_nothing() {
        let (channel, seen) = recording_channel();
        channel.clear();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn late_subscribers_can_read_the_active_highlight() {
        let channel = BrushChannel::new();
        channel.highlight(BrushDimension::AgeGroup, "80+");

        let observed = Rc::new(RefCell::new(None));
        let slot = observed.clone();
        let reader = channel.clone();
        channel.subscribe(move |_| *slot.borrow_mut() = reader.current());

        assert_eq!(channel.current().map(|h| h.value), Some("80+".to_string()));

        // Subscriber callbacks may query the channel mid-broadcast.
        channel.highlight(BrushDimension::AgeGroup, "10-14");
        assert_eq!(
            observed.borrow().as_ref().map(|h| h.value.clone()),
            Some("10-14".to_string())
        );
    }
}
