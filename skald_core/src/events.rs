// Copyright 2025 the Skald Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart event plumbing.
//!
//! Components communicate through a queue-based [`EventBus`] rather than by
//! holding references to each other. A renderer dispatches events (tooltip
//! requests, hover notifications) onto the bus; the host drains the queue
//! after each pointer delivery and routes every event to the components
//! subscribed to its kind. Routing is explicit and single-threaded, so
//! handlers can freely borrow the scene mutably while they run.

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::string::String;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::mark::MarkId;

/// The kinds of events that flow over the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer entered an axis tick label.
    AxisLabelMouseOver,
    /// Pointer moved within an axis tick label.
    AxisLabelMouseMove,
    /// Axis tick label was clicked.
    AxisLabelClick,
    /// Pointer left an axis tick label.
    AxisLabelMouseOut,
    /// Pointer entered a pie slice.
    PieSliceMouseOver,
    /// Pointer left a pie slice.
    PieSliceMouseOut,
    /// Pie slice was clicked.
    PieSliceClick,
    /// A component requests the tooltip be shown.
    ShowTooltip,
    /// A component requests the tooltip be hidden.
    HideTooltip,
    /// A legend item is being hovered.
    LegendItemHover,
    /// The pointer left a legend item.
    LegendItemMouseOut,
}

impl EventKind {
    /// Returns the kebab-case event name.
    pub fn name(self) -> &'static str {
        match self {
            Self::AxisLabelMouseOver => "axis-label-mouseover",
            Self::AxisLabelMouseMove => "axis-label-mousemove",
            Self::AxisLabelClick => "axis-label-click",
            Self::AxisLabelMouseOut => "axis-label-mouseout",
            Self::PieSliceMouseOver => "pie-slice-mouseover",
            Self::PieSliceMouseOut => "pie-slice-mouseout",
            Self::PieSliceClick => "pie-slice-click",
            Self::ShowTooltip => "show-tooltip",
            Self::HideTooltip => "hide-tooltip",
            Self::LegendItemHover => "legend-item-onhover",
            Self::LegendItemMouseOut => "legend-item-onmouseout",
        }
    }
}

/// Pointer gesture kinds delivered to components by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pointer {
    /// Pointer entered a mark.
    Over,
    /// Pointer moved within a mark.
    Move,
    /// Mark was clicked.
    Click,
    /// Pointer left a mark.
    Out,
}

/// An event on the bus.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartEvent {
    /// The event kind.
    pub kind: EventKind,
    /// The mark the event concerns, if any.
    pub mark: Option<MarkId>,
    /// A data key (a tick label, a slice label), if any.
    pub key: Option<String>,
    /// A data value, if any.
    pub value: Option<f64>,
}

impl ChartEvent {
    /// Creates an event with no payload.
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            mark: None,
            key: None,
            value: None,
        }
    }

    /// Attaches the originating mark.
    pub fn with_mark(mut self, mark: MarkId) -> Self {
        self.mark = Some(mark);
        self
    }

    /// Attaches a data key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Attaches a data value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

/// Identity of a subscribing component, assigned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ComponentId(pub u32);

/// A queue-based event bus with per-kind subscriptions.
#[derive(Clone, Debug, Default)]
pub struct EventBus {
    queue: VecDeque<ChartEvent>,
    subscribers: HashMap<EventKind, SmallVec<[ComponentId; 4]>>,
}

impl EventBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues an event for routing.
    pub fn dispatch(&mut self, event: ChartEvent) {
        self.queue.push_back(event);
    }

    /// Subscribes a component to an event kind. Duplicate subscriptions are
    /// ignored.
    pub fn subscribe(&mut self, kind: EventKind, component: ComponentId) {
        let subs = self.subscribers.entry(kind).or_default();
        if !subs.contains(&component) {
            subs.push(component);
        }
    }

    /// Removes all of a component's subscriptions.
    pub fn unsubscribe_all(&mut self, component: ComponentId) {
        for subs in self.subscribers.values_mut() {
            subs.retain(|c| *c != component);
        }
    }

    /// Returns whether a component is subscribed to a kind.
    pub fn is_subscribed(&self, kind: EventKind, component: ComponentId) -> bool {
        self.subscribers
            .get(&kind)
            .is_some_and(|subs| subs.contains(&component))
    }

    /// Returns the subscribers for a kind, in subscription order.
    pub fn subscribers(&self, kind: EventKind) -> &[ComponentId] {
        self.subscribers
            .get(&kind)
            .map(|s| s.as_slice())
            .unwrap_or(&[])
    }

    /// Pops the next queued event, if any.
    ///
    /// The host drains the queue in a loop and calls each subscriber's
    /// handler; handlers may dispatch further events, which are routed in
    /// the same drain.
    pub fn pop(&mut self) -> Option<ChartEvent> {
        self.queue.pop_front()
    }

    /// Number of queued, not-yet-routed events.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn queue_is_fifo() {
        let mut bus = EventBus::new();
        bus.dispatch(ChartEvent::new(EventKind::ShowTooltip).with_key("a"));
        bus.dispatch(ChartEvent::new(EventKind::HideTooltip));
        assert_eq!(bus.pending(), 2);
        assert_eq!(bus.pop().unwrap().kind, EventKind::ShowTooltip);
        assert_eq!(bus.pop().unwrap().kind, EventKind::HideTooltip);
        assert!(bus.pop().is_none());
    }

    #[test]
    fn subscriptions_dedupe_and_unsubscribe() {
        let mut bus = EventBus::new();
        let c = ComponentId(1);
        bus.subscribe(EventKind::LegendItemHover, c);
        bus.subscribe(EventKind::LegendItemHover, c);
        bus.subscribe(EventKind::LegendItemMouseOut, c);
        assert_eq!(bus.subscribers(EventKind::LegendItemHover).len(), 1);
        assert!(bus.is_subscribed(EventKind::LegendItemMouseOut, c));
        bus.unsubscribe_all(c);
        assert!(!bus.is_subscribed(EventKind::LegendItemHover, c));
        assert!(bus.subscribers(EventKind::LegendItemMouseOut).is_empty());
    }

    #[test]
    fn event_names_are_kebab_case() {
        assert_eq!(EventKind::PieSliceMouseOver.name(), "pie-slice-mouseover");
        assert_eq!(EventKind::LegendItemHover.name(), "legend-item-onhover");
    }
}
