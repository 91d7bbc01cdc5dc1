//! Shared read-mostly session state with explicit observer semantics.
//!
//! The dashboard's ambient settings (active year range, active scenario,
//! normalization) are read by many independent views. Instead of implicit
//! module-level reactive variables, a `Session` is passed down by
//! reference: setters publish a `SessionEvent` to subscribers, consumers
//! re-derive what they display. Setters publish only on actual change, so
//! redundant writes stay silent.

use std::fmt;
use std::mem;

use crate::model::Settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    YearRangeChanged { start: i32, end: i32 },
    ScenarioChanged { id: Option<String> },
    NormalizationChanged { enabled: bool },
}

pub type SubscriberId = u64;

type Callback = Box<dyn FnMut(&SessionEvent)>;

pub struct Session {
    settings: Settings,
    year_range: (i32, i32),
    active_scenario: Option<String>,
    normalized: bool,
    subscribers: Vec<(SubscriberId, Callback)>,
    next_subscriber: SubscriberId,
}

impl Session {
    /// Starts at the settings' default range with no active scenario.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            year_range: settings.default_year_range(),
            active_scenario: None,
            normalized: false,
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn year_range(&self) -> (i32, i32) {
        self.year_range
    }

    pub fn active_scenario(&self) -> Option<&str> {
        self.active_scenario.as_deref()
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Sets the active range, normalized to `start <= end` and clamped to
    /// the selectable span.
    pub fn set_year_range(&mut self, start: i32, end: i32) {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let range = (self.settings.clamp_year(start), self.settings.clamp_year(end));
        if range != self.year_range {
            self.year_range = range;
            self.publish(SessionEvent::YearRangeChanged { start: range.0, end: range.1 });
        }
    }

    pub fn set_active_scenario(&mut self, id: Option<String>) {
        if id != self.active_scenario {
            self.active_scenario = id.clone();
            self.publish(SessionEvent::ScenarioChanged { id });
        }
    }

    pub fn set_normalized(&mut self, enabled: bool) {
        if enabled != self.normalized {
            self.normalized = enabled;
            self.publish(SessionEvent::NormalizationChanged { enabled });
        }
    }

    /// Registers an observer; the returned id undoes it.
    pub fn subscribe(&mut self, callback: impl FnMut(&SessionEvent) + 'static) -> SubscriberId {
        let id = self.next_subscriber;
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn publish(&mut self, event: SessionEvent) {
        // Callbacks run with the new state already committed. The list is
        // taken out for the duration so a callback cannot alias it.
        let mut subscribers = mem::take(&mut self.subscribers);
        for (_, callback) in subscribers.iter_mut() {
            callback(&event);
        }
        self.subscribers = subscribers;
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("settings", &self.settings)
            .field("year_range", &self.year_range)
            .field("active_scenario", &self.active_scenario)
            .field("normalized", &self.normalized)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn settings() -> Settings {
        Settings::new(1990, 2035, 2023)
    }

    fn recording_session() -> (Session, Rc<RefCell<Vec<SessionEvent>>>) {
        let mut session = Session::new(settings());
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        session.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        (session, events)
    }

    #[test]
    fn test_starts_at_default_range() {
        let session = Session::new(settings());
        assert_eq!(session.year_range(), (2023, 2035));
        assert!(session.active_scenario().is_none());
    }

    #[test]
    fn test_set_year_range_publishes_once() {
        let (mut session, events) = recording_session();
        session.set_year_range(2010, 2030);
        session.set_year_range(2010, 2030); // no-op, no event
        assert_eq!(
            *events.borrow(),
            vec![SessionEvent::YearRangeChanged { start: 2010, end: 2030 }]
        );
    }

    #[test]
    fn test_year_range_swapped_and_clamped() {
        let (mut session, events) = recording_session();
        session.set_year_range(2050, 1900);
        assert_eq!(session.year_range(), (1990, 2035));
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_clamping_can_make_a_write_silent() {
        let (mut session, events) = recording_session();
        // Clamps to the default range, which is already active.
        session.set_year_range(2023, 2400);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_scenario_and_normalization_events() {
        let (mut session, events) = recording_session();
        session.set_active_scenario(Some("ambitious".into()));
        session.set_active_scenario(Some("ambitious".into()));
        session.set_normalized(true);
        assert_eq!(
            *events.borrow(),
            vec![
                SessionEvent::ScenarioChanged { id: Some("ambitious".into()) },
                SessionEvent::NormalizationChanged { enabled: true },
            ]
        );
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut session = Session::new(settings());
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let id = session.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));
        session.set_normalized(true);
        assert!(events.borrow().is_empty());
    }
}
