//! Checker Registry
//!
//! Dispatch table from event kind to the callbacks subscribed to it. A checker
//! registers once under a unique name with one handler per event it handles;
//! the engine calls [`CheckerRegistry::dispatch`] for every event it reaches.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::errors::{NetaintError, Result};
use crate::features::taint_analysis::ports::{CheckerEvent, EventKind};

/// Callback invoked with an event and the engine context it occurs in
pub type EventHandler<C> = Box<dyn Fn(&CheckerEvent<'_>, &mut C) + Send + Sync>;

/// Registration metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerInfo {
    pub name: String,
    pub description: String,
}

pub struct CheckerRegistry<C> {
    checkers: Vec<CheckerInfo>,
    handlers: FxHashMap<EventKind, Vec<EventHandler<C>>>,
}

impl<C> Default for CheckerRegistry<C> {
    fn default() -> Self {
        Self {
            checkers: Vec::new(),
            handlers: FxHashMap::default(),
        }
    }
}

impl<C> CheckerRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a checker and its event handlers.
    ///
    /// Fails if a checker with the same name is already registered; the
    /// registry is left unchanged in that case.
    pub fn add_checker(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handlers: Vec<(EventKind, EventHandler<C>)>,
    ) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(NetaintError::duplicate_checker(name));
        }

        debug!(checker = %name, handlers = handlers.len(), "Registering checker");
        for (kind, handler) in handlers {
            self.handlers.entry(kind).or_default().push(handler);
        }
        self.checkers.push(CheckerInfo {
            name,
            description: description.into(),
        });
        Ok(())
    }

    /// Invoke every handler subscribed to this event's kind, in registration order
    pub fn dispatch(&self, event: &CheckerEvent<'_>, ctx: &mut C) {
        if let Some(handlers) = self.handlers.get(&event.kind()) {
            for handler in handlers {
                handler(event, ctx);
            }
        }
    }

    pub fn checkers(&self) -> &[CheckerInfo] {
        &self.checkers
    }

    pub fn contains(&self, name: &str) -> bool {
        self.checkers.iter().any(|c| c.name == name)
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}

impl<C> std::fmt::Debug for CheckerRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckerRegistry")
            .field("checkers", &self.checkers)
            .field("handlers", &self.handlers.iter().map(|(k, v)| (*k, v.len())).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::taint_analysis::ports::{CallEvent, LocationEvent};
    use crate::shared::models::SVal;

    fn recorder(label: &'static str) -> EventHandler<Vec<String>> {
        Box::new(move |event: &CheckerEvent<'_>, log: &mut Vec<String>| {
            log.push(format!("{}:{:?}", label, event.kind()));
        })
    }

    #[test]
    fn test_dispatch_by_kind() {
        let mut registry = CheckerRegistry::new();
        registry
            .add_checker(
                "a",
                "",
                vec![(EventKind::PreCall, recorder("a")), (EventKind::Location, recorder("a"))],
            )
            .unwrap();

        let call = CallEvent::new("memcpy", vec![], SVal::Unknown);
        let mut log = Vec::new();
        registry.dispatch(&CheckerEvent::PreCall(&call), &mut log);
        registry.dispatch(&CheckerEvent::PostCall(&call), &mut log);

        assert_eq!(log, vec!["a:PreCall"]);
        assert_eq!(registry.handler_count(EventKind::PostCall), 0);
        assert_eq!(registry.handler_count(EventKind::Location), 1);
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let mut registry = CheckerRegistry::new();
        registry
            .add_checker("first", "", vec![(EventKind::Location, recorder("first"))])
            .unwrap();
        registry
            .add_checker("second", "", vec![(EventKind::Location, recorder("second"))])
            .unwrap();

        let access = LocationEvent {
            location: SVal::Unknown,
            is_load: false,
        };
        let mut log = Vec::new();
        registry.dispatch(&CheckerEvent::Location(&access), &mut log);

        assert_eq!(log, vec!["first:Location", "second:Location"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry: CheckerRegistry<Vec<String>> = CheckerRegistry::new();
        registry.add_checker("ci.NetworkTaint", "", vec![]).unwrap();

        let err = registry
            .add_checker("ci.NetworkTaint", "", vec![(EventKind::PreCall, recorder("dup"))])
            .unwrap_err();

        assert!(matches!(err, NetaintError::DuplicateChecker(ref n) if n == "ci.NetworkTaint"));
        assert_eq!(registry.checkers().len(), 1);
        assert_eq!(registry.handler_count(EventKind::PreCall), 0);
    }
}
