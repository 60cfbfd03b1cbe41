//! Trailing-edge debouncing for typed search and price actions.
//!
//! Each debounce class holds at most one pending action. A new action of the
//! same class replaces the queued one and restarts its timer; only the last
//! action of a burst is ever applied.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::domain::geo::DeviceProfile;
use crate::domain::{DebounceClass, ExplorerAction};

/// Default quiet period for search keystrokes.
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(300);
/// Default quiet period for price slider movement.
pub const DEFAULT_PRICE_DELAY: Duration = Duration::from_millis(500);

/// Quiet periods per debounce class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceDelays {
    /// Quiet period for [`DebounceClass::Search`].
    pub search: Duration,
    /// Quiet period for [`DebounceClass::Price`].
    pub price: Duration,
}

impl Default for DebounceDelays {
    fn default() -> Self {
        Self {
            search: DEFAULT_SEARCH_DELAY,
            price: DEFAULT_PRICE_DELAY,
        }
    }
}

impl DebounceDelays {
    const fn delay_for(&self, class: DebounceClass) -> Duration {
        match class {
            DebounceClass::Search => self.search,
            DebounceClass::Price => self.price,
        }
    }
}

/// An action waiting for its quiet period to elapse.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct PendingAction {
    pub(super) action: ExplorerAction,
    pub(super) device: Option<DeviceProfile>,
    deadline: Instant,
}

#[derive(Debug)]
pub(super) struct Debouncer {
    delays: DebounceDelays,
    pending: HashMap<DebounceClass, PendingAction>,
}

impl Debouncer {
    pub(super) fn new(delays: DebounceDelays) -> Self {
        Self {
            delays,
            pending: HashMap::new(),
        }
    }

    /// Queue `action`, replacing any pending action of the same class.
    pub(super) fn push(
        &mut self,
        class: DebounceClass,
        action: ExplorerAction,
        device: Option<DeviceProfile>,
        now: Instant,
    ) {
        let deadline = now + self.delays.delay_for(class);
        self.pending.insert(
            class,
            PendingAction {
                action,
                device,
                deadline,
            },
        );
    }

    /// Earliest deadline among pending actions.
    pub(super) fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|pending| pending.deadline).min()
    }

    /// Remove and return actions whose deadline has passed, oldest first.
    pub(super) fn take_due(&mut self, now: Instant) -> Vec<PendingAction> {
        let due: Vec<DebounceClass> = self
            .pending
            .iter()
            .filter(|(_, pending)| pending.deadline <= now)
            .map(|(class, _)| *class)
            .collect();
        let mut actions: Vec<PendingAction> = due
            .into_iter()
            .filter_map(|class| self.pending.remove(&class))
            .collect();
        actions.sort_by_key(|pending| pending.deadline);
        actions
    }

    /// Remove and return every pending action, oldest first.
    pub(super) fn drain(&mut self) -> Vec<PendingAction> {
        let mut actions: Vec<PendingAction> = self.pending.drain().map(|(_, p)| p).collect();
        actions.sort_by_key(|pending| pending.deadline);
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn search(query: &str) -> ExplorerAction {
        ExplorerAction::SetSearch {
            query: query.to_owned(),
        }
    }

    #[fixture]
    fn debouncer() -> Debouncer {
        Debouncer::new(DebounceDelays::default())
    }

    #[rstest]
    fn burst_keeps_only_the_last_action(mut debouncer: Debouncer) {
        let start = Instant::now();
        debouncer.push(DebounceClass::Search, search("k"), None, start);
        debouncer.push(
            DebounceClass::Search,
            search("kay"),
            None,
            start + Duration::from_millis(200),
        );

        assert!(debouncer.take_due(start + Duration::from_millis(400)).is_empty());
        let due = debouncer.take_due(start + Duration::from_millis(500));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].action, search("kay"));
        assert!(debouncer.next_deadline().is_none());
    }

    #[rstest]
    fn classes_debounce_independently(mut debouncer: Debouncer) {
        let start = Instant::now();
        debouncer.push(
            DebounceClass::Price,
            ExplorerAction::SetPriceRange { min: 0, max: 900 },
            None,
            start,
        );
        debouncer.push(DebounceClass::Search, search("peru"), None, start);

        assert_eq!(
            debouncer.next_deadline(),
            Some(start + DEFAULT_SEARCH_DELAY)
        );
        let due = debouncer.take_due(start + DEFAULT_SEARCH_DELAY);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].action, search("peru"));
        assert_eq!(debouncer.next_deadline(), Some(start + DEFAULT_PRICE_DELAY));
    }

    #[rstest]
    fn drain_returns_pending_actions_in_deadline_order(mut debouncer: Debouncer) {
        let start = Instant::now();
        debouncer.push(
            DebounceClass::Price,
            ExplorerAction::SetPriceRange { min: 10, max: 20 },
            None,
            start,
        );
        debouncer.push(DebounceClass::Search, search("alps"), None, start);

        let drained: Vec<ExplorerAction> =
            debouncer.drain().into_iter().map(|p| p.action).collect();
        assert_eq!(
            drained,
            vec![
                search("alps"),
                ExplorerAction::SetPriceRange { min: 10, max: 20 }
            ]
        );
    }
}
