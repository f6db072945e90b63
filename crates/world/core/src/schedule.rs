//! Delayed-action scheduling driven by the simulated clock.
//!
//! No OS timers are involved. The runtime ticks
//! [`crate::world::World::advance`], which drains due entries and dispatches
//! them to the registered handlers.

use std::collections::BTreeMap;

use crate::state::{EntityId, TimeMs};

/// A deferred action waiting for the clock to reach its fire time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelayedAction {
    pub actor: EntityId,
    pub action_id: String,
    pub fires_at: TimeMs,
}

/// Pending delayed actions, ordered by fire time.
///
/// Insertion order breaks ties between equal fire times. At most one entry
/// exists per (actor, action id) pair; scheduling again replaces it.
#[derive(Clone, Debug, Default)]
pub struct DelaySchedule {
    next_seq: u64,
    pending: BTreeMap<(TimeMs, u64), DelayedAction>,
}

impl DelaySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `action_id` for `actor` at `fires_at`.
    pub fn schedule(&mut self, actor: EntityId, action_id: impl Into<String>, fires_at: TimeMs) {
        let action_id = action_id.into();
        self.cancel(actor, &action_id);

        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert(
            (fires_at, seq),
            DelayedAction {
                actor,
                action_id,
                fires_at,
            },
        );
    }

    /// Removes the entry for (actor, action id). Returns true if one existed.
    pub fn cancel(&mut self, actor: EntityId, action_id: &str) -> bool {
        let key = self
            .pending
            .iter()
            .find(|(_, action)| action.actor == actor && action.action_id == action_id)
            .map(|(&key, _)| key);

        match key {
            Some(key) => {
                self.pending.remove(&key);
                true
            }
            None => false,
        }
    }

    pub fn has_scheduled(&self, actor: EntityId, action_id: &str) -> bool {
        self.pending
            .values()
            .any(|action| action.actor == actor && action.action_id == action_id)
    }

    /// Removes and returns every entry due at or before `now`, in fire
    /// order. Entries added during the resulting dispatch wait for the next
    /// drain even when already due.
    pub fn take_due(&mut self, now: TimeMs) -> Vec<DelayedAction> {
        let mut due = Vec::new();
        while let Some((&key, _)) = self.pending.first_key_value() {
            if key.0 > now {
                break;
            }
            if let Some(action) = self.pending.remove(&key) {
                due.push(action);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
