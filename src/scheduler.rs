//! Time-ordered turn scheduler.
//!
//! Every turn-taker carries an accumulated time. `next` hands out the entry
//! with the smallest time; the caller then reports how long the granted
//! action took and repeating entries are queued again at `time + duration`.
//! Entries at equal times leave in insertion order.

use std::collections::{BTreeMap, HashMap};

use dungeon::ActorId;
use error::report;
use events::{EventHandler, GameEvent, Priority};

use crate::core::EventId;

/// Something that can be granted a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnTaker {
    Actor(ActorId),
    Event(EventId),
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    taker: TurnTaker,
    repeat: bool,
    time: u64,
}

/// Ordering key: (time, insertion sequence).
type Key = (u64, u64);

#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BTreeMap<Key, Entry>,
    keys: HashMap<TurnTaker, Key>,
    /// Entry returned by `next` and not yet reported.
    outstanding: Option<Entry>,
    time: u64,
    seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a turn-taker `offset` time units after the current time.
    pub fn add(&mut self, taker: TurnTaker, repeat: bool, offset: u64) -> bool {
        if self.contains(taker) {
            report::contract("Scheduler", "add", format!("{:?} is already scheduled", taker));
            return false;
        }
        self.insert(Entry {
            taker,
            repeat,
            time: self.time + offset,
        });
        true
    }

    /// Turn-taker with the smallest accumulated time, if any.
    pub fn next(&mut self) -> Option<TurnTaker> {
        if self.outstanding.is_some() {
            self.report_duration(0);
        }
        let (_, entry) = self.queue.pop_first()?;
        self.keys.remove(&entry.taker);
        self.time = entry.time;
        self.outstanding = Some(entry);
        Some(entry.taker)
    }

    /// Charge `duration` to the entry returned by the last `next`.
    pub fn report_duration(&mut self, duration: u64) {
        let Some(mut entry) = self.outstanding.take() else {
            report::contract("Scheduler", "report_duration", "no turn is outstanding");
            return;
        };
        if entry.repeat {
            entry.time += duration;
            self.insert(entry);
        }
    }

    /// Remove a turn-taker wherever it is. Removing the outstanding entry
    /// cancels its reinsertion.
    pub fn remove(&mut self, taker: TurnTaker) -> bool {
        if self.outstanding.is_some_and(|entry| entry.taker == taker) {
            self.outstanding = None;
            return true;
        }
        match self.keys.remove(&taker) {
            Some(key) => self.queue.remove(&key).is_some(),
            None => false,
        }
    }

    /// Time of the most recently granted turn.
    pub fn current_time(&self) -> u64 {
        self.time
    }

    pub fn contains(&self, taker: TurnTaker) -> bool {
        self.keys.contains_key(&taker) || self.outstanding.is_some_and(|entry| entry.taker == taker)
    }

    pub fn len(&self) -> usize {
        self.queue.len() + usize::from(self.outstanding.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&mut self, entry: Entry) {
        let key = (entry.time, self.seq);
        self.seq += 1;
        self.keys.insert(entry.taker, key);
        self.queue.insert(key, entry);
    }
}

/// Dead actors leave the queue.
impl EventHandler for Scheduler {
    fn handle(&mut self, event: &GameEvent) {
        if let GameEvent::ActorKilled { actor, .. } = event {
            if self.remove(TurnTaker::Actor(ActorId(*actor))) {
                tracing::debug!(actor, "removed from scheduler");
            }
        }
    }

    fn name(&self) -> &str {
        "Scheduler"
    }

    fn priority(&self) -> Priority {
        Priority::Critical
    }

    fn should_handle(&self, event: &GameEvent) -> bool {
        matches!(event, GameEvent::ActorKilled { .. })
    }
}
