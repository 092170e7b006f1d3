//! Per-kind result slots and per-family loading flags.

use super::kind::{AnalysisKind, OperationFamily};
use chrono::{DateTime, Local};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Instant;

/// Contents of a result slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultSlot {
    /// Untyped JSON response from the backend.
    Ready(Value),
    /// The request failed; holds the message shown in place of the result.
    Failed(String),
}

impl ResultSlot {
    pub fn payload(&self) -> Option<&Value> {
        match self {
            ResultSlot::Ready(value) => Some(value),
            ResultSlot::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ResultSlot::Failed(_))
    }
}

#[derive(Debug, Clone)]
pub struct StoredResult {
    pub slot: ResultSlot,
    /// Generation of the request that produced this slot.
    pub generation: u64,
    pub received_at: DateTime<Local>,
}

/// Latest result per analysis kind.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    slots: HashMap<AnalysisKind, StoredResult>,
}

impl ResultStore {
    pub fn store(&mut self, kind: AnalysisKind, generation: u64, slot: ResultSlot) {
        self.slots.insert(
            kind,
            StoredResult {
                slot,
                generation,
                received_at: Local::now(),
            },
        );
    }

    pub fn get(&self, kind: AnalysisKind) -> Option<&StoredResult> {
        self.slots.get(&kind)
    }

    pub fn slot(&self, kind: AnalysisKind) -> Option<&ResultSlot> {
        self.slots.get(&kind).map(|stored| &stored.slot)
    }

    pub fn clear(&mut self, kind: AnalysisKind) -> bool {
        self.slots.remove(&kind).is_some()
    }
}

/// The request currently shown as busy for a family.
#[derive(Debug, Clone, PartialEq)]
pub struct InFlight {
    pub kind: AnalysisKind,
    pub generation: u64,
    pub started_at: Instant,
}

/// At most one outstanding kind per operation family.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlags {
    by_family: HashMap<OperationFamily, InFlight>,
}

impl LoadingFlags {
    pub fn set(&mut self, kind: AnalysisKind, generation: u64) {
        self.by_family.insert(
            kind.family(),
            InFlight {
                kind,
                generation,
                started_at: Instant::now(),
            },
        );
    }

    /// Clears the family flag if it still names `kind` and no newer request
    /// than `generation` holds it.
    pub fn clear(&mut self, kind: AnalysisKind, generation: u64) -> bool {
        let family = kind.family();
        match self.by_family.get(&family) {
            Some(in_flight) if in_flight.kind == kind && in_flight.generation <= generation => {
                self.by_family.remove(&family);
                true
            }
            _ => false,
        }
    }

    pub fn is_loading(&self, kind: AnalysisKind) -> bool {
        self.by_family
            .get(&kind.family())
            .is_some_and(|in_flight| in_flight.kind == kind)
    }

    pub fn family(&self, family: OperationFamily) -> Option<&InFlight> {
        self.by_family.get(&family)
    }

    pub fn any(&self) -> bool {
        !self.by_family.is_empty()
    }

    /// In-flight requests, oldest first.
    pub fn in_flight(&self) -> Vec<&InFlight> {
        let mut all: Vec<&InFlight> = self.by_family.values().collect();
        all.sort_by_key(|in_flight| in_flight.started_at);
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_replaces_previous_slot() {
        let mut store = ResultStore::default();
        store.store(AnalysisKind::Signals, 1, ResultSlot::Ready(json!({"n": 8})));
        store.store(AnalysisKind::Signals, 2, ResultSlot::Failed("boom".into()));

        let stored = store.get(AnalysisKind::Signals).unwrap();
        assert_eq!(stored.generation, 2);
        assert!(stored.slot.is_failed());
        assert_eq!(stored.slot.payload(), None);
        assert!(store.clear(AnalysisKind::Signals));
        assert!(!store.clear(AnalysisKind::Signals));
    }

    #[test]
    fn test_one_kind_per_family() {
        let mut loading = LoadingFlags::default();
        loading.set(AnalysisKind::Classical, 1);
        loading.set(AnalysisKind::Quantum, 1);
        loading.set(AnalysisKind::Stock, 1);

        assert!(!loading.is_loading(AnalysisKind::Classical));
        assert!(loading.is_loading(AnalysisKind::Quantum));
        assert!(loading.is_loading(AnalysisKind::Stock));
        assert_eq!(loading.in_flight().len(), 2);

        // A classical completion must not clear the quantum indicator.
        assert!(!loading.clear(AnalysisKind::Classical, 1));
        assert!(loading.is_loading(AnalysisKind::Quantum));
        assert!(loading.clear(AnalysisKind::Quantum, 1));
        assert!(loading.family(OperationFamily::Optimization).is_none());
    }

    #[test]
    fn test_older_generation_does_not_clear() {
        let mut loading = LoadingFlags::default();
        loading.set(AnalysisKind::Simulation, 3);

        assert!(!loading.clear(AnalysisKind::Simulation, 2));
        assert_eq!(
            loading.family(OperationFamily::Market).map(|f| f.generation),
            Some(3)
        );
        assert!(loading.clear(AnalysisKind::Simulation, 3));
        assert!(!loading.any());
    }
}
