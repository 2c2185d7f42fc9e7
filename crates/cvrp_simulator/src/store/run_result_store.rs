use std::sync::Arc;

use jiff::Timestamp;
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use super::{
    result_tab::{ResultTabPayload, ResultTabRecord},
    tab_id::{ResultTabId, TabDirection, TabId},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapTabState {
    /// Most recent registered run, kept even after its tab was closed.
    pub last_run: Option<Arc<ResultTabRecord>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResultStoreState {
    pub map: MapTabState,
    pub results: Vec<Arc<ResultTabRecord>>,
    pub active_tab: TabId,
    pub run_counter: u64,
}

impl Default for RunResultStoreState {
    fn default() -> Self {
        RunResultStoreState {
            map: MapTabState::default(),
            results: Vec::new(),
            active_tab: TabId::Map,
            run_counter: 0,
        }
    }
}

impl RunResultStoreState {
    pub fn result(&self, id: &ResultTabId) -> Option<&Arc<ResultTabRecord>> {
        self.results.iter().find(|record| &record.id == id)
    }

    fn contains(&self, id: &TabId) -> bool {
        match id {
            TabId::Map => true,
            TabId::Result(id) => self.result(id).is_some(),
        }
    }

    pub fn ordered_tab_ids(&self) -> Vec<TabId> {
        std::iter::once(TabId::Map)
            .chain(
                self.results
                    .iter()
                    .map(|record| TabId::Result(record.id.clone())),
            )
            .collect()
    }
}

/// Single-writer store of registered runs. Every change is published to the
/// receivers handed out by [`RunResultStore::subscribe`]; operations that do
/// not change anything publish nothing.
pub struct RunResultStore {
    state: watch::Sender<RunResultStoreState>,
}

impl Default for RunResultStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RunResultStore {
    pub fn new() -> Self {
        RunResultStore {
            state: watch::Sender::new(RunResultStoreState::default()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RunResultStoreState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> RunResultStoreState {
        self.state.borrow().clone()
    }

    pub fn active_tab(&self) -> TabId {
        self.state.borrow().active_tab.clone()
    }

    pub fn ordered_tab_ids(&self) -> Vec<TabId> {
        self.state.borrow().ordered_tab_ids()
    }

    /// Appends a new result tab and lands on the map tab.
    pub fn register_result(&mut self, payload: ResultTabPayload) -> Arc<ResultTabRecord> {
        self.register_result_at(payload, Timestamp::now())
    }

    pub fn register_result_at(
        &mut self,
        payload: ResultTabPayload,
        created_at: Timestamp,
    ) -> Arc<ResultTabRecord> {
        let run_number = self.state.borrow().run_counter + 1;
        let record = Arc::new(ResultTabRecord::new(payload, run_number, created_at));

        self.state.send_modify(|state| {
            state.run_counter = run_number;
            state.results.push(Arc::clone(&record));
            state.map.last_run = Some(Arc::clone(&record));
            state.active_tab = TabId::Map;
        });

        debug!(id = %record.id, title = %record.title, "Registered result");
        record
    }

    /// Returns whether the active tab changed.
    pub fn activate_tab(&mut self, id: &TabId) -> bool {
        self.state.send_if_modified(|state| {
            if &state.active_tab == id || !state.contains(id) {
                return false;
            }

            state.active_tab = id.clone();
            true
        })
    }

    /// Removes a result tab. Closing the active tab moves focus to the last
    /// remaining result tab, or to the map when none is left.
    pub fn close_tab(&mut self, id: &TabId) -> bool {
        let TabId::Result(result_id) = id else {
            return false;
        };

        self.state.send_if_modified(|state| {
            let Some(position) = state
                .results
                .iter()
                .position(|record| &record.id == result_id)
            else {
                return false;
            };

            state.results.remove(position);

            if &state.active_tab == id {
                state.active_tab = state
                    .results
                    .last()
                    .map(|record| TabId::Result(record.id.clone()))
                    .unwrap_or(TabId::Map);
            }

            true
        })
    }

    /// Activates the tab, or brings the map's last run back as a tab if it
    /// was closed. Returns whether the tab exists afterwards.
    pub fn open_result(&mut self, id: &ResultTabId) -> bool {
        let tab_id = TabId::Result(id.clone());
        let mut opened = false;

        self.state.send_if_modified(|state| {
            if state.result(id).is_none() {
                let Some(last_run) = state
                    .map
                    .last_run
                    .as_ref()
                    .filter(|record| &record.id == id)
                else {
                    return false;
                };

                state.results.push(Arc::clone(last_run));
            }

            opened = true;
            if state.active_tab == tab_id {
                return false;
            }

            state.active_tab = tab_id.clone();
            true
        });

        opened
    }

    pub fn open_last_result(&mut self) -> bool {
        let last_run_id = self
            .state
            .borrow()
            .map
            .last_run
            .as_ref()
            .map(|record| record.id.clone());

        match last_run_id {
            Some(id) => self.open_result(&id),
            None => false,
        }
    }

    /// Activates the neighbouring tab, wrapping around at both ends.
    pub fn cycle(&mut self, direction: TabDirection) -> TabId {
        let (ordered, active) = {
            let state = self.state.borrow();
            (state.ordered_tab_ids(), state.active_tab.clone())
        };

        let count = ordered.len();
        let current = ordered.iter().position(|id| id == &active).unwrap_or(0);
        let target = match direction {
            TabDirection::Next => (current + 1) % count,
            TabDirection::Previous => (current + count - 1) % count,
        };

        self.activate_tab(&ordered[target]);
        ordered[target].clone()
    }

    pub fn reset(&mut self) {
        self.state.send_replace(RunResultStoreState::default());
        debug!("Result store reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    fn register(store: &mut RunResultStore, count: usize) -> Vec<TabId> {
        (0..count)
            .map(|index| {
                let record = store.register_result(test_utils::result_payload(&index.to_string()));
                TabId::Result(record.id.clone())
            })
            .collect()
    }

    fn assert_invariants(store: &RunResultStore) {
        let state = store.snapshot();
        assert!(state.contains(&state.active_tab));

        let run_numbers: Vec<u64> = state.results.iter().map(|r| r.run_number).collect();
        assert!(run_numbers.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(run_numbers.iter().all(|&number| number <= state.run_counter));
    }

    #[test]
    fn test_register_result() {
        let mut store = RunResultStore::new();

        let first = store.register_result(test_utils::result_payload("t1"));
        let second = store.register_result(test_utils::result_payload("t2"));

        assert_eq!(first.run_number, 1);
        assert_eq!(second.run_number, 2);
        assert!(first.title.starts_with("Result #1 — TABU · "));
        assert_ne!(first.id, second.id);

        let state = store.snapshot();
        assert_eq!(state.results.len(), 2);
        assert_eq!(state.active_tab, TabId::Map);
        assert_eq!(state.map.last_run.as_ref(), Some(&second));
    }

    #[test]
    fn test_activate_tab() {
        let mut store = RunResultStore::new();
        let ids = register(&mut store, 2);

        assert!(store.activate_tab(&ids[0]));
        assert!(!store.activate_tab(&ids[0]));
        assert!(!store.activate_tab(&TabId::from(String::from("result-0-99"))));
        assert_eq!(store.active_tab(), ids[0]);

        assert!(store.activate_tab(&TabId::Map));
        assert_eq!(store.active_tab(), TabId::Map);
    }

    #[test]
    fn test_close_tab() {
        let mut store = RunResultStore::new();
        let ids = register(&mut store, 3);

        assert!(!store.close_tab(&TabId::Map));
        assert!(!store.close_tab(&TabId::from(String::from("result-0-99"))));

        // Closing an inactive tab keeps the focus.
        store.activate_tab(&ids[0]);
        assert!(store.close_tab(&ids[1]));
        assert_eq!(store.active_tab(), ids[0]);

        // Closing the active tab falls back to the last remaining one.
        assert!(store.close_tab(&ids[0]));
        assert_eq!(store.active_tab(), ids[2]);

        assert!(store.close_tab(&ids[2]));
        assert_eq!(store.active_tab(), TabId::Map);
        assert!(store.snapshot().results.is_empty());
        assert_invariants(&store);
    }

    #[test]
    fn test_run_numbers_are_never_reused() {
        let mut store = RunResultStore::new();
        let ids = register(&mut store, 2);

        store.close_tab(&ids[1]);
        let next = store.register_result(test_utils::result_payload("t3"));

        assert_eq!(next.run_number, 3);
        assert_invariants(&store);
    }

    #[test]
    fn test_open_result_recovers_last_run() {
        let mut store = RunResultStore::new();
        let ids = register(&mut store, 2);
        let last = ids[1].as_result().unwrap().clone();

        store.close_tab(&ids[1]);
        assert!(store.open_result(&last));

        let state = store.snapshot();
        assert_eq!(state.active_tab, ids[1]);
        assert_eq!(state.results.last().map(|record| &record.id), Some(&last));

        // Older closed tabs are gone for good.
        let first = ids[0].as_result().unwrap().clone();
        store.close_tab(&ids[0]);
        assert!(!store.open_result(&first));
        assert_invariants(&store);
    }

    #[test]
    fn test_open_last_result() {
        let mut store = RunResultStore::new();
        assert!(!store.open_last_result());

        let ids = register(&mut store, 2);
        assert!(store.open_last_result());
        assert_eq!(store.active_tab(), ids[1]);
        assert_eq!(store.snapshot().results.len(), 2);
    }

    #[test]
    fn test_tab_cycling() {
        let mut store = RunResultStore::new();
        let ids = register(&mut store, 2);

        assert_eq!(
            store.ordered_tab_ids(),
            vec![TabId::Map, ids[0].clone(), ids[1].clone()]
        );

        store.activate_tab(&ids[1]);
        assert_eq!(store.cycle(TabDirection::Next), TabId::Map);
        assert_eq!(store.cycle(TabDirection::Previous), ids[1]);
        assert_eq!(store.cycle(TabDirection::Previous), ids[0]);
        assert_eq!(store.cycle(TabDirection::Next), ids[1]);
        assert_eq!(store.active_tab(), ids[1]);
    }

    #[test]
    fn test_cycle_with_only_map() {
        let mut store = RunResultStore::new();

        assert_eq!(store.cycle(TabDirection::Next), TabId::Map);
        assert_eq!(store.cycle(TabDirection::Previous), TabId::Map);
    }

    #[test]
    fn test_reset() {
        let mut store = RunResultStore::new();
        let ids = register(&mut store, 2);
        store.activate_tab(&ids[0]);

        store.reset();

        assert_eq!(store.snapshot(), RunResultStoreState::default());
        let next = store.register_result(test_utils::result_payload("t1"));
        assert_eq!(next.run_number, 1);
    }

    #[test]
    fn test_subscribers_see_changes() {
        let mut store = RunResultStore::new();
        let mut receiver = store.subscribe();
        receiver.mark_unchanged();

        let ids = register(&mut store, 1);
        assert!(receiver.has_changed().unwrap());
        assert_eq!(receiver.borrow_and_update().results.len(), 1);

        store.activate_tab(&TabId::Map);
        assert!(!receiver.has_changed().unwrap());

        store.activate_tab(&ids[0]);
        assert!(receiver.has_changed().unwrap());
        assert_eq!(receiver.borrow_and_update().active_tab, ids[0]);
    }

    #[test]
    fn test_invariants_hold_over_mixed_operations() {
        let mut store = RunResultStore::new();

        for step in 0..30usize {
            let ordered = store.ordered_tab_ids();
            let target = ordered[step % ordered.len()].clone();

            match step % 5 {
                0 | 3 => {
                    store.register_result(test_utils::result_payload(&step.to_string()));
                }
                1 => {
                    store.activate_tab(&target);
                }
                2 => {
                    store.close_tab(&target);
                }
                _ => {
                    store.cycle(TabDirection::Previous);
                }
            }

            assert_invariants(&store);
        }
    }
}
