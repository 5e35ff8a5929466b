//! Integration tests for the reactive todo list.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use proptest::prelude::*;
use std::sync::{Arc, Mutex};
use todo_sync_core::types::{TodoId, TodoStatus};
use todo_sync_projections::{TodoListState, TodoStore};
use todo_sync_testing::{fixtures, properties::{arb_todo, arb_todo_list}};

fn recording(store: &TodoStore) -> Arc<Mutex<Vec<Vec<i64>>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    store.subscribe(move |state: &TodoListState| {
        sink.lock()
            .unwrap()
            .push(state.todos.iter().map(|t| t.id.0).collect());
    });
    log
}

#[test]
fn add_then_replace_keeps_position_zero() {
    let store = TodoStore::new();
    store.replace_all(vec![fixtures::todo(1, "old")]);

    store.add(fixtures::todo(5, "buy milk"));
    let mut updated = fixtures::todo(5, "buy oat milk");
    updated.status = TodoStatus::Completed;
    store.replace(updated.clone());

    let todos = store.todos();
    assert_eq!(todos[0], updated);
    assert_eq!(todos.len(), 2);
}

#[test]
fn every_operation_notifies_with_full_state() {
    let store = TodoStore::new();
    let log = recording(&store);

    store.replace_all(vec![fixtures::todo(2, "b"), fixtures::todo(1, "a")]);
    store.add(fixtures::todo(3, "c"));
    store.replace(fixtures::todo(1, "a2"));
    store.remove(TodoId(2));
    store.remove(TodoId(42));
    store.replace(fixtures::todo(42, "ghost"));
    store.clear();

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            vec![2, 1],
            vec![3, 2, 1],
            vec![3, 2, 1],
            vec![3, 1],
            vec![3, 1],
            vec![3, 1],
            vec![],
        ]
    );
}

#[test]
fn observers_run_in_registration_order() {
    let store = TodoStore::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    for name in ["list", "counter", "badge"] {
        let order = Arc::clone(&order);
        store.subscribe(move |_| order.lock().unwrap().push(name));
    }

    store.add(fixtures::todo(1, "a"));
    assert_eq!(*order.lock().unwrap(), vec!["list", "counter", "badge"]);
}

#[test]
fn clones_share_the_list() {
    let store = TodoStore::new();
    let other = store.clone();

    other.add(fixtures::todo(9, "shared"));
    assert!(store.contains(TodoId(9)));
    assert_eq!(store.get(TodoId(9)).unwrap().title, "shared");
}

proptest! {
    #[test]
    fn replace_all_round_trips(list in arb_todo_list(24)) {
        let store = TodoStore::new();
        store.add(fixtures::todo(99_999, "stale"));

        store.replace_all(list.clone());
        prop_assert_eq!(store.todos(), list);
    }

    #[test]
    fn remove_absent_id_leaves_list_unchanged(list in arb_todo_list(16), id in 10_000_i64..20_000) {
        let store = TodoStore::new();
        store.replace_all(list);
        let before = store.state();

        store.remove(TodoId(id));
        prop_assert_eq!(store.state(), before);
    }

    #[test]
    fn ids_stay_unique(list in arb_todo_list(16), extra in proptest::collection::vec(arb_todo(), 0..8)) {
        let store = TodoStore::new();
        store.replace_all(list);
        for todo in extra {
            store.add(todo);
        }

        let mut ids: Vec<_> = store.todos().iter().map(|t| t.id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
    }
}
