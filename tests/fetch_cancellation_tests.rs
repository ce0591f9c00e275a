mod support;

use std::time::Duration;

use dashboard_rs::api::{
    DashboardConfig, DashboardEngine, FetchRegistry, ProgressData, WidgetData,
};

use support::sample_vault;

fn progress(value: usize) -> WidgetData {
    WidgetData::Progress(ProgressData {
        value,
        target: 10.0,
        ratio: value as f64 / 10.0,
    })
}

#[tokio::test]
async fn live_ticket_runs_its_future_to_completion() {
    let mut registry = FetchRegistry::new();
    let ticket = registry.begin("w");
    assert!(ticket.is_live());
    assert_eq!(ticket.run(async { 7 }).await, Some(7));
}

#[tokio::test]
async fn newer_fetch_cancels_the_older_one() {
    let mut registry = FetchRegistry::new();
    let first = registry.begin("w");
    let second = registry.begin("w");

    assert!(second.generation() > first.generation());
    assert!(!first.is_live());
    assert!(second.is_live());
    assert_eq!(first.run(async { 1 }).await, None);
    assert_eq!(registry.pending_count(), 1);
}

#[tokio::test]
async fn cancelling_interrupts_a_running_fetch() {
    let mut registry = FetchRegistry::new();
    let ticket = registry.begin("w");
    let slow = ticket.run(async {
        tokio::time::sleep(Duration::from_secs(60)).await;
        "late"
    });
    assert!(registry.cancel("w"));
    assert_eq!(slow.await, None);
    assert!(!registry.cancel("w"));
}

#[tokio::test]
async fn cancel_all_stops_every_widget_and_registry_stays_usable() {
    let mut registry = FetchRegistry::new();
    let a = registry.begin("a");
    let b = registry.begin("b");
    registry.cancel_all();

    assert!(!a.is_live());
    assert!(!b.is_live());
    assert_eq!(registry.pending_count(), 0);

    let fresh = registry.begin("a");
    assert!(fresh.is_live());
    assert_eq!(fresh.run(async { "ok" }).await, Some("ok"));
}

#[test]
fn stale_results_are_dropped_by_the_engine() {
    let mut engine =
        DashboardEngine::new(sample_vault(), DashboardConfig::default()).expect("engine");
    let id = engine.layout().widgets[0].id.clone();

    let stale = engine.begin_fetch(&id).expect("first fetch");
    let current = engine.begin_fetch(&id).expect("second fetch");
    assert!(engine.is_fetch_pending(&id));

    assert!(!engine.apply_fetch_result(&stale, progress(1)));
    assert!(engine.widget_data(&id).is_none());
    assert!(engine.is_fetch_pending(&id));

    assert!(engine.apply_fetch_result(&current, progress(2)));
    assert_eq!(engine.widget_data(&id), Some(&progress(2)));
    assert!(!engine.is_fetch_pending(&id));
}

#[test]
fn results_for_removed_widgets_are_dropped() {
    let mut engine =
        DashboardEngine::new(sample_vault(), DashboardConfig::default()).expect("engine");
    let id = engine.layout().widgets[0].id.clone();

    let ticket = engine.begin_fetch(&id).expect("fetch");
    engine.remove_widget(&id).expect("remove");
    assert!(!ticket.is_live());
    assert!(!engine.apply_fetch_result(&ticket, progress(3)));
    assert!(engine.widget_data(&id).is_none());
}

#[test]
fn teardown_cancels_in_flight_fetches() {
    let mut engine =
        DashboardEngine::new(sample_vault(), DashboardConfig::default()).expect("engine");
    let ids: Vec<String> = engine.layout().widgets.iter().map(|w| w.id.clone()).collect();
    let tickets: Vec<_> = ids
        .iter()
        .map(|id| engine.begin_fetch(id).expect("fetch"))
        .collect();

    engine.teardown();
    assert!(tickets.iter().all(|ticket| !ticket.is_live()));
    assert!(ids.iter().all(|id| !engine.is_fetch_pending(id)));
    assert!(engine.begin_fetch("missing").is_err());
}
