//! Forward execution and accumulator semantics

use std::sync::{Arc, Mutex};

use saga_orchestration::{Saga, SagaOutcome, StageDefinition};

type TestSaga = Saga<String, String, String>;

fn stage(name: &'static str) -> StageDefinition<String, String, String> {
    StageDefinition::new()
        .up(move |_results| async move { Ok(format!("{name}-result")) })
        .down(move |_prior| async move { Ok(format!("{name}-undone")) })
}

#[tokio::test]
async fn empty_saga_resolves_to_an_empty_accumulator() {
    let saga = TestSaga::new();

    let outcome = saga.execute().await.unwrap();
    match outcome {
        SagaOutcome::Completed { results } => assert!(results.is_empty()),
        SagaOutcome::RolledBack { .. } => panic!("nothing to roll back"),
    }
}

#[tokio::test]
async fn results_are_keyed_by_stage_name_in_registration_order() {
    let mut saga = TestSaga::new();
    saga.add_stage("charge", stage("charge")).unwrap();
    saga.add_stage("ship", stage("ship")).unwrap();
    saga.add_stage("notify", stage("notify")).unwrap();

    let outcome = saga.execute().await.unwrap();
    let SagaOutcome::Completed { results } = outcome else {
        panic!("expected completion");
    };

    let names: Vec<&str> = results.names().collect();
    assert_eq!(names, vec!["charge", "ship", "notify"]);
    assert_eq!(results.get("charge"), Some(&"charge-result".to_string()));
    assert_eq!(results.get("ship"), Some(&"ship-result".to_string()));
    assert_eq!(results.get("notify"), Some(&"notify-result".to_string()));
}

#[tokio::test]
async fn later_stages_see_earlier_results() {
    let mut saga = TestSaga::new();
    saga.add_stage("charge", stage("charge")).unwrap();
    saga.add_stage(
        "ship",
        StageDefinition::new()
            .up(|results| async move {
                let charge = results.get("charge").cloned().unwrap_or_default();
                Ok(format!("shipping after {charge}"))
            })
            .down(|_prior| async { Ok("ship-undone".to_string()) }),
    )
    .unwrap();

    let SagaOutcome::Completed { results } = saga.execute().await.unwrap() else {
        panic!("expected completion");
    };
    assert_eq!(
        results.get("ship"),
        Some(&"shipping after charge-result".to_string())
    );
}

#[tokio::test]
async fn before_hook_sees_only_strictly_prior_results() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_by_hook = seen.clone();

    let mut saga = TestSaga::new();
    saga.add_stage("charge", stage("charge")).unwrap();
    saga.add_stage(
        "ship",
        StageDefinition::new()
            .before(move |results| {
                let seen = seen_by_hook.clone();
                async move {
                    let names: Vec<String> = results.names().map(str::to_string).collect();
                    seen.lock().unwrap().push(names);
                    Ok(())
                }
            })
            .up(|_results| async { Ok("ship-result".to_string()) })
            .down(|_prior| async { Ok("ship-undone".to_string()) }),
    )
    .unwrap();

    let outcome = saga.execute().await.unwrap();
    assert!(outcome.is_completed());

    let seen = seen.lock().unwrap();
    assert_eq!(*seen, vec![vec!["charge".to_string()]]);
}

#[tokio::test]
async fn after_hook_receives_the_up_result() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_by_hook = seen.clone();

    let mut saga = TestSaga::new();
    saga.add_stage(
        "charge",
        StageDefinition::new()
            .up(|_results| async { Ok("charge-result".to_string()) })
            .down(|_prior| async { Ok("charge-undone".to_string()) })
            .after(move |result| {
                let seen = seen_by_hook.clone();
                async move {
                    seen.lock().unwrap().push(result);
                    Ok(())
                }
            }),
    )
    .unwrap();

    let outcome = saga.execute().await.unwrap();
    assert!(outcome.is_completed());
    assert_eq!(seen.lock().unwrap().as_slice(), &["charge-result".to_string()]);
}

#[tokio::test]
async fn each_execution_starts_from_a_fresh_accumulator() {
    let mut saga = TestSaga::new();
    saga.add_stage("charge", stage("charge")).unwrap();
    saga.add_stage("ship", stage("ship")).unwrap();

    for _ in 0..2 {
        let SagaOutcome::Completed { results } = saga.execute().await.unwrap() else {
            panic!("expected completion");
        };
        assert_eq!(results.len(), 2);
    }
}

#[tokio::test]
async fn stats_count_completed_stages() {
    let mut saga = TestSaga::new();
    saga.add_stage("charge", stage("charge")).unwrap();
    saga.add_stage("ship", stage("ship")).unwrap();

    saga.execute().await.unwrap();

    let stats = saga.stats();
    assert_eq!(stats.stages_started, 2);
    assert_eq!(stats.stages_completed, 2);
    assert_eq!(stats.stages_failed, 0);
    assert_eq!(stats.sagas_completed, 1);
    assert_eq!(stats.sagas_rolled_back, 0);
}
