use super::*;
use std::time::Duration;

use tokio::time::sleep;

async fn settle<T>(after_ms: u64, outcome: Result<T, &'static str>) -> Result<T, &'static str> {
    sleep(Duration::from_millis(after_ms)).await;
    outcome
}

#[tokio::test(start_paused = true)]
async fn succeeds_with_both_values_in_argument_order() {
    let joined = join_all_or_nothing(settle(30, Ok("a")), settle(10, Ok(2))).await;
    assert_eq!(joined, Ok(("a", 2)));
}

#[tokio::test(start_paused = true)]
async fn fails_fast_without_waiting_for_the_slow_side() {
    let started = tokio::time::Instant::now();
    let joined: Result<((), ()), _> =
        join_all_or_nothing(settle(10, Err("a failed")), settle(10_000, Ok(()))).await;

    assert_eq!(joined, Err("a failed"));
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn failure_after_other_side_succeeded_still_fails() {
    let joined: Result<((), ()), _> =
        join_all_or_nothing(settle(10, Ok(())), settle(20, Err("b failed"))).await;
    assert_eq!(joined, Err("b failed"));
}

#[tokio::test(start_paused = true)]
async fn first_settled_failure_wins_when_both_fail() {
    let joined: Result<((), ()), _> =
        join_all_or_nothing(settle(20, Err("a failed")), settle(5, Err("b failed"))).await;
    assert_eq!(joined, Err("b failed"));

    let joined: Result<((), ()), _> =
        join_all_or_nothing(settle(5, Err("a failed")), settle(20, Err("b failed"))).await;
    assert_eq!(joined, Err("a failed"));
}

#[tokio::test]
async fn simultaneous_failures_report_the_first_argument() {
    let joined: Result<((), ()), _> = join_all_or_nothing(
        async { Err::<(), _>("a failed") },
        async { Err::<(), _>("b failed") },
    )
    .await;
    assert_eq!(joined, Err("a failed"));
}
