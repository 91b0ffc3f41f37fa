//! Tests for the submission guard across async boundaries.

use wordeau_core::SubmissionGuard;

#[tokio::test]
async fn test_locked_while_running() {
    let guard = SubmissionGuard::new();
    let observer = guard.clone();

    let seen = guard.run_exclusive(async { observer.is_locked() }).await;

    assert!(seen, "Guard should be held inside run_exclusive");
    assert!(!guard.is_locked());
}

#[tokio::test]
async fn test_released_after_failure() {
    let guard = SubmissionGuard::new();

    let result: Result<(), String> = guard
        .run_exclusive(async { Err("service unavailable".to_string()) })
        .await;

    assert!(result.is_err());
    assert!(!guard.is_locked());
}

#[tokio::test]
async fn test_released_when_future_dropped() {
    let guard = SubmissionGuard::new();
    let inner = guard.clone();

    let task = tokio::spawn(async move {
        inner
            .run_exclusive(std::future::pending::<()>())
            .await
    });
    tokio::task::yield_now().await;
    while !guard.is_locked() {
        tokio::task::yield_now().await;
    }

    task.abort();
    let _ = task.await;
    assert!(!guard.is_locked());
}

#[tokio::test]
async fn test_check_before_entry_prevents_double_run() {
    let guard = SubmissionGuard::new();
    let permit = guard.try_acquire().expect("Guard should be free");

    // A second caller checks first and backs off.
    assert!(guard.is_locked());
    assert!(guard.try_acquire().is_none());

    drop(permit);
    assert!(guard.try_acquire().is_some());
}
