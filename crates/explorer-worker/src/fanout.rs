//! Bounded fan-out for bulk workers and folding of per-item outcomes.

use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use url::Url;

use explorer_core::error::AppError;
use explorer_entity::object::ObjectType;
use explorer_entity::result::{EntityDescription, RefreshAction, WorkerResult};
use explorer_store::QueryResult;

use crate::executor::WorkerOutcome;

/// Run `op` for every item with at most `limit` in flight.
///
/// Every item runs to completion (no short-circuit), and results come back
/// in submission order regardless of completion order.
pub async fn fan_out<I, F, Fut, T>(items: I, limit: usize, op: F) -> Vec<T>
where
    I: IntoIterator,
    F: Fn(I::Item) -> Fut,
    Fut: Future<Output = T>,
{
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let tasks = items.into_iter().map(|item| {
        let semaphore = Arc::clone(&semaphore);
        let task = op(item);
        async move {
            let _permit = semaphore.acquire().await;
            task.await
        }
    });
    join_all(tasks).await
}

/// Outcome of one remote call within a bulk job.
#[derive(Debug)]
pub struct ItemOutcome {
    /// Uid of the item.
    pub uid: String,
    /// Names identifying the item.
    pub description: EntityDescription,
    /// What the store said, or why the call did not reach it.
    pub result: Result<QueryResult, AppError>,
}

impl ItemOutcome {
    /// Whether the store accepted the call.
    pub fn is_success(&self) -> bool {
        matches!(&self.result, Ok(r) if r.is_successful)
    }

    /// Failure reason, if the call failed.
    pub fn reason(&self) -> Option<String> {
        match &self.result {
            Ok(r) if r.is_successful => None,
            Ok(r) => r.reason.clone(),
            Err(e) => Some(e.message.clone()),
        }
    }
}

/// Wording of a bulk job's messages.
#[derive(Debug, Clone, Copy)]
pub struct Wording {
    /// Past tense verb, e.g. "Deleted".
    pub past: &'static str,
    /// Infinitive verb, e.g. "delete".
    pub infinitive: &'static str,
    /// Type of the items.
    pub object_type: ObjectType,
}

/// Fold per-item outcomes into one result and at most one refresh action.
///
/// - all succeeded: success listing every uid, refresh emitted
/// - some failed: failure starting with the successes, reason and entity of
///   the first failure in submission order, refresh scoped to the successes
/// - none succeeded: failure, no refresh
pub fn fold(
    server_url: &Url,
    outcomes: &[ItemOutcome],
    wording: Wording,
    refresh: RefreshAction,
) -> WorkerOutcome {
    let plural = wording.object_type.plural();
    let succeeded: Vec<String> = outcomes
        .iter()
        .filter(|o| o.is_success())
        .map(|o| o.uid.clone())
        .collect();
    let success_text = if succeeded.is_empty() {
        String::new()
    } else {
        format!(
            "{} {} {}: {}.",
            wording.past,
            succeeded.len(),
            wording.object_type.noun(succeeded.len()),
            succeeded.join(", ")
        )
    };

    let Some(first_failure) = outcomes.iter().find(|o| !o.is_success()) else {
        return WorkerOutcome::new(
            WorkerResult::success(server_url.clone(), success_text),
            Some(refresh.with_object_uids(succeeded)),
        );
    };

    let message = format!("{success_text} Failed to {} some {plural}", wording.infinitive);
    let result = WorkerResult::failure(
        server_url.clone(),
        message.trim_start(),
        first_failure.reason(),
        Some(first_failure.description.clone()),
    );
    let refresh = (!succeeded.is_empty()).then(|| refresh.with_object_uids(succeeded));
    WorkerOutcome::new(result, refresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_entity::result::RefreshType;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn url() -> Url {
        Url::parse("http://some.url.com").unwrap()
    }

    fn outcome(uid: &str, result: Result<QueryResult, AppError>) -> ItemOutcome {
        ItemOutcome {
            uid: uid.into(),
            description: EntityDescription {
                object_name: Some(format!("name-{uid}")),
                ..Default::default()
            },
            result,
        }
    }

    fn wording() -> Wording {
        Wording {
            past: "Deleted",
            infinitive: "delete",
            object_type: ObjectType::Rig,
        }
    }

    fn refresh() -> RefreshAction {
        RefreshAction::objects(url(), "w1", "wb1", ObjectType::Rig, RefreshType::Remove)
    }

    #[tokio::test]
    async fn test_results_keep_submission_order() {
        let results = fan_out(vec![30u64, 0, 15], 3, |delay| async move {
            tokio::time::sleep(Duration::from_millis(delay)).await;
            delay
        })
        .await;
        assert_eq!(results, vec![30, 0, 15]);
    }

    #[tokio::test]
    async fn test_in_flight_is_bounded() {
        let current = &AtomicUsize::new(0);
        let peak = &AtomicUsize::new(0);
        fan_out(0..10, 3, move |_| async move {
            let now = current.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            current.fetch_sub(1, Ordering::SeqCst);
        })
        .await;
        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert!(peak.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn test_fold_all_success() {
        let outcomes = vec![
            outcome("a", Ok(QueryResult::success())),
            outcome("b", Ok(QueryResult::success())),
        ];
        let folded = fold(&url(), &outcomes, wording(), refresh());
        assert!(folded.result.is_success);
        assert_eq!(folded.result.message, "Deleted 2 rigs: a, b.");
        assert_eq!(folded.refresh.unwrap().object_uids, vec!["a", "b"]);
    }

    #[test]
    fn test_fold_partial_failure() {
        let outcomes = vec![
            outcome("a", Ok(QueryResult::success())),
            outcome("b", Ok(QueryResult::failure("locked"))),
            outcome("c", Err(AppError::remote_store("timeout"))),
        ];
        let folded = fold(&url(), &outcomes, wording(), refresh());
        assert!(!folded.result.is_success);
        assert!(folded.result.message.starts_with("Deleted 1 rig: a."));
        assert!(folded.result.message.ends_with("Failed to delete some rigs"));
        assert_eq!(folded.result.reason.as_deref(), Some("locked"));
        assert_eq!(
            folded.result.description.unwrap().object_name.as_deref(),
            Some("name-b")
        );
        assert_eq!(folded.refresh.unwrap().object_uids, vec!["a"]);
    }

    #[test]
    fn test_fold_all_failed() {
        let outcomes = vec![
            outcome("a", Err(AppError::remote_store("unreachable"))),
            outcome("b", Ok(QueryResult::failure("locked"))),
        ];
        let folded = fold(&url(), &outcomes, wording(), refresh());
        assert!(!folded.result.is_success);
        assert_eq!(folded.result.message, "Failed to delete some rigs");
        assert_eq!(folded.result.reason.as_deref(), Some("unreachable"));
        assert!(folded.refresh.is_none());
    }
}
