//! Delivery of refresh actions and job completions to subscribers.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing;

use explorer_entity::job::JobInfo;
use explorer_entity::result::RefreshAction;

/// Receives the side effects of finished jobs.
#[async_trait]
pub trait RefreshNotifier: Send + Sync + std::fmt::Debug {
    /// A job changed part of a server's tree.
    async fn notify_refresh(&self, action: &RefreshAction);

    /// A job reached its final status.
    async fn notify_job_finished(&self, info: &JobInfo);
}

/// A message published to subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Notification {
    /// Refresh part of the navigation tree.
    Refresh(RefreshAction),
    /// A job finished.
    JobFinished(Box<JobInfo>),
}

/// In-process notifier backed by a broadcast channel.
///
/// Messages published while nobody is subscribed are dropped.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<Notification>,
}

impl BroadcastNotifier {
    /// Create a notifier buffering up to `capacity` messages per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to future notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    fn publish(&self, notification: Notification) {
        if self.sender.send(notification).is_err() {
            tracing::trace!("No notification subscribers");
        }
    }
}

#[async_trait]
impl RefreshNotifier for BroadcastNotifier {
    async fn notify_refresh(&self, action: &RefreshAction) {
        tracing::debug!(
            "Refresh {:?} of {} on {}",
            action.refresh_type,
            action.entity_type,
            action.server_url
        );
        self.publish(Notification::Refresh(action.clone()));
    }

    async fn notify_job_finished(&self, info: &JobInfo) {
        self.publish(Notification::JobFinished(Box::new(info.clone())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_entity::object::ObjectType;
    use explorer_entity::result::RefreshType;
    use url::Url;

    #[tokio::test]
    async fn test_subscriber_receives_refresh() {
        let notifier = BroadcastNotifier::new(8);
        let mut rx = notifier.subscribe();
        let action = RefreshAction::well(
            Url::parse("http://some.url.com").unwrap(),
            Some("w1".into()),
            RefreshType::Remove,
        );

        notifier.notify_refresh(&action).await;

        match rx.recv().await.unwrap() {
            Notification::Refresh(received) => {
                assert_eq!(received, action);
                assert_eq!(received.entity_type, ObjectType::Well);
            }
            other => panic!("unexpected notification: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_dropped() {
        let notifier = BroadcastNotifier::new(1);
        let action = RefreshAction::well(
            Url::parse("http://some.url.com").unwrap(),
            None,
            RefreshType::Update,
        );
        notifier.notify_refresh(&action).await;
        let mut rx = notifier.subscribe();
        assert!(rx.try_recv().is_err());
    }
}
