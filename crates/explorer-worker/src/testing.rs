//! Test doubles shared by the worker tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use explorer_core::{AppError, AppResult};
use explorer_entity::job::{Job, JobKind};
use explorer_entity::object::WitsmlObject;
use explorer_entity::result::{RefreshAction, RefreshType, WorkerResult};
use explorer_store::{OptionsIn, QueryResult, RemoteStoreClient};

use crate::context::JobContext;
use crate::executor::{Worker, WorkerOutcome};

pub(crate) const SERVER: &str = "http://some.url.com";

pub(crate) fn server_url() -> Url {
    Url::parse(SERVER).unwrap()
}

/// Remote store double with scripted per-uid delays and failures.
#[derive(Debug)]
pub(crate) struct MockClient {
    url: Url,
    objects: Mutex<Vec<WitsmlObject>>,
    delays: HashMap<String, Duration>,
    rejections: HashMap<String, String>,
    errors: HashMap<String, String>,
    pub(crate) writes: Mutex<Vec<WitsmlObject>>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl MockClient {
    pub(crate) fn new() -> Self {
        Self {
            url: server_url(),
            objects: Mutex::new(Vec::new()),
            delays: HashMap::new(),
            rejections: HashMap::new(),
            errors: HashMap::new(),
            writes: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_url(mut self, url: &str) -> Self {
        self.url = Url::parse(url).unwrap();
        self
    }

    pub(crate) fn with_object(self, object: WitsmlObject) -> Self {
        self.objects.lock().unwrap().push(object);
        self
    }

    pub(crate) fn with_delay(mut self, uid: &str, millis: u64) -> Self {
        self.delays.insert(uid.into(), Duration::from_millis(millis));
        self
    }

    /// The store answers writes on `uid` with an unsuccessful result.
    pub(crate) fn rejecting(mut self, uid: &str, reason: &str) -> Self {
        self.rejections.insert(uid.into(), reason.into());
        self
    }

    /// Calls on `uid` fail before reaching the store.
    pub(crate) fn erroring(mut self, uid: &str, message: &str) -> Self {
        self.errors.insert(uid.into(), message.into());
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub(crate) fn written_uids(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .map(|o| o.uid.clone())
            .collect()
    }

    async fn write(&self, object: &WitsmlObject) -> AppResult<QueryResult> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(&object.uid) {
            tokio::time::sleep(*delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(message) = self.errors.get(&object.uid) {
            return Err(AppError::remote_store(message.clone()));
        }
        if let Some(reason) = self.rejections.get(&object.uid) {
            return Ok(QueryResult::failure(reason.clone()));
        }
        self.writes.lock().unwrap().push(object.clone());
        Ok(QueryResult::success())
    }
}

#[async_trait]
impl RemoteStoreClient for MockClient {
    async fn get_from_store(
        &self,
        query: &WitsmlObject,
        _options: &OptionsIn,
    ) -> AppResult<Vec<WitsmlObject>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .objects
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.object_type == query.object_type && o.uid == query.uid)
            .cloned()
            .collect())
    }

    async fn add_to_store(&self, object: &WitsmlObject) -> AppResult<QueryResult> {
        self.write(object).await
    }

    async fn update_in_store(&self, object: &WitsmlObject) -> AppResult<QueryResult> {
        self.write(object).await
    }

    async fn delete_from_store(
        &self,
        query: &WitsmlObject,
        _options: &OptionsIn,
    ) -> AppResult<QueryResult> {
        self.write(query).await
    }

    async fn test_connection(&self) -> AppResult<()> {
        Ok(())
    }

    fn server_url(&self) -> &Url {
        &self.url
    }
}

/// How a [`StubWorker`] behaves.
#[derive(Debug, Clone)]
pub(crate) enum Behavior {
    Succeed,
    SucceedWithRefresh,
    FailWithRefresh,
    Error(String),
    Panic(String),
    Sleep(u64),
}

/// Worker double used to exercise the queue and registry.
#[derive(Debug)]
pub(crate) struct StubWorker {
    kind: JobKind,
    behavior: Behavior,
}

impl StubWorker {
    pub(crate) fn new(kind: JobKind, behavior: Behavior) -> Self {
        Self { kind, behavior }
    }

    pub(crate) fn succeeding(kind: JobKind) -> Self {
        Self::new(kind, Behavior::Succeed)
    }
}

#[async_trait]
impl Worker for StubWorker {
    fn job_kind(&self) -> JobKind {
        self.kind
    }

    async fn execute(&self, _job: &Job, ctx: &JobContext) -> AppResult<WorkerOutcome> {
        let url = ctx.target.server_url().clone();
        let refresh = RefreshAction::well(url.clone(), Some("w1".into()), RefreshType::Update);
        match &self.behavior {
            Behavior::Succeed => Ok(WorkerOutcome::new(WorkerResult::success(url, "done"), None)),
            Behavior::SucceedWithRefresh => Ok(WorkerOutcome::new(
                WorkerResult::success(url, "done"),
                Some(refresh),
            )),
            Behavior::FailWithRefresh => Ok(WorkerOutcome::new(
                WorkerResult::failure(url, "Updated 1 well: w1. Failed to update some wells", Some("locked".into()), None),
                Some(refresh),
            )),
            Behavior::Error(message) => Err(AppError::remote_store(message.clone())),
            Behavior::Panic(message) => panic!("{}", message),
            Behavior::Sleep(millis) => {
                tokio::time::sleep(Duration::from_millis(*millis)).await;
                Ok(WorkerOutcome::new(WorkerResult::success(url, "slept"), None))
            }
        }
    }
}
