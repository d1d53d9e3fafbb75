//! In-memory store backend for development and testing.
//!
//! Each server URL gets its own [`MemoryStore`]. Objects are indexed by
//! type and full uid path. Writes against a uid registered with
//! [`MemoryStore::reject`] fail with the registered reason, which lets
//! tests exercise partial failures end to end.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, warn};
use url::Url;

use explorer_core::config::StoreAccountConfig;
use explorer_core::error::AppError;
use explorer_core::result::AppResult;
use explorer_entity::credentials::ServerCredentials;
use explorer_entity::object::{ObjectType, WitsmlObject};

use crate::client::{RemoteStoreClient, StoreClientFactory};
use crate::query::{OptionsIn, QueryResult, ReturnElements};

/// Objects held by one simulated server.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: DashMap<String, WitsmlObject>,
    rejections: DashMap<String, String>,
}

fn matches(query: &WitsmlObject, candidate: &WitsmlObject) -> bool {
    let field_matches = |q: &Option<String>, c: &Option<String>| match q.as_deref() {
        None | Some("") => true,
        Some(value) => c.as_deref() == Some(value),
    };
    query.object_type == candidate.object_type
        && (query.uid.is_empty() || query.uid == candidate.uid)
        && field_matches(&query.well_uid, &candidate.well_uid)
        && field_matches(&query.wellbore_uid, &candidate.wellbore_uid)
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an object without any checks.
    pub fn insert(&self, object: WitsmlObject) {
        self.objects.insert(object.path_key(), object);
    }

    /// Make every write touching `uid` fail with `reason`.
    pub fn reject(&self, uid: impl Into<String>, reason: impl Into<String>) {
        self.rejections.insert(uid.into(), reason.into());
    }

    /// Whether an object with the same type and path exists.
    pub fn contains(&self, object: &WitsmlObject) -> bool {
        self.objects.contains_key(&object.path_key())
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Every object matching `query`, sorted by path.
    pub fn find(&self, query: &WitsmlObject) -> Vec<WitsmlObject> {
        let mut found: Vec<WitsmlObject> = self
            .objects
            .iter()
            .filter(|entry| matches(query, entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by_key(|o| o.path_key());
        found
    }

    fn rejection(&self, uid: &str) -> Option<String> {
        self.rejections.get(uid).map(|r| r.value().clone())
    }

    fn parent_exists(&self, object: &WitsmlObject) -> bool {
        match object.object_type {
            ObjectType::Well => true,
            ObjectType::Wellbore => object
                .well_uid
                .as_deref()
                .is_some_and(|well| self.contains(&WitsmlObject::well(well))),
            _ => match (object.well_uid.as_deref(), object.wellbore_uid.as_deref()) {
                (Some(well), Some(wellbore)) => {
                    self.contains(&WitsmlObject::wellbore(well, wellbore))
                }
                _ => false,
            },
        }
    }

    fn add(&self, object: &WitsmlObject) -> QueryResult {
        if let Some(reason) = self.rejection(&object.uid) {
            return QueryResult::failure(reason);
        }
        if self.contains(object) {
            return QueryResult::failure(format!(
                "A {} with uid {} already exists",
                object.object_type, object.uid
            ));
        }
        if !self.parent_exists(object) {
            return QueryResult::failure(format!(
                "The parent of {} {} does not exist",
                object.object_type, object.uid
            ));
        }
        self.insert(object.clone());
        QueryResult::success()
    }

    fn update(&self, object: &WitsmlObject) -> QueryResult {
        if let Some(reason) = self.rejection(&object.uid) {
            return QueryResult::failure(reason);
        }
        let Some(mut stored) = self.objects.get_mut(&object.path_key()) else {
            return QueryResult::failure(format!(
                "No {} with uid {} exists",
                object.object_type, object.uid
            ));
        };
        if let Some(name) = &object.name {
            stored.name = Some(name.clone());
        }
        for (key, value) in &object.properties {
            stored.properties.insert(key.clone(), value.clone());
        }
        QueryResult::success()
    }

    fn delete(&self, query: &WitsmlObject, options: &OptionsIn) -> QueryResult {
        if let Some(reason) = self.rejection(&query.uid) {
            return QueryResult::failure(reason);
        }
        if query.uid.is_empty() {
            return QueryResult::failure("A delete query must name a uid");
        }
        if !self.contains(query) {
            return QueryResult::failure(format!(
                "No {} with uid {} exists",
                query.object_type, query.uid
            ));
        }

        let children: Vec<String> = self
            .objects
            .iter()
            .filter(|entry| is_descendant(query, entry.value()))
            .map(|entry| entry.key().clone())
            .collect();
        if !children.is_empty() && !options.cascaded_delete {
            return QueryResult::failure(format!(
                "The {} {} is not empty; a cascaded delete is required",
                query.object_type, query.uid
            ));
        }
        for key in children {
            self.objects.remove(&key);
        }
        self.objects.remove(&query.path_key());
        QueryResult::success()
    }
}

fn is_descendant(parent: &WitsmlObject, candidate: &WitsmlObject) -> bool {
    match parent.object_type {
        ObjectType::Well => candidate.well_uid.as_deref() == Some(parent.uid.as_str()),
        ObjectType::Wellbore => {
            candidate.well_uid == parent.well_uid
                && candidate.wellbore_uid.as_deref() == Some(parent.uid.as_str())
        }
        _ => false,
    }
}

/// A client bound to one [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryStoreClient {
    store: Arc<MemoryStore>,
    url: Url,
    user_id: String,
    authenticated: bool,
}

impl MemoryStoreClient {
    fn ensure_authenticated(&self) -> AppResult<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(AppError::authentication(format!(
                "User {} is not authorized on {}",
                self.user_id, self.url
            )))
        }
    }
}

#[async_trait]
impl RemoteStoreClient for MemoryStoreClient {
    async fn get_from_store(
        &self,
        query: &WitsmlObject,
        options: &OptionsIn,
    ) -> AppResult<Vec<WitsmlObject>> {
        self.ensure_authenticated()?;
        let mut found = self.store.find(query);
        if options.return_elements == ReturnElements::IdOnly {
            for object in &mut found {
                object.properties.clear();
            }
        }
        Ok(found)
    }

    async fn add_to_store(&self, object: &WitsmlObject) -> AppResult<QueryResult> {
        self.ensure_authenticated()?;
        Ok(self.store.add(object))
    }

    async fn update_in_store(&self, object: &WitsmlObject) -> AppResult<QueryResult> {
        self.ensure_authenticated()?;
        Ok(self.store.update(object))
    }

    async fn delete_from_store(
        &self,
        query: &WitsmlObject,
        options: &OptionsIn,
    ) -> AppResult<QueryResult> {
        self.ensure_authenticated()?;
        Ok(self.store.delete(query, options))
    }

    async fn test_connection(&self) -> AppResult<()> {
        self.ensure_authenticated()
    }

    fn server_url(&self) -> &Url {
        &self.url
    }
}

/// Hands out clients for per-URL [`MemoryStore`]s.
///
/// Hosts with configured accounts only accept those accounts; any other
/// host accepts every credential.
#[derive(Debug, Default)]
pub struct MemoryStoreFactory {
    stores: DashMap<Url, Arc<MemoryStore>>,
    accounts: Vec<ServerCredentials>,
}

impl MemoryStoreFactory {
    /// Create a factory accepting any credentials on every host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory from configured accounts.
    pub fn from_config(accounts: &[StoreAccountConfig]) -> Self {
        let accounts = accounts
            .iter()
            .filter_map(|account| match Url::parse(&account.host) {
                Ok(host) => Some(ServerCredentials::new(
                    host,
                    account.user_id.clone(),
                    account.password.clone(),
                )),
                Err(e) => {
                    warn!(host = %account.host, error = %e, "Skipping store account with invalid host");
                    None
                }
            })
            .collect();
        Self {
            stores: DashMap::new(),
            accounts,
        }
    }

    /// Register an account.
    pub fn with_account(mut self, credentials: ServerCredentials) -> Self {
        self.accounts.push(credentials);
        self
    }

    /// The store behind `url`, created on first use.
    pub fn store(&self, url: &Url) -> Arc<MemoryStore> {
        self.stores
            .entry(url.clone())
            .or_insert_with(|| Arc::new(MemoryStore::new()))
            .clone()
    }

    fn accepts(&self, credentials: &ServerCredentials) -> bool {
        let mut for_host = self
            .accounts
            .iter()
            .filter(|a| a.host == credentials.host)
            .peekable();
        if for_host.peek().is_none() {
            return true;
        }
        for_host.any(|a| a == credentials)
    }
}

impl StoreClientFactory for MemoryStoreFactory {
    fn create_client(
        &self,
        credentials: &ServerCredentials,
    ) -> AppResult<Arc<dyn RemoteStoreClient>> {
        let authenticated = self.accepts(credentials);
        debug!(host = %credentials.host, user_id = %credentials.user_id, authenticated, "Creating in-memory store client");
        Ok(Arc::new(MemoryStoreClient {
            store: self.store(&credentials.host),
            url: credentials.host.clone(),
            user_id: credentials.user_id.clone(),
            authenticated,
        }))
    }
}
