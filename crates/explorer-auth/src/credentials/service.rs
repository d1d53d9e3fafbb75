//! Decides which credentials, if any, a request may use against a server.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};
use url::Url;

use explorer_cache::CredentialsCache;
use explorer_core::{AppError, AppResult};
use explorer_core::traits::DocumentRepository;
use explorer_core::types::id::ServerId;
use explorer_entity::credentials::ServerCredentials;
use explorer_entity::server::Server;

use crate::headers::EssentialHeaders;
use crate::jwt::{RoleClaims, TokenDecoder};
use crate::roles::roles_intersect;
use crate::system::SystemCredentialsStore;

/// Resolves credentials from system configuration and the session cache.
///
/// Resolution is a purely local decision over token claims, cache state and
/// configuration. It never contacts a remote store.
#[derive(Debug, Clone)]
pub struct CredentialsService {
    decoder: TokenDecoder,
    system_credentials: Arc<dyn SystemCredentialsStore>,
    servers: Arc<dyn DocumentRepository<Server, ServerId>>,
    cache: CredentialsCache,
}

impl CredentialsService {
    /// Creates a new credentials service.
    pub fn new(
        decoder: TokenDecoder,
        system_credentials: Arc<dyn SystemCredentialsStore>,
        servers: Arc<dyn DocumentRepository<Server, ServerId>>,
        cache: CredentialsCache,
    ) -> Self {
        Self {
            decoder,
            system_credentials,
            servers,
            cache,
        }
    }

    /// Resolve the credentials to use against `server_url`.
    ///
    /// `use_system_creds` is set in OAuth mode: system credentials become
    /// eligible and the session is identified by the token subject.
    /// Returns `Ok(None)` when the caller must authenticate interactively;
    /// only an unparsable `server_url` is an error.
    pub async fn get_credentials(
        &self,
        use_system_creds: bool,
        headers: &EssentialHeaders,
        server_url: &str,
        desired_user_id: Option<&str>,
    ) -> AppResult<Option<ServerCredentials>> {
        let host = Url::parse(server_url)?;
        let claims = self.claims(headers);

        if use_system_creds
            && let Some(claims) = &claims
            && let Some(creds) = self.system_credentials_for(claims, &host, desired_user_id).await?
        {
            debug!(host = %host, user_id = %creds.user_id, "Using system credentials");
            return Ok(Some(creds));
        }

        let Some(session_id) = Self::session_id_from(use_system_creds, headers, claims.as_ref()) else {
            return Ok(None);
        };

        let Some(creds) = self.cache.get(&session_id, &host).await? else {
            return Ok(None);
        };

        if let Some(desired) = desired_user_id
            && creds.user_id != desired
        {
            debug!(host = %host, "Cached user does not match the requested user");
            return Ok(None);
        }

        Ok(Some(creds))
    }

    /// Every username the caller may use on `server_url` without logging in again.
    pub async fn get_logged_in_usernames(
        &self,
        use_system_creds: bool,
        headers: &EssentialHeaders,
        server_url: &str,
    ) -> AppResult<Vec<String>> {
        let host = Url::parse(server_url)?;
        let claims = self.claims(headers);
        let mut usernames = Vec::new();

        if use_system_creds
            && let Some(claims) = &claims
            && self.is_authorized_for(claims, &host).await?
        {
            usernames.extend(
                self.system_credentials
                    .find_by_host(&host)
                    .into_iter()
                    .map(|c| c.user_id),
            );
        }

        if let Some(session_id) = Self::session_id_from(use_system_creds, headers, claims.as_ref())
            && let Some(user_id) = self.cache.user_id(&session_id, &host).await
            && !usernames.contains(&user_id)
        {
            usernames.push(user_id);
        }

        Ok(usernames)
    }

    /// Insert or overwrite the cached credentials of `session_id` for
    /// `credentials.host`, expiring at `clock(now) + ttl_in_hours`.
    pub async fn cache_credentials<C>(
        &self,
        session_id: &str,
        credentials: &ServerCredentials,
        ttl_in_hours: f64,
        clock: C,
    ) -> AppResult<()>
    where
        C: Fn(DateTime<Utc>) -> DateTime<Utc>,
    {
        let expires_at = lifetime(ttl_in_hours)
            .and_then(|ttl| clock(Utc::now()).checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Credential lifetime of {} hours is out of range",
                    ttl_in_hours
                ))
            })?;
        self.cache.insert(session_id, credentials, expires_at).await?;
        info!(host = %credentials.host, user_id = %credentials.user_id, %expires_at, "Cached credentials");
        Ok(())
    }

    /// Evict every cached credential of every session.
    pub async fn remove_all_cached_credentials(&self) {
        self.cache.remove_all().await;
    }

    /// Evict the cached credentials of one session.
    pub async fn remove_cached_credentials(&self, session_id: &str) -> u64 {
        self.cache.remove_session(session_id).await
    }

    /// The session identifier of the caller, if one can be derived.
    pub fn session_id(&self, use_system_creds: bool, headers: &EssentialHeaders) -> Option<String> {
        let claims = self.claims(headers);
        Self::session_id_from(use_system_creds, headers, claims.as_ref())
    }

    /// The caller's display name from the bearer token, if present and valid.
    pub fn username(&self, headers: &EssentialHeaders) -> Option<String> {
        self.claims(headers)
            .and_then(|c| c.username().map(str::to_owned))
    }

    fn claims(&self, headers: &EssentialHeaders) -> Option<RoleClaims> {
        headers
            .bearer_token()
            .and_then(|token| self.decoder.decode(token))
    }

    fn session_id_from(
        use_system_creds: bool,
        headers: &EssentialHeaders,
        claims: Option<&RoleClaims>,
    ) -> Option<String> {
        if use_system_creds && let Some(sub) = claims.and_then(|c| c.sub.clone()) {
            return Some(sub);
        }
        headers.session_cookie.clone()
    }

    async fn is_authorized_for(&self, claims: &RoleClaims, host: &Url) -> AppResult<bool> {
        let servers = self.servers.get_documents().await?;
        Ok(servers
            .iter()
            .filter(|server| server.has_url(host))
            .any(|server| roles_intersect(&claims.roles, &server.roles)))
    }

    async fn system_credentials_for(
        &self,
        claims: &RoleClaims,
        host: &Url,
        desired_user_id: Option<&str>,
    ) -> AppResult<Option<ServerCredentials>> {
        let candidates = self.system_credentials.find_by_host(host);
        if candidates.is_empty() || !self.is_authorized_for(claims, host).await? {
            return Ok(None);
        }
        Ok(candidates
            .into_iter()
            .find(|c| desired_user_id.is_none_or(|desired| c.user_id == desired)))
    }
}

/// Converts fractional hours to a duration. `None` when the value is not
/// finite or does not fit.
fn lifetime(hours: f64) -> Option<Duration> {
    let millis = hours * 3_600_000.0;
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    Duration::try_milliseconds(millis as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_cache::SecretProtector;
    use explorer_core::config::AuthConfig;
    use explorer_database::repositories::ServerRepository;
    use explorer_entity::server::CreateServer;
    use jsonwebtoken::{EncodingKey, Header, encode};

    use crate::system::ConfiguredSystemCredentials;

    const SERVER: &str = "http://some.url.com";

    fn service() -> CredentialsService {
        let system = ConfiguredSystemCredentials::new(vec![ServerCredentials::new(
            Url::parse(SERVER).unwrap(),
            "systemuser",
            "systempassword",
        )]);
        let servers = ServerRepository::with_servers(vec![
            CreateServer {
                name: "Test Server".into(),
                url: Url::parse(SERVER).unwrap(),
                description: "Testserver for system credentials".into(),
                security_scheme: "OAuth2".into(),
                roles: vec!["validrole".into(), "developer".into()],
            }
            .into_server(),
        ]);
        CredentialsService::new(
            TokenDecoder::new(&AuthConfig::default()),
            Arc::new(system),
            Arc::new(servers),
            CredentialsCache::with_protector(SecretProtector::ephemeral(), 100, false),
        )
    }

    fn headers_with_token(roles: &[&str], exp_offset: i64) -> EssentialHeaders {
        let claims = RoleClaims {
            roles: roles.iter().map(|r| r.to_string()).collect(),
            upn: Some("tokenuser@arpa.net".into()),
            sub: Some("token-subject".into()),
            exp: Utc::now().timestamp() + exp_offset,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"unused")).unwrap();
        EssentialHeaders::default().with_bearer(&token)
    }

    #[tokio::test]
    async fn test_valid_role_gets_system_credentials() {
        let eh = headers_with_token(&["validrole"], 60);
        let creds = service()
            .get_credentials(true, &eh, SERVER, Some("systemuser"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(creds.user_id, "systemuser");
        assert_eq!(creds.password, "systempassword");
    }

    #[tokio::test]
    async fn test_unknown_server_gets_nothing() {
        let eh = headers_with_token(&["validrole"], 60);
        let creds = service()
            .get_credentials(true, &eh, "http://some.invalidurl.com", Some("systemuser"))
            .await
            .unwrap();
        assert!(creds.is_none());
    }

    #[tokio::test]
    async fn test_missing_role_gets_nothing() {
        let eh = headers_with_token(&["invalidrole"], 60);
        let creds = service()
            .get_credentials(true, &eh, SERVER, Some("systemuser"))
            .await
            .unwrap();
        assert!(creds.is_none());
    }

    #[tokio::test]
    async fn test_expired_token_gets_nothing() {
        let eh = headers_with_token(&["validrole"], -600);
        let creds = service()
            .get_credentials(true, &eh, SERVER, None)
            .await
            .unwrap();
        assert!(creds.is_none());
    }

    #[tokio::test]
    async fn test_system_credentials_require_oauth_mode() {
        let eh = headers_with_token(&["validrole"], 60);
        let creds = service()
            .get_credentials(false, &eh, SERVER, None)
            .await
            .unwrap();
        assert!(creds.is_none());
    }

    #[tokio::test]
    async fn test_malformed_server_url_is_an_error() {
        let err = service()
            .get_credentials(false, &EssentialHeaders::default(), "::not a url::", None)
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_cached_credentials_round_trip() {
        let service = service();
        let session = "client-id";
        let creds = ServerCredentials::new(
            Url::parse("https://somehost.url").unwrap(),
            "username",
            "dummypassword",
        );
        let eh = EssentialHeaders::default().with_session_cookie(session);

        service
            .cache_credentials(session, &creds, 1.0, |now| now)
            .await
            .unwrap();
        let found = service
            .get_credentials(false, &eh, "https://somehost.url/", Some("username"))
            .await
            .unwrap();
        assert_eq!(found, Some(creds));

        service.remove_all_cached_credentials().await;
        let found = service
            .get_credentials(false, &eh, "https://somehost.url/", Some("username"))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_remove_all_on_empty_cache() {
        let service = service();
        service.remove_all_cached_credentials().await;
        service.remove_all_cached_credentials().await;
    }

    #[tokio::test]
    async fn test_clock_in_the_past_expires_entry() {
        let service = service();
        let creds = ServerCredentials::new(Url::parse(SERVER).unwrap(), "username", "pw");
        service
            .cache_credentials("s", &creds, 1.0, |now| now - Duration::hours(2))
            .await
            .unwrap();
        let eh = EssentialHeaders::default().with_session_cookie("s");
        assert!(
            service
                .get_credentials(false, &eh, SERVER, None)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_cached_user_must_match_desired_user() {
        let service = service();
        let creds = ServerCredentials::new(Url::parse(SERVER).unwrap(), "alice", "pw");
        service
            .cache_credentials("s", &creds, 1.0, |now| now)
            .await
            .unwrap();
        let eh = EssentialHeaders::default().with_session_cookie("s");
        assert!(
            service
                .get_credentials(false, &eh, SERVER, Some("bob"))
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            service
                .get_credentials(false, &eh, SERVER, Some("alice"))
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_oauth_session_is_token_subject() {
        let service = service();
        let eh = headers_with_token(&["invalidrole"], 60);
        assert_eq!(service.session_id(true, &eh).as_deref(), Some("token-subject"));
        assert_eq!(service.session_id(false, &eh), None);

        let creds = ServerCredentials::new(Url::parse(SERVER).unwrap(), "alice", "pw");
        service
            .cache_credentials("token-subject", &creds, 1.0, |now| now)
            .await
            .unwrap();
        let found = service.get_credentials(true, &eh, SERVER, None).await.unwrap();
        assert_eq!(found.map(|c| c.user_id).as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_logged_in_usernames() {
        let service = service();
        let eh = headers_with_token(&["validrole"], 60);
        let creds = ServerCredentials::new(Url::parse(SERVER).unwrap(), "alice", "pw");
        service
            .cache_credentials("token-subject", &creds, 1.0, |now| now)
            .await
            .unwrap();

        let usernames = service.get_logged_in_usernames(true, &eh, SERVER).await.unwrap();
        assert_eq!(usernames, vec!["systemuser".to_string(), "alice".to_string()]);
    }

    #[tokio::test]
    async fn test_out_of_range_lifetime_is_rejected() {
        let service = service();
        let creds = ServerCredentials::new(Url::parse(SERVER).unwrap(), "username", "pw");

        for hours in [1.0e15, f64::INFINITY, f64::NAN] {
            let err = service
                .cache_credentials("s", &creds, hours, |now| now)
                .await
                .unwrap_err();
            assert_eq!(err.kind, explorer_core::error::ErrorKind::Validation);
        }

        let err = service
            .cache_credentials("s", &creds, 1.0, |_| DateTime::<Utc>::MAX_UTC)
            .await
            .unwrap_err();
        assert_eq!(err.kind, explorer_core::error::ErrorKind::Validation);

        let eh = EssentialHeaders::default().with_session_cookie("s");
        assert!(
            service
                .get_credentials(false, &eh, SERVER, None)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_lifetime_from_hours() {
        assert_eq!(lifetime(1.5), Some(Duration::minutes(90)));
        assert_eq!(lifetime(-2.0), Some(Duration::hours(-2)));
        assert!(lifetime(f64::NAN).is_none());
        assert!(lifetime(1.0e300).is_none());
    }
}
