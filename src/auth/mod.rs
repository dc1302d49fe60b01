use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::IdentityConfig;

/// Caller identity derived per request. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizedUser {
    pub display_name: String,
    pub unique_name: String,
}

impl AuthorizedUser {
    pub fn new(display_name: impl Into<String>, unique_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            unique_name: unique_name.into(),
        }
    }

    /// The principal header carries a single name, used for both fields
    pub fn from_principal(principal: &str) -> Self {
        Self::new(principal, principal)
    }
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Missing principal header: {0}")]
    MissingPrincipal(String),
}

/// Turns request headers into the caller's identity
pub trait IdentityProvider: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> Result<AuthorizedUser, IdentityError>;
}

/// Trusts a principal-name header set by an upstream authentication proxy.
///
/// When the header is missing or empty and a fallback identity is configured,
/// the fallback is returned. A request without the header is then
/// indistinguishable from a real caller using the fallback name, so the
/// fallback must stay disabled anywhere the proxy is not guaranteed to be in
/// front of the service.
#[derive(Debug, Clone)]
pub struct HeaderIdentityProvider {
    header: String,
    fallback: Option<AuthorizedUser>,
}

impl HeaderIdentityProvider {
    pub fn new(header: impl Into<String>, fallback: Option<AuthorizedUser>) -> Self {
        Self {
            header: header.into(),
            fallback,
        }
    }

    pub fn from_config(config: &IdentityConfig) -> Self {
        let fallback = config.fallback_enabled.then(|| {
            AuthorizedUser::new(&config.fallback_display_name, &config.fallback_unique_name)
        });
        Self::new(&config.principal_header, fallback)
    }
}

impl IdentityProvider for HeaderIdentityProvider {
    fn resolve(&self, headers: &HeaderMap) -> Result<AuthorizedUser, IdentityError> {
        // UPNs may carry UTF-8, which `to_str` rejects
        let principal = headers
            .get(self.header.as_str())
            .map(|v| String::from_utf8_lossy(v.as_bytes()))
            .filter(|v| !v.is_empty());

        match (principal, &self.fallback) {
            (Some(name), _) => Ok(AuthorizedUser::from_principal(&name)),
            (None, Some(fallback)) => {
                tracing::debug!("No {} header, using fallback identity {}", self.header, fallback.unique_name);
                Ok(fallback.clone())
            }
            (None, None) => Err(IdentityError::MissingPrincipal(self.header.clone())),
        }
    }
}

/// Always resolves to the same user, whatever the request carries
#[derive(Debug, Clone)]
pub struct FixedIdentityProvider(pub AuthorizedUser);

impl IdentityProvider for FixedIdentityProvider {
    fn resolve(&self, _headers: &HeaderMap) -> Result<AuthorizedUser, IdentityError> {
        Ok(self.0.clone())
    }
}
