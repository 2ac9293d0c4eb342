//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::JwtService;
use crate::config::ApiConfig;
use crate::policy::AccessPolicy;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the connection pool, the token
/// service and the order access policy.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    jwt: JwtService,
    policy: AccessPolicy,
}

impl AppState {
    /// Create a new application state from loaded configuration and a
    /// connected pool.
    #[must_use]
    pub fn new(config: ApiConfig, pool: PgPool) -> Self {
        let jwt = JwtService::new(&config.jwt_secret, config.token_ttl_minutes);
        let policy = AccessPolicy::new(config.enforce_order_ownership);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                jwt,
                policy,
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the token service.
    #[must_use]
    pub fn jwt(&self) -> &JwtService {
        &self.inner.jwt
    }

    /// Get the order access policy.
    #[must_use]
    pub fn policy(&self) -> AccessPolicy {
        self.inner.policy
    }
}
