use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub identity: IdentityConfig,
    pub store: StoreConfig,
    pub policy: PolicyConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Mount point for the todo routes, e.g. "/api". Empty mounts at the root.
    pub route_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Header injected by the upstream authentication proxy
    pub principal_header: String,
    pub fallback_enabled: bool,
    pub fallback_display_name: String,
    pub fallback_unique_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub database_name: String,
    pub collection: String,
    pub max_connections: u32,
}

/// How a refused delete of someone else's item is reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForbiddenDeletePolicy {
    /// 204 No Content, indistinguishable from a real delete
    Silent,
    /// 403 Forbidden
    Reject,
}

/// What Add does with a caller-supplied id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpsertPolicy {
    /// Write the payload as given, owner fields included
    PassThrough,
    /// Read the stored document first and refuse to overwrite a foreign item
    EnforceOwner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub forbidden_delete: ForbiddenDeletePolicy,
    pub upsert: UpsertPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("TODO_API_HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("TODO_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }
        if let Ok(v) = env::var("TODO_API_ROUTE_PREFIX") {
            self.server.route_prefix = v.trim_end_matches('/').to_string();
        }

        // Identity overrides
        if let Ok(v) = env::var("IDENTITY_PRINCIPAL_HEADER") {
            self.identity.principal_header = v;
        }
        if let Ok(v) = env::var("IDENTITY_FALLBACK_ENABLED") {
            self.identity.fallback_enabled = v.parse().unwrap_or(self.identity.fallback_enabled);
        }
        if let Ok(v) = env::var("IDENTITY_FALLBACK_DISPLAY_NAME") {
            self.identity.fallback_display_name = v;
        }
        if let Ok(v) = env::var("IDENTITY_FALLBACK_UNIQUE_NAME") {
            self.identity.fallback_unique_name = v;
        }

        // Store overrides
        if let Ok(v) = env::var("TODO_STORE") {
            self.store.backend = match v.as_str() {
                "postgres" | "pg" => StoreBackend::Postgres,
                "memory" | "mem" => StoreBackend::Memory,
                _ => self.store.backend,
            };
        }
        if let Ok(v) = env::var("TODO_DATABASE_NAME") {
            self.store.database_name = v;
        }
        if let Ok(v) = env::var("TODO_COLLECTION") {
            self.store.collection = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.store.max_connections = v.parse().unwrap_or(self.store.max_connections);
        }

        // Policy overrides
        if let Ok(v) = env::var("POLICY_FORBIDDEN_DELETE") {
            self.policy.forbidden_delete = match v.as_str() {
                "reject" | "403" => ForbiddenDeletePolicy::Reject,
                "silent" | "204" => ForbiddenDeletePolicy::Silent,
                _ => self.policy.forbidden_delete,
            };
        }
        if let Ok(v) = env::var("POLICY_UPSERT") {
            self.policy.upsert = match v.as_str() {
                "enforce_owner" | "enforce" => UpsertPolicy::EnforceOwner,
                "pass_through" | "passthrough" => UpsertPolicy::PassThrough,
                _ => self.policy.upsert,
            };
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 7071,
                route_prefix: String::new(),
            },
            identity: IdentityConfig {
                principal_header: "X-MS-CLIENT-PRINCIPAL-NAME".to_string(),
                fallback_enabled: true,
                fallback_display_name: "Dev User".to_string(),
                fallback_unique_name: "dev@localhost".to_string(),
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                database_name: "serverless_todo".to_string(),
                collection: "todo_items".to_string(),
                max_connections: 5,
            },
            policy: PolicyConfig {
                forbidden_delete: ForbiddenDeletePolicy::Silent,
                upsert: UpsertPolicy::PassThrough,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                route_prefix: "/api".to_string(),
            },
            identity: IdentityConfig {
                fallback_enabled: false,
                ..Self::development().identity
            },
            store: StoreConfig {
                backend: StoreBackend::Postgres,
                max_connections: 10,
                ..Self::development().store
            },
            policy: PolicyConfig {
                forbidden_delete: ForbiddenDeletePolicy::Silent,
                upsert: UpsertPolicy::PassThrough,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                route_prefix: "/api".to_string(),
            },
            identity: IdentityConfig {
                fallback_enabled: false,
                ..Self::development().identity
            },
            store: StoreConfig {
                backend: StoreBackend::Postgres,
                max_connections: 20,
                ..Self::development().store
            },
            policy: PolicyConfig {
                forbidden_delete: ForbiddenDeletePolicy::Silent,
                upsert: UpsertPolicy::PassThrough,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}
