use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served as the signed-in app shell behind the session gate.
    pub app_dir: String,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Object storage settings. All of these come from the environment; a
/// missing value must not crash startup; requests that need storage fail
/// with a descriptive error instead.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub region: String,
    pub bucket: String,
    /// Custom endpoint for S3-compatible stores; empty for AWS.
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Base URL under which uploaded objects are publicly addressable.
    pub public_base_url: String,
    pub path_style: bool,
    /// Lifetime of a presigned upload credential (direct PUT).
    pub upload_expiry_secs: u32,
    /// Lifetime of a presigned playback URL.
    pub video_url_expiry_secs: u32,
    /// Lifetime of a presigned sidecar (thumbnail) URL.
    pub sidecar_url_expiry_secs: u32,
}

impl StorageConfig {
    /// Settings that must be present before the S3 gateway can be built.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.region.is_empty() {
            missing.push("storage.region");
        }
        if self.bucket.is_empty() {
            missing.push("storage.bucket");
        }
        if self.access_key_id.is_empty() {
            missing.push("storage.access_key_id");
        }
        if self.secret_access_key.is_empty() {
            missing.push("storage.secret_access_key");
        }
        missing
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Cookie-name prefix set by the hosted auth provider.
    pub cookie_prefix: String,
    /// Key used to verify provider-issued session tokens.
    pub jwt_secret: String,
    /// Where the session gate sends unauthenticated visitors.
    pub sign_in_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.app_dir", "./app")?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://golfcloud.db?mode=rwc")?
            .set_default("storage.region", "")?
            .set_default("storage.bucket", "")?
            .set_default("storage.endpoint", "")?
            .set_default("storage.access_key_id", "")?
            .set_default("storage.secret_access_key", "")?
            .set_default("storage.public_base_url", "")?
            .set_default("storage.path_style", false)?
            .set_default("storage.upload_expiry_secs", 600)?
            .set_default("storage.video_url_expiry_secs", 300)?
            .set_default("storage.sidecar_url_expiry_secs", 120)?
            .set_default("auth.cookie_prefix", "gc-auth")?
            .set_default("auth.jwt_secret", "")?
            .set_default("auth.sign_in_path", "/signin")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., GOLFCLOUD__STORAGE__BUCKET)
            .add_source(Environment::with_prefix("GOLFCLOUD").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
