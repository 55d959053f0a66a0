use anyhow::{bail, Context, Result};
use std::env;
use tracing::info;

const DEFAULT_LOG_FILTER: &str = concat!(
    "tutorial_process=debug,api_server=debug,application=debug,",
    "domain=debug,infrastructure=debug,tower_http=debug"
);

#[derive(Debug, Clone, PartialEq)]
pub struct AdminAccount {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub database_pool_size: u32,
    pub api_host: String,
    pub api_port: u16,
    pub log_filter: String,
    pub admin: Option<AdminAccount>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_pool_size: u32 = var("DATABASE_POOL_SIZE", "8")
            .parse()
            .context("Invalid DATABASE_POOL_SIZE")?;
        if database_pool_size == 0 {
            bail!("DATABASE_POOL_SIZE must be at least 1");
        }

        let admin = match (lookup("ADMIN_USERNAME"), lookup("ADMIN_EMAIL")) {
            (Some(username), Some(email)) => Some(AdminAccount { username, email }),
            _ => None,
        };

        Ok(Config {
            database_path: var("DATABASE_PATH", "tutorial.db"),
            database_pool_size,
            api_host: var("API_HOST", "127.0.0.1"),
            api_port: var("API_PORT", "3000")
                .parse()
                .context("Invalid API_PORT")?,
            log_filter: var("RUST_LOG", DEFAULT_LOG_FILTER),
            admin,
        })
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    pub fn log_summary(&self) {
        info!(
            "💾 Database: {} (pool size {})",
            self.database_path, self.database_pool_size
        );
        info!("🌐 API address: {}", self.api_address());
        match &self.admin {
            Some(admin) => info!("👤 Admin bootstrap: {}", admin.username),
            None => info!("👤 Admin bootstrap: disabled"),
        }
    }
}
