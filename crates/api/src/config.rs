use std::path::PathBuf;

use kanban_core::policy::{ForeignIdPolicy, MassEditPolicy, OrphanTicketPolicy};

/// Output format of the `fmt` tracing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound of the database connection pool (default: `20`).
    pub db_max_connections: u32,
    /// Directory of the built single-page client. Unset disables static serving.
    pub static_dir: Option<PathBuf>,
    /// Treatment of status ids from other projects in a mass edit.
    pub foreign_id_policy: ForeignIdPolicy,
    /// Treatment of tickets whose status is deleted by a mass edit.
    pub orphan_ticket_policy: OrphanTicketPolicy,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:8080`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    /// | `STATIC_DIR`           | unset                      |
    /// | `FOREIGN_ID_POLICY`    | `ignore`                   |
    /// | `ORPHAN_TICKET_POLICY` | `reassign`                 |
    /// | `LOG_FORMAT`           | `text`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8080".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let static_dir = std::env::var("STATIC_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let foreign_id_policy = std::env::var("FOREIGN_ID_POLICY")
            .map(|v| {
                v.parse()
                    .unwrap_or_else(|e| panic!("Invalid FOREIGN_ID_POLICY: {e}"))
            })
            .unwrap_or_default();

        let orphan_ticket_policy = std::env::var("ORPHAN_TICKET_POLICY")
            .map(|v| {
                v.parse()
                    .unwrap_or_else(|e| panic!("Invalid ORPHAN_TICKET_POLICY: {e}"))
            })
            .unwrap_or_default();

        let log_format = match std::env::var("LOG_FORMAT")
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "" | "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => panic!("Invalid LOG_FORMAT '{other}': expected text or json"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            db_max_connections,
            static_dir,
            foreign_id_policy,
            orphan_ticket_policy,
            log_format,
        }
    }

    /// Policies applied to every mass edit served by this instance.
    pub fn mass_edit_policy(&self) -> MassEditPolicy {
        MassEditPolicy {
            foreign_ids: self.foreign_id_policy,
            orphans: self.orphan_ticket_policy,
        }
    }
}
