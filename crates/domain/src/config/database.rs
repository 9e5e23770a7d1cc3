use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_true")]
    pub run_migrations: bool,

    #[serde(default = "default_migrations_path")]
    pub migrations_path: String,

    /// Record every answered question in the `query_log` table.
    #[serde(default)]
    pub log_queries: bool,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!("sqlite:{}", self.path)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            run_migrations: true,
            migrations_path: default_migrations_path(),
            log_queries: false,
        }
    }
}

fn default_db_path() -> String {
    "./zoneward.db".to_string()
}

fn default_max_connections() -> u32 {
    8
}

fn default_true() -> bool {
    true
}

fn default_migrations_path() -> String {
    "./migrations".to_string()
}
