//! Wire types for the generation backend API
//!
//! The backend speaks camelCase JSON; these mirror its request and
//! response bodies. Generated source comes back as plain text and is
//! passed through untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::options::{Language, MapperLanguage};

/// Request body for typed-model generation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRequest {
    /// Saved connection to introspect
    pub connection_id: i64,

    /// The option set for the chosen variant, passed through opaquely
    pub options: serde_json::Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,

    /// Variant key within the target language (e.g. "record", "interface")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    pub language: Language,

    /// Restrict generation to these tables; `None` means all tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_names: Option<Vec<String>>,
}

/// CRUD operation toggles for mapper generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapperOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_crud: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
}

/// Request body for persistence-mapper generation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapperRequest {
    pub connection_id: i64,

    pub options: MapperOptions,

    pub target_type: MapperLanguage,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
}

/// Database engines the backend can introspect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    Mysql,
    Postgres,
    Oracle,
    Mssql,
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DatabaseType::Mysql => "mysql",
            DatabaseType::Postgres => "postgres",
            DatabaseType::Oracle => "oracle",
            DatabaseType::Mssql => "mssql",
        };
        f.pad(name)
    }
}

impl FromStr for DatabaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mysql" => Ok(DatabaseType::Mysql),
            "postgres" => Ok(DatabaseType::Postgres),
            "oracle" => Ok(DatabaseType::Oracle),
            "mssql" => Ok(DatabaseType::Mssql),
            other => Err(format!(
                "Unknown database type '{}', expected one of: mysql, postgres, oracle, mssql",
                other
            )),
        }
    }
}

/// A saved database connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseConnection {
    pub connection_id: i64,
    pub name: String,
    pub db_type: DatabaseType,
    pub host: String,
    pub port: u16,
    pub database_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,

    pub username: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// One introspected table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInfo {
    pub name: String,
    pub column_count: u32,
}

/// Result of probing a connection
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectResponse {
    pub success: bool,
    pub message: String,

    #[serde(default)]
    pub ping_ms: Option<u64>,

    #[serde(default)]
    pub tables_found: Option<u64>,

    #[serde(default)]
    pub size_mb: Option<f64>,

    #[serde(default)]
    pub tables: Vec<TableInfo>,
}

/// Backend health probe response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: HealthState,
    pub version: String,
    pub uptime: u64,
    pub database: DatabaseHealth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Backend-side database health
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    pub connected: bool,
    pub latency: u64,
}

/// Standard response envelope for list endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,

    pub data: T,
}

/// Connection status as tracked by the CLI between probes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionHealth {
    pub connection_id: i64,
    pub name: String,
    pub connected: bool,

    #[serde(default)]
    pub last_checked_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_error: Option<String>,
}
