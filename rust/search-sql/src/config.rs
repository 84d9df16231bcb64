use crate::{
    dialect::{Dialect, DialectKind},
    error::{Result, SearchSqlError},
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub dialect: DialectKind,
    pub default_limit: i64,
    pub max_limit: i64,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    search_sql_dialect: Option<String>,
    #[serde(default = "default_limit")]
    search_sql_default_limit: i64,
    #[serde(default = "default_max_limit")]
    search_sql_max_limit: i64,
}

const fn default_limit() -> i64 {
    100
}

const fn default_max_limit() -> i64 {
    500
}

impl ResolverConfig {
    pub fn from_env() -> Result<Self> {
        let raw: RawConfig = envy::from_env().map_err(|err| {
            SearchSqlError::Config(format!("failed to parse SEARCH_SQL_* environment variables: {err}"))
        })?;

        let dialect = match raw.search_sql_dialect.as_deref() {
            Some(name) if !name.trim().is_empty() => name.parse()?,
            _ => DialectKind::default(),
        };

        Ok(Self::with_limits(
            dialect,
            raw.search_sql_default_limit,
            raw.search_sql_max_limit,
        ))
    }

    /// Config for callers that wire the resolver up in code.
    pub fn embedded(dialect: DialectKind) -> Self {
        Self::with_limits(dialect, default_limit(), default_max_limit())
    }

    pub fn with_limits(dialect: DialectKind, default_limit: i64, max_limit: i64) -> Self {
        let default_limit = default_limit.max(1);
        Self {
            dialect,
            default_limit,
            max_limit: max_limit.max(default_limit),
        }
    }

    pub fn build_dialect(&self) -> Arc<dyn Dialect> {
        self.dialect.dialect()
    }

    pub fn determine_limit(&self, candidate: Option<i64>) -> i64 {
        candidate
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::embedded(DialectKind::default())
    }
}
