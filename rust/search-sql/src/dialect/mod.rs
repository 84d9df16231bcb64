//! Database-engine specific rendering: case folding, date truncation and pagination.

mod mysql;
mod oracle;
mod postgres;
mod sqlite;

pub use mysql::MySqlDialect;
pub use oracle::OracleDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;

use crate::{
    error::{Result, SearchSqlError},
    query::SqlParam,
    value::DateGranularity,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::Arc};

/// Final listing statement plus the binds its pagination clause introduced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginateSql {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

pub trait Dialect: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    /// Appends the upper-cased form of `expr`.
    fn case_fold(&self, sql: &mut String, expr: &str) {
        sql.push_str("upper(");
        sql.push_str(expr);
        sql.push(')');
    }

    /// Appends `expr` rendered as a string truncated to `granularity`.
    fn date_truncate(&self, sql: &mut String, expr: &str, granularity: DateGranularity);

    /// Builds the paginated statement from the select list and the
    /// `from ... where ... [group by ...] [order by ...]` tail.
    fn paginate(&self, select_sql: &str, from_where_sql: &str, limit: i64, offset: i64)
        -> PaginateSql;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    #[default]
    #[serde(alias = "mariadb")]
    MySql,
    #[serde(alias = "postgresql", alias = "pg")]
    Postgres,
    Oracle,
    Sqlite,
}

impl DialectKind {
    pub fn dialect(self) -> Arc<dyn Dialect> {
        match self {
            DialectKind::MySql => Arc::new(MySqlDialect),
            DialectKind::Postgres => Arc::new(PostgresDialect),
            DialectKind::Oracle => Arc::new(OracleDialect),
            DialectKind::Sqlite => Arc::new(SqliteDialect),
        }
    }
}

impl FromStr for DialectKind {
    type Err = SearchSqlError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(DialectKind::MySql),
            "postgres" | "postgresql" | "pg" => Ok(DialectKind::Postgres),
            "oracle" => Ok(DialectKind::Oracle),
            "sqlite" => Ok(DialectKind::Sqlite),
            other => Err(SearchSqlError::Config(format!(
                "unsupported dialect '{other}' (use mysql|postgres|oracle|sqlite)"
            ))),
        }
    }
}

fn format_call(sql: &mut String, func: &str, first: &str, second: &str) {
    sql.push_str(func);
    sql.push('(');
    sql.push_str(first);
    sql.push_str(", ");
    sql.push_str(second);
    sql.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_dialect_names() {
        assert_eq!("MySQL".parse::<DialectKind>().unwrap(), DialectKind::MySql);
        assert_eq!("mariadb".parse::<DialectKind>().unwrap(), DialectKind::MySql);
        assert_eq!(" pg ".parse::<DialectKind>().unwrap(), DialectKind::Postgres);
        assert_eq!(
            "PostgreSQL".parse::<DialectKind>().unwrap(),
            DialectKind::Postgres
        );
        assert_eq!("oracle".parse::<DialectKind>().unwrap(), DialectKind::Oracle);
        assert_eq!("sqlite".parse::<DialectKind>().unwrap(), DialectKind::Sqlite);
    }

    #[test]
    fn rejects_unknown_dialect() {
        let err = "db2".parse::<DialectKind>().unwrap_err();
        assert!(matches!(err, SearchSqlError::Config(_)));
    }

    #[test]
    fn every_dialect_folds_with_upper() {
        for kind in [
            DialectKind::MySql,
            DialectKind::Postgres,
            DialectKind::Oracle,
            DialectKind::Sqlite,
        ] {
            let mut sql = String::new();
            kind.dialect().case_fold(&mut sql, "u.name");
            assert_eq!(sql, "upper(u.name)", "{kind:?}");
        }
    }
}
