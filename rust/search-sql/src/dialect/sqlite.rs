use super::{format_call, Dialect, PaginateSql};
use crate::{query::SqlParam, value::DateGranularity};

#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn date_truncate(&self, sql: &mut String, expr: &str, granularity: DateGranularity) {
        // strftime takes the format first
        let pattern = match granularity {
            DateGranularity::Day => "'%Y-%m-%d'",
            DateGranularity::Minute => "'%Y-%m-%d %H:%M'",
            DateGranularity::Second => "'%Y-%m-%d %H:%M:%S'",
        };
        format_call(sql, "strftime", pattern, expr);
    }

    fn paginate(
        &self,
        select_sql: &str,
        from_where_sql: &str,
        limit: i64,
        offset: i64,
    ) -> PaginateSql {
        PaginateSql {
            sql: format!("{select_sql}{from_where_sql} limit ? offset ?"),
            params: vec![SqlParam::Int(limit), SqlParam::Int(offset)],
        }
    }
}
