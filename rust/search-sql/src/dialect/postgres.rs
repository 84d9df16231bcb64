use super::{format_call, Dialect, PaginateSql};
use crate::{query::SqlParam, value::DateGranularity};

#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

pub(super) fn to_char_pattern(granularity: DateGranularity) -> &'static str {
    match granularity {
        DateGranularity::Day => "'YYYY-MM-DD'",
        DateGranularity::Minute => "'YYYY-MM-DD HH24:MI'",
        DateGranularity::Second => "'YYYY-MM-DD HH24:MI:SS'",
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn date_truncate(&self, sql: &mut String, expr: &str, granularity: DateGranularity) {
        format_call(sql, "to_char", expr, to_char_pattern(granularity));
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
