use super::{format_call, postgres::to_char_pattern, Dialect, PaginateSql};
use crate::{query::SqlParam, value::DateGranularity};

/// Row-number windowing for Oracle releases without `offset ... fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleDialect;

impl Dialect for OracleDialect {
    fn name(&self) -> &'static str {
        "oracle"
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
            sql: format!(
                "select * from (select row_.*, rownum rownum_ from ({select_sql}{from_where_sql}) row_ where rownum <= ?) where rownum_ > ?"
            ),
            params: vec![
                SqlParam::Int(offset.saturating_add(limit)),
                SqlParam::Int(offset),
            ],
        }
    }
}
