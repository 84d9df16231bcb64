use super::{format_call, Dialect, PaginateSql};
use crate::{query::SqlParam, value::DateGranularity};

#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn date_truncate(&self, sql: &mut String, expr: &str, granularity: DateGranularity) {
        let pattern = match granularity {
            DateGranularity::Day => "'%Y-%m-%d'",
            DateGranularity::Minute => "'%Y-%m-%d %H:%i'",
            DateGranularity::Second => "'%Y-%m-%d %H:%i:%s'",
        };
        format_call(sql, "date_format", expr, pattern);
    }

    fn paginate(
        &self,
        select_sql: &str,
        from_where_sql: &str,
        limit: i64,
        offset: i64,
    ) -> PaginateSql {
        PaginateSql {
            sql: format!("{select_sql}{from_where_sql} limit ?, ?"),
            params: vec![SqlParam::Int(offset), SqlParam::Int(limit)],
        }
    }
}
