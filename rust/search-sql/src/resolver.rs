//! Assembles listing and count statements from a schema and a search request.

use crate::{
    config::ResolverConfig,
    dialect::Dialect,
    error::{Result, SearchSqlError},
    operator::FieldExpr,
    query::{ResolvedQuery, SqlParam},
    request::{FilterParam, SearchRequest},
    schema::SearchSchema,
    value::upper_cased,
};
use std::{borrow::Cow, sync::Arc};
use tracing::debug;

const COUNT_ALIAS_SEED: &str = "tbl_a_";

/// Stateless apart from its read-only dialect and limits; share one across threads.
#[derive(Debug, Clone)]
pub struct SqlResolver {
    dialect: Arc<dyn Dialect>,
    config: ResolverConfig,
}

impl SqlResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            dialect: config.build_dialect(),
            config,
        }
    }

    /// Uses a caller-supplied dialect; `config.dialect` is then ignored.
    pub fn with_dialect(dialect: Arc<dyn Dialect>, config: ResolverConfig) -> Self {
        Self { dialect, config }
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    pub fn resolve(&self, schema: &SearchSchema, request: &SearchRequest) -> Result<ResolvedQuery> {
        let (select_sql, aliases) = select_clause(schema);

        let mut filter_params = Vec::new();
        let mut predicates = Vec::with_capacity(request.filters.len());
        for filter in &request.filters {
            if let Some((predicate, params)) = self.filter_predicate(schema, filter)? {
                predicates.push(predicate);
                filter_params.extend(params.into_iter().map(SqlParam::text));
            }
        }

        let mut from_where = format!(" from {}", schema.tables());
        let mut conditions = Vec::with_capacity(predicates.len() + 1);
        if let Some(join_cond) = schema.join_cond() {
            conditions.push(format!("({join_cond})"));
        }
        conditions.extend(predicates);
        if !conditions.is_empty() {
            from_where.push_str(" where ");
            from_where.push_str(&conditions.join(" and "));
        }
        if let Some(group_by) = schema.group_by() {
            from_where.push_str(" group by ");
            from_where.push_str(group_by);
        }

        let count_sql = count_clause(schema, &select_sql, &from_where);

        let sort_alias = request
            .sort
            .as_deref()
            .and_then(|field| schema.field(field))
            .map(|meta| meta.output_alias());
        if let Some(alias) = sort_alias {
            from_where.push_str(" order by ");
            from_where.push_str(alias);
            if let Some(order) = request.order {
                from_where.push(' ');
                from_where.push_str(order.as_sql());
            }
        }

        let limit = self.config.determine_limit(request.limit);
        let offset = request.offset.unwrap_or(0).max(0);
        let page = self
            .dialect
            .paginate(&select_sql, &from_where, limit, offset);

        let mut list_params = filter_params.clone();
        list_params.extend(page.params);

        debug!(
            dialect = self.dialect().name(),
            filters = request.filters.len(),
            list_params = list_params.len(),
            count_params = filter_params.len(),
            "resolved search sql"
        );

        Ok(ResolvedQuery {
            list_sql: page.sql,
            list_params,
            count_sql,
            count_params: filter_params,
            aliases,
            limit,
            offset,
        })
    }

    /// Renders one filter; `None` when it contributes no predicate.
    fn filter_predicate(
        &self,
        schema: &SearchSchema,
        filter: &FilterParam,
    ) -> Result<Option<(String, Vec<String>)>> {
        let meta = schema
            .field(&filter.field)
            .ok_or_else(|| SearchSqlError::UnknownField(filter.field.clone()))?;

        let values: Cow<'_, [Option<String>]> = if filter.ignore_case {
            Cow::Owned(upper_cased(&filter.values))
        } else {
            Cow::Borrowed(filter.values.as_slice())
        };

        let field = FieldExpr::new(
            &meta.column,
            filter.ignore_case,
            meta.field_type.is_temporal(),
            self.dialect(),
        );

        let op = filter.op;
        let mut predicate = String::new();
        if op.expects_field_prefix() {
            field.render(&mut predicate, op.expr_hint(&values));
        }
        let Some(params) = op.operate(&mut predicate, &field, &values)? else {
            return Ok(None);
        };

        if op.needs_grouping() {
            predicate = format!("({predicate})");
        }
        Ok(Some((predicate, params)))
    }
}

fn select_clause(schema: &SearchSchema) -> (String, Vec<String>) {
    let mut sql = String::from("select ");
    if schema.is_distinct() {
        sql.push_str("distinct ");
    }

    let mut aliases = Vec::with_capacity(schema.fields().len());
    for (idx, field) in schema.fields().iter().enumerate() {
        if idx > 0 {
            sql.push_str(", ");
        }
        sql.push_str(&field.column);
        sql.push(' ');
        sql.push_str(field.output_alias());
        aliases.push(field.output_alias().to_string());
    }
    (sql, aliases)
}

/// Grouped or distinct listings are counted by wrapping them, so the count is
/// of groups or distinct rows rather than base rows.
fn count_clause(schema: &SearchSchema, select_sql: &str, from_where: &str) -> String {
    if schema.is_distinct() {
        wrap_count(&format!("{select_sql}{from_where}"))
    } else if schema.group_by().is_some() {
        wrap_count(&format!("select count(1){from_where}"))
    } else {
        format!("select count(1){from_where}")
    }
}

fn wrap_count(inner: &str) -> String {
    let alias = unique_alias(inner);
    format!("select count(1) from ({inner}) {alias}")
}

fn unique_alias(sql: &str) -> String {
    let mut alias = COUNT_ALIAS_SEED.to_string();
    while sql.contains(&alias) {
        alias.push('_');
    }
    alias
}
