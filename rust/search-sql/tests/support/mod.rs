#![allow(dead_code)]

use search_sql::{
    config::ResolverConfig, resolver::SqlResolver, schema::SearchSchema, DialectKind, FieldMeta,
    FieldType,
};

pub const USER_TABLES: &str = "users u left join depts d on d.id = u.dept_id";

pub const USER_SELECT: &str =
    "select u.id id, u.name user_name, u.status status, u.created_at created_at, d.name dept_name";

pub fn resolver(kind: DialectKind) -> SqlResolver {
    SqlResolver::new(ResolverConfig::embedded(kind))
}

pub fn mysql() -> SqlResolver {
    resolver(DialectKind::MySql)
}

fn user_fields() -> search_sql::schema::SearchSchemaBuilder {
    SearchSchema::builder(USER_TABLES)
        .field(FieldMeta::new("id", "u.id").field_type(FieldType::Integer))
        .field(FieldMeta::new("name", "u.name").alias("user_name"))
        .field(FieldMeta::new("status", "u.status"))
        .field(
            FieldMeta::new("created", "u.created_at")
                .alias("created_at")
                .field_type(FieldType::DateTime),
        )
        .field(FieldMeta::new("dept", "d.name").alias("dept_name"))
}

pub fn users() -> SearchSchema {
    user_fields().build().expect("user schema is valid")
}

pub fn active_users() -> SearchSchema {
    user_fields()
        .join_cond("u.deleted = 0")
        .build()
        .expect("active user schema is valid")
}

pub fn distinct_users() -> SearchSchema {
    user_fields()
        .distinct(true)
        .build()
        .expect("distinct user schema is valid")
}

pub fn tickets() -> SearchSchema {
    SearchSchema::builder("tickets")
        .field(FieldMeta::new("id", "id"))
        .field(FieldMeta::new("status", "status"))
        .build()
        .expect("ticket schema is valid")
}

pub fn order_totals(distinct: bool) -> SearchSchema {
    SearchSchema::builder("orders o")
        .field(FieldMeta::new("customer", "o.customer_id").alias("customer_id"))
        .field(FieldMeta::new("total", "sum(o.amount)").alias("total"))
        .group_by("o.customer_id")
        .distinct(distinct)
        .build()
        .expect("order schema is valid")
}
