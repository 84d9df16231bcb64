//! Field-to-column mapping for one searchable view of the database.

use crate::error::{Result, SearchSqlError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declared value type of a field; only used to decide whether date truncation applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    Text,
    Integer,
    Decimal,
    Boolean,
    Date,
    DateTime,
    Time,
}

impl FieldType {
    pub fn is_temporal(self) -> bool {
        matches!(self, FieldType::Date | FieldType::DateTime | FieldType::Time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMeta {
    pub name: String,
    pub column: String,
    /// Output alias; defaults to the field name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, rename = "type")]
    pub field_type: FieldType,
}

impl FieldMeta {
    pub fn new(name: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
            alias: None,
            field_type: FieldType::default(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    pub fn output_alias(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// Immutable, validated mapping shared read-only across resolutions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchema")]
pub struct SearchSchema {
    fields: Vec<FieldMeta>,
    tables: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    join_cond: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group_by: Option<String>,
    distinct: bool,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl SearchSchema {
    pub fn builder(tables: impl Into<String>) -> SearchSchemaBuilder {
        SearchSchemaBuilder {
            raw: RawSchema {
                tables: tables.into(),
                fields: Vec::new(),
                join_cond: None,
                group_by: None,
                distinct: false,
            },
        }
    }

    pub fn fields(&self) -> &[FieldMeta] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldMeta> {
        self.index.get(name).map(|&idx| &self.fields[idx])
    }

    pub fn tables(&self) -> &str {
        &self.tables
    }

    pub fn join_cond(&self) -> Option<&str> {
        self.join_cond.as_deref()
    }

    pub fn group_by(&self) -> Option<&str> {
        self.group_by.as_deref()
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }
}

pub struct SearchSchemaBuilder {
    raw: RawSchema,
}

impl SearchSchemaBuilder {
    pub fn field(mut self, field: FieldMeta) -> Self {
        self.raw.fields.push(field);
        self
    }

    pub fn join_cond(mut self, cond: impl Into<String>) -> Self {
        self.raw.join_cond = Some(cond.into());
        self
    }

    pub fn group_by(mut self, columns: impl Into<String>) -> Self {
        self.raw.group_by = Some(columns.into());
        self
    }

    pub fn distinct(mut self, distinct: bool) -> Self {
        self.raw.distinct = distinct;
        self
    }

    pub fn build(self) -> Result<SearchSchema> {
        SearchSchema::try_from(self.raw)
    }
}

#[derive(Debug, Deserialize)]
struct RawSchema {
    tables: String,
    fields: Vec<FieldMeta>,
    #[serde(default)]
    join_cond: Option<String>,
    #[serde(default)]
    group_by: Option<String>,
    #[serde(default)]
    distinct: bool,
}

impl TryFrom<RawSchema> for SearchSchema {
    type Error = SearchSqlError;

    fn try_from(raw: RawSchema) -> Result<Self> {
        let tables = raw.tables.trim().to_string();
        if tables.is_empty() {
            return Err(SearchSqlError::Config(
                "schema requires a tables clause".into(),
            ));
        }
        if raw.fields.is_empty() {
            return Err(SearchSqlError::Config(
                "schema requires at least one field".into(),
            ));
        }

        let mut index = HashMap::with_capacity(raw.fields.len());
        for (idx, field) in raw.fields.iter().enumerate() {
            if field.column.trim().is_empty() {
                return Err(SearchSqlError::Config(format!(
                    "field '{}' has no column expression",
                    field.name
                )));
            }
            if index.insert(field.name.clone(), idx).is_some() {
                return Err(SearchSqlError::Config(format!(
                    "duplicate field '{}'",
                    field.name
                )));
            }
        }

        Ok(Self {
            fields: raw.fields,
            tables,
            join_cond: non_blank(raw.join_cond),
            group_by: non_blank(raw.group_by),
            distinct: raw.distinct,
            index,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
