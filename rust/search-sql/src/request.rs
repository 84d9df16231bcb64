//! Search request as handed over by the parameter-parsing layer.

use crate::operator::FieldOp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParam {
    pub field: String,
    pub op: FieldOp,
    /// Raw values in caller order; `None` marks an absent slot.
    #[serde(default)]
    pub values: Vec<Option<String>>,
    #[serde(default)]
    pub ignore_case: bool,
}

impl FilterParam {
    pub fn new(field: impl Into<String>, op: FieldOp) -> Self {
        Self {
            field: field.into(),
            op,
            values: Vec::new(),
            ignore_case: false,
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.values.push(Some(value.into()));
        self
    }

    pub fn null(mut self) -> Self {
        self.values.push(None);
        self
    }

    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            OrderDirection::Asc => "asc",
            OrderDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub filters: Vec<FilterParam>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub order: Option<OrderDirection>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

impl SearchRequest {
    pub fn filter(mut self, filter: FilterParam) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sort(mut self, field: impl Into<String>, order: Option<OrderDirection>) -> Self {
        self.sort = Some(field.into());
        self.order = order;
        self
    }

    pub fn page(mut self, limit: i64, offset: i64) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }
}
