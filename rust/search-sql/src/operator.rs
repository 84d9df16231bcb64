//! Comparison operators and the SQL fragments they render.

use crate::{
    dialect::Dialect,
    error::{Result, SearchSqlError},
    value::{first_present, is_blank, DateLiteral},
};
use once_cell::sync::Lazy;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{collections::HashMap, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldOp {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterEqual,
    LessThan,
    LessEqual,
    Include,
    StartWith,
    EndWith,
    Empty,
    NotEmpty,
    Between,
    MultiValue,
}

static BY_TOKEN: Lazy<HashMap<&'static str, FieldOp>> = Lazy::new(|| {
    FieldOp::ALL
        .iter()
        .flat_map(|&op| [(op.name(), op), (op.alias(), op)])
        .collect()
});

impl FieldOp {
    pub const ALL: [FieldOp; 13] = [
        FieldOp::Equal,
        FieldOp::NotEqual,
        FieldOp::GreaterThan,
        FieldOp::GreaterEqual,
        FieldOp::LessThan,
        FieldOp::LessEqual,
        FieldOp::Include,
        FieldOp::StartWith,
        FieldOp::EndWith,
        FieldOp::Empty,
        FieldOp::NotEmpty,
        FieldOp::Between,
        FieldOp::MultiValue,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FieldOp::Equal => "Equal",
            FieldOp::NotEqual => "NotEqual",
            FieldOp::GreaterThan => "GreaterThan",
            FieldOp::GreaterEqual => "GreaterEqual",
            FieldOp::LessThan => "LessThan",
            FieldOp::LessEqual => "LessEqual",
            FieldOp::Include => "Include",
            FieldOp::StartWith => "StartWith",
            FieldOp::EndWith => "EndWith",
            FieldOp::Empty => "Empty",
            FieldOp::NotEmpty => "NotEmpty",
            FieldOp::Between => "Between",
            FieldOp::MultiValue => "MultiValue",
        }
    }

    /// Short wire-level token.
    pub fn alias(self) -> &'static str {
        match self {
            FieldOp::Equal => "eq",
            FieldOp::NotEqual => "ne",
            FieldOp::GreaterThan => "gt",
            FieldOp::GreaterEqual => "ge",
            FieldOp::LessThan => "lt",
            FieldOp::LessEqual => "le",
            FieldOp::Include => "ct",
            FieldOp::StartWith => "sw",
            FieldOp::EndWith => "ew",
            FieldOp::Empty => "ey",
            FieldOp::NotEmpty => "ny",
            FieldOp::Between => "bt",
            FieldOp::MultiValue => "mv",
        }
    }

    pub fn is_named(self, token: &str) -> bool {
        token == self.name() || token == self.alias()
    }

    pub fn from_token(token: &str) -> Result<Self> {
        BY_TOKEN
            .get(token)
            .copied()
            .ok_or_else(|| SearchSqlError::UnknownOperator(token.to_string()))
    }

    /// Operators that bind nothing and ignore the values array.
    pub fn is_lonely(self) -> bool {
        matches!(self, FieldOp::Empty | FieldOp::NotEmpty)
    }

    /// False only for MultiValue, which renders the field expression once per disjunct.
    pub fn expects_field_prefix(self) -> bool {
        !matches!(self, FieldOp::MultiValue)
    }

    /// Predicates joined internally by a bare `or` that must be grouped inside a conjunction.
    pub fn needs_grouping(self) -> bool {
        matches!(self, FieldOp::Empty)
    }

    /// Value that decides the date granularity of the prefixed field expression.
    pub fn expr_hint(self, values: &[Option<String>]) -> Option<&str> {
        match self {
            FieldOp::Empty | FieldOp::NotEmpty | FieldOp::MultiValue => None,
            FieldOp::Between => values
                .iter()
                .map(Option::as_deref)
                .find(|value| !is_blank(*value))
                .flatten(),
            _ => first_present(values),
        }
    }

    /// Appends this operator's fragment after an already emitted field
    /// expression and returns the values to bind, in placeholder order.
    ///
    /// Returns `Ok(None)` when the filter contributes no predicate at all; the
    /// caller must then drop whatever it emitted for this filter.
    pub fn operate(
        self,
        sql: &mut String,
        field: &FieldExpr<'_>,
        values: &[Option<String>],
    ) -> Result<Option<Vec<String>>> {
        let params = match self {
            FieldOp::Equal => compare(sql, " = ?", self, values)?,
            FieldOp::NotEqual => compare(sql, " != ?", self, values)?,
            FieldOp::GreaterThan => compare(sql, " > ?", self, values)?,
            FieldOp::GreaterEqual => compare(sql, " >= ?", self, values)?,
            FieldOp::LessThan => compare(sql, " < ?", self, values)?,
            FieldOp::LessEqual => compare(sql, " <= ?", self, values)?,
            FieldOp::Include => {
                let value = scalar(self, values)?;
                sql.push_str(" like ?");
                vec![format!("%{value}%")]
            }
            FieldOp::StartWith => {
                let value = scalar(self, values)?;
                sql.push_str(" like ?");
                vec![format!("{value}%")]
            }
            FieldOp::EndWith => {
                let value = scalar(self, values)?;
                sql.push_str(" like ?");
                vec![format!("%{value}")]
            }
            FieldOp::Empty => {
                sql.push_str(" is null or ");
                field.render(sql, None);
                sql.push_str(" = ''");
                Vec::new()
            }
            FieldOp::NotEmpty => {
                sql.push_str(" is not null and ");
                field.render(sql, None);
                sql.push_str(" != ''");
                Vec::new()
            }
            FieldOp::Between => return between(sql, values),
            FieldOp::MultiValue => multi_value(sql, field, values)?,
        };
        Ok(Some(params))
    }
}

fn scalar(op: FieldOp, values: &[Option<String>]) -> Result<&str> {
    first_present(values).ok_or_else(|| SearchSqlError::arity(op.name(), "requires a value"))
}

fn compare(
    sql: &mut String,
    fragment: &str,
    op: FieldOp,
    values: &[Option<String>],
) -> Result<Vec<String>> {
    let value = scalar(op, values)?;
    sql.push_str(fragment);
    Ok(vec![value.to_string()])
}

fn between(sql: &mut String, values: &[Option<String>]) -> Result<Option<Vec<String>>> {
    let [lower, upper] = values else {
        return Err(SearchSqlError::arity(
            FieldOp::Between.name(),
            format!("requires exactly 2 values, got {}", values.len()),
        ));
    };

    let lower = lower.as_deref().filter(|v| !is_blank(Some(*v)));
    let upper = upper.as_deref().filter(|v| !is_blank(Some(*v)));

    let params = match (lower, upper) {
        (Some(lower), Some(upper)) => {
            sql.push_str(" between ? and ?");
            vec![lower.to_string(), upper.to_string()]
        }
        (None, Some(upper)) => {
            sql.push_str(" <= ?");
            vec![upper.to_string()]
        }
        (Some(lower), None) => {
            sql.push_str(" >= ?");
            vec![lower.to_string()]
        }
        (None, None) => return Ok(None),
    };
    Ok(Some(params))
}

fn multi_value(
    sql: &mut String,
    field: &FieldExpr<'_>,
    values: &[Option<String>],
) -> Result<Vec<String>> {
    let present: Vec<&str> = values.iter().flatten().map(String::as_str).collect();
    if present.is_empty() {
        return Err(SearchSqlError::arity(
            FieldOp::MultiValue.name(),
            "requires at least one value",
        ));
    }

    let mut params = Vec::with_capacity(present.len());
    sql.push('(');
    for (idx, value) in present.into_iter().enumerate() {
        if idx > 0 {
            sql.push_str(" or ");
        }
        if value.eq_ignore_ascii_case("null") {
            sql.push_str(field.column());
            sql.push_str(" is null");
        } else {
            field.render(sql, Some(value));
            sql.push_str(" = ?");
            params.push(value.to_string());
        }
    }
    sql.push(')');
    Ok(params)
}

/// Column expression of one filter. Case folding wins over date truncation;
/// truncation is decided per value so MultiValue disjuncts can differ.
#[derive(Debug, Clone, Copy)]
pub struct FieldExpr<'a> {
    column: &'a str,
    fold_case: bool,
    temporal: bool,
    dialect: &'a dyn Dialect,
}

impl<'a> FieldExpr<'a> {
    pub fn new(column: &'a str, fold_case: bool, temporal: bool, dialect: &'a dyn Dialect) -> Self {
        Self {
            column,
            fold_case,
            temporal,
            dialect,
        }
    }

    pub fn column(&self) -> &str {
        self.column
    }

    pub fn render(&self, sql: &mut String, hint: Option<&str>) {
        if self.fold_case {
            self.dialect.case_fold(sql, self.column);
            return;
        }

        match hint.filter(|_| self.temporal).and_then(DateLiteral::parse) {
            Some(literal) => self
                .dialect
                .date_truncate(sql, self.column, literal.granularity),
            None => sql.push_str(self.column),
        }
    }
}

impl fmt::Display for FieldOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for FieldOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for FieldOp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        FieldOp::from_token(&token).map_err(de::Error::custom)
    }
}
