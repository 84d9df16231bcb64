//! Resolved statements handed to the execution layer.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "t", content = "v", rename_all = "snake_case")]
pub enum SqlParam {
    Text(String),
    Int(i64),
}

impl SqlParam {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// A paginated listing statement and its matching count statement.
///
/// Filter-derived parameters appear in the same order in both lists; the
/// listing parameters additionally end with whatever the dialect's pagination
/// clause binds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedQuery {
    pub list_sql: String,
    pub list_params: Vec<SqlParam>,
    pub count_sql: String,
    pub count_params: Vec<SqlParam>,
    /// Output aliases in select-list order.
    pub aliases: Vec<String>,
    pub limit: i64,
    pub offset: i64,
}

impl ResolvedQuery {
    /// Copy with `?` placeholders rewritten to `$1..$n` in both statements.
    pub fn numbered(&self) -> Self {
        Self {
            list_sql: rewrite_placeholders(&self.list_sql),
            count_sql: rewrite_placeholders(&self.count_sql),
            ..self.clone()
        }
    }
}

/// Tracks whether the scan is inside a string literal or a quoted identifier.
#[derive(Default)]
struct QuoteScan {
    open: Option<char>,
}

impl QuoteScan {
    /// True when `ch` is a bind placeholder.
    fn is_placeholder(&mut self, ch: char) -> bool {
        match self.open {
            Some(quote) if ch == quote => self.open = None,
            Some(_) => {}
            None if matches!(ch, '\'' | '"' | '`') => self.open = Some(ch),
            None => return ch == '?',
        }
        false
    }
}

fn rewrite_placeholders(sql: &str) -> String {
    let mut result = String::with_capacity(sql.len() + 8);
    let mut scan = QuoteScan::default();
    let mut index = 1;
    for ch in sql.chars() {
        if scan.is_placeholder(ch) {
            result.push('$');
            result.push_str(&index.to_string());
            index += 1;
        } else {
            result.push(ch);
        }
    }
    result
}

/// Number of `?` placeholders outside string literals and quoted identifiers.
pub fn placeholder_count(sql: &str) -> usize {
    let mut scan = QuoteScan::default();
    sql.chars().filter(|&ch| scan.is_placeholder(ch)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbered_rewrites_both_statements() {
        let query = ResolvedQuery {
            list_sql: "select a from t where a = ? and b like ? limit ? offset ?".into(),
            list_params: vec![
                SqlParam::text("x"),
                SqlParam::text("%y%"),
                SqlParam::Int(10),
                SqlParam::Int(0),
            ],
            count_sql: "select count(1) from t where a = ? and b like ?".into(),
            count_params: vec![SqlParam::text("x"), SqlParam::text("%y%")],
            aliases: vec!["a".into()],
            limit: 10,
            offset: 0,
        };

        let numbered = query.numbered();
        assert_eq!(
            numbered.list_sql,
            "select a from t where a = $1 and b like $2 limit $3 offset $4"
        );
        assert_eq!(
            numbered.count_sql,
            "select count(1) from t where a = $1 and b like $2"
        );
        assert_eq!(numbered.list_params, query.list_params);
    }

    #[test]
    fn question_marks_inside_literals_are_not_placeholders() {
        let sql = "select a from t where (a = '?') and b = ?";
        assert_eq!(placeholder_count(sql), 1);
        assert_eq!(
            rewrite_placeholders(sql),
            "select a from t where (a = '?') and b = $1"
        );
    }

    #[test]
    fn apostrophes_in_quoted_identifiers_do_not_open_literals() {
        let sql = r#"select "o'neil" n, `it's` i from t where "o'neil" = ? and b = '?' limit ?, ?"#;
        assert_eq!(placeholder_count(sql), 3);
        assert_eq!(
            rewrite_placeholders(sql),
            r#"select "o'neil" n, `it's` i from t where "o'neil" = $1 and b = '?' limit $2, $3"#
        );
    }

    #[test]
    fn doubled_apostrophes_stay_inside_the_literal() {
        let sql = "select a from t where a = 'it''s ?' and b = ?";
        assert_eq!(placeholder_count(sql), 1);
        assert_eq!(
            rewrite_placeholders(sql),
            "select a from t where a = 'it''s ?' and b = $1"
        );
    }

    #[test]
    fn params_serialize_tagged() {
        let json = serde_json::to_value(vec![SqlParam::text("a"), SqlParam::Int(5)]).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"t": "text", "v": "a"}, {"t": "int", "v": 5}])
        );
    }
}
