use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchSqlError>;

#[derive(Debug, Error)]
pub enum SearchSqlError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("{op} {detail}")]
    Arity { op: &'static str, detail: String },
}

impl SearchSqlError {
    pub(crate) fn arity(op: &'static str, detail: impl Into<String>) -> Self {
        Self::Arity {
            op,
            detail: detail.into(),
        }
    }

    /// True for errors caused by the caller's request rather than the schema or dialect setup.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            SearchSqlError::UnknownOperator(_) | SearchSqlError::Arity { .. }
        )
    }
}
