use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid sort column: {0}")]
    InvalidColumn(String),

    #[error("Invalid sort direction: {0}")]
    InvalidDirection(String),

    #[error("Invalid sort term: {0}")]
    InvalidTerm(String),

    #[error("Invalid skip_count: {0}")]
    InvalidSkip(i64),

    #[error("Invalid page_size: {0} (allowed 1..={1})")]
    InvalidPageSize(i64, i64),
}
