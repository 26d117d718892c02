use super::error::FilterError;

/// Columns a summary list may be ordered by
pub const SORTABLE_COLUMNS: &[&str] = &["settings_data_id", "key", "value", "valid_from", "valid_to"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortTerm {
    pub column: String,
    pub direction: SortDirection,
}

/// Validated `sort_expression`, e.g. `"key desc, valid_from"`.
///
/// The store builds the ORDER BY itself; this only guarantees the expression
/// names known columns and directions before it is forwarded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortExpression {
    raw: String,
    terms: Vec<SortTerm>,
}

impl SortExpression {
    pub fn parse(expression: &str) -> Result<Self, FilterError> {
        let raw = expression.trim().to_string();
        let mut terms = Vec::new();

        for part in raw.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut it = trimmed.split_whitespace();
            let column = it.next().unwrap_or_default();
            let column_lower = column.to_ascii_lowercase();
            if !SORTABLE_COLUMNS.contains(&column_lower.as_str()) {
                return Err(FilterError::InvalidColumn(column.to_string()));
            }

            let direction = match it.next() {
                None => SortDirection::Asc,
                Some(dir) if dir.eq_ignore_ascii_case("asc") => SortDirection::Asc,
                Some(dir) if dir.eq_ignore_ascii_case("desc") => SortDirection::Desc,
                Some(dir) => return Err(FilterError::InvalidDirection(dir.to_string())),
            };

            if it.next().is_some() {
                return Err(FilterError::InvalidTerm(trimmed.to_string()));
            }

            terms.push(SortTerm {
                column: column_lower,
                direction,
            });
        }

        Ok(Self { raw, terms })
    }

    /// Expression as forwarded to the store
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn terms(&self) -> &[SortTerm] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
