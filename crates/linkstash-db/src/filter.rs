//! Typed filter clause builder for bookmark queries.
//!
//! List queries compose a fixed ownership + soft-delete predicate with
//! optional search and tag predicates. This builder accumulates the clauses
//! and compiles them into one parameterized WHERE fragment, shared verbatim
//! by the row query and the count query so both always agree.

use uuid::Uuid;

use crate::escape_like;

/// Type-safe parameter binding for dynamically built SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    /// Single UUID parameter.
    Uuid(Uuid),
    /// String parameter.
    String(String),
}

/// Generates the WHERE clause for bookmark list/count queries.
///
/// Rows are aliased `l` in the generated SQL. The base predicate
/// (`user_id` match plus `deleted_at IS NULL`) is always present; search
/// and tag predicates are conjoined when set.
///
/// # Example
///
/// ```rust,ignore
/// let builder = LinkFilterQueryBuilder::new(user_id, 0)
///     .with_search(Some("rust".to_string()))
///     .with_tag(Some("reading".to_string()));
/// let (sql, params) = builder.build();
/// // sql: "l.user_id = $1 AND l.deleted_at IS NULL AND (l.title ILIKE $2 ..."
/// ```
#[derive(Debug, Clone)]
pub struct LinkFilterQueryBuilder {
    user_id: Uuid,
    search: Option<String>,
    tag: Option<String>,
    param_offset: usize,
}

impl LinkFilterQueryBuilder {
    /// Create a builder scoped to `user_id`.
    ///
    /// `param_offset` is the number of parameters already bound in the
    /// enclosing query; generated ordinals start after it.
    pub fn new(user_id: Uuid, param_offset: usize) -> Self {
        Self {
            user_id,
            search: None,
            tag: None,
            param_offset,
        }
    }

    /// Add a case-insensitive substring search over title, description, URL.
    ///
    /// The input is matched literally: LIKE wildcards it contains are
    /// escaped before the pattern is built. Empty strings are ignored.
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search.filter(|s| !s.is_empty());
        self
    }

    /// Add an exact, case-sensitive tag element match. Empty strings are
    /// ignored.
    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag.filter(|t| !t.is_empty());
        self
    }

    /// Build the WHERE fragment and its parameters in bind order.
    pub fn build(&self) -> (String, Vec<QueryParam>) {
        let mut clauses = Vec::new();
        let mut params = Vec::new();
        let mut param_idx = self.param_offset;

        param_idx += 1;
        clauses.push(format!("l.user_id = ${}", param_idx));
        params.push(QueryParam::Uuid(self.user_id));

        clauses.push("l.deleted_at IS NULL".to_string());

        if let Some(search) = &self.search {
            let pattern = format!("%{}%", escape_like(search));
            clauses.push(format!(
                "(l.title ILIKE ${} ESCAPE '\\' OR l.description ILIKE ${} ESCAPE '\\' OR l.url ILIKE ${} ESCAPE '\\')",
                param_idx + 1,
                param_idx + 2,
                param_idx + 3
            ));
            for _ in 0..3 {
                params.push(QueryParam::String(pattern.clone()));
            }
            param_idx += 3;
        }

        if let Some(tag) = &self.tag {
            param_idx += 1;
            clauses.push(format!("l.tags @> ARRAY[${}]::text[]", param_idx));
            params.push(QueryParam::String(tag.clone()));
        }

        (clauses.join(" AND "), params)
    }
}
