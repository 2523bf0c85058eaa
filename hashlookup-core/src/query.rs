//! Parameterized match query construction.
//!
//! Identifiers (table and column names) come only from an introspected
//! [`TableLayout`] and are double-quote escaped. Every user-derived value,
//! digests and patterns alike, is bound as a parameter.

use crate::models::MATCHED_COL;
use crate::schema::{ColumnDescriptor, TableLayout};

/// A ready-to-run query: SQL text plus positional text parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchQuery {
    /// Short description used in logs and error context
    pub label: String,
    /// SQL with `?` placeholders
    pub sql: String,
    /// Values bound to the placeholders, in order
    pub params: Vec<String>,
}

/// Quotes an identifier for SQLite, doubling embedded quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Escapes `LIKE` wildcards so the text matches literally with `ESCAPE '\'`.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Rows where any of `columns` equals any of `digests`.
///
/// Produces a single row-level predicate, `a IN (?, ?) OR b IN (?, ?)`, so a
/// row matching several columns is still returned once. A single digest uses
/// `=` instead of a one-element `IN` list. Returns `None` when there is
/// nothing to match against.
pub fn hash_columns_match(
    layout: &TableLayout,
    columns: &[&ColumnDescriptor],
    digests: &[String],
    label: &str,
) -> Option<MatchQuery> {
    if columns.is_empty() || digests.is_empty() {
        return None;
    }

    let comparison = if digests.len() == 1 {
        "= ?".to_string()
    } else {
        format!("IN ({})", vec!["?"; digests.len()].join(", "))
    };

    let predicate = columns
        .iter()
        .map(|column| format!("{} {}", quote_identifier(&column.name), comparison))
        .collect::<Vec<_>>()
        .join(" OR ");

    let params = columns
        .iter()
        .flat_map(|_| digests.iter().cloned())
        .collect();

    Some(MatchQuery {
        label: label.to_string(),
        sql: format!(
            "SELECT * FROM {} WHERE {}",
            quote_identifier(&layout.table),
            predicate
        ),
        params,
    })
}

/// Rows whose `column` contains `needle`, case-insensitively, tagged with
/// the matching column name under `matched_col`.
pub fn address_match(layout: &TableLayout, column: &ColumnDescriptor, needle: &str) -> MatchQuery {
    MatchQuery {
        label: format!("address lookup on '{}'", column.name),
        sql: format!(
            "SELECT *, ? AS {} FROM {} WHERE lower({}) LIKE lower(?) ESCAPE '\\'",
            quote_identifier(MATCHED_COL),
            quote_identifier(&layout.table),
            quote_identifier(&column.name)
        ),
        params: vec![column.name.clone(), format!("%{}%", escape_like(needle))],
    }
}

/// Rows whose JSON hash array in `column` contains `digest`.
///
/// NULL cells, malformed JSON and non-array JSON are treated as empty
/// arrays. Membership is tested with `EXISTS`, so a row whose array holds
/// the digest several times is returned once, not once per occurrence as a
/// plain join against `json_each` would return it.
pub fn hash_array_match(layout: &TableLayout, column: &ColumnDescriptor, digest: &str) -> MatchQuery {
    let cell = format!("t.{}", quote_identifier(&column.name));
    MatchQuery {
        label: "hash array lookup".to_string(),
        sql: format!(
            "SELECT * FROM {table} AS t WHERE EXISTS (\
             SELECT 1 FROM json_each(\
             CASE WHEN json_valid({cell}) THEN \
             CASE WHEN json_type({cell}) = 'array' THEN {cell} ELSE '[]' END \
             ELSE '[]' END) AS je \
             WHERE je.type = 'text' AND je.value = ?)",
            table = quote_identifier(&layout.table),
            cell = cell
        ),
        params: vec![digest.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> TableLayout {
        TableLayout::new(
            "Users",
            ["id", "full_address", "phone_sha256", "email_sha", "row_hashes"],
        )
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("Users"), "\"Users\"");
        assert_eq!(quote_identifier("weird\"name"), "\"weird\"\"name\"");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("Main St"), "Main St");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }

    #[test]
    fn test_hash_columns_match_multiple_digests() {
        let layout = layout();
        let digests = vec!["d1".to_string(), "d2".to_string()];
        let query = hash_columns_match(&layout, &layout.hash_columns(), &digests, "phone").unwrap();

        assert_eq!(
            query.sql,
            "SELECT * FROM \"Users\" WHERE \"phone_sha256\" IN (?, ?) OR \"email_sha\" IN (?, ?)"
        );
        assert_eq!(query.params, ["d1", "d2", "d1", "d2"]);
    }

    #[test]
    fn test_hash_columns_match_single_digest() {
        let layout = layout();
        let digests = vec!["d1".to_string()];
        let query = hash_columns_match(&layout, &layout.hash_columns(), &digests, "hash").unwrap();

        assert_eq!(
            query.sql,
            "SELECT * FROM \"Users\" WHERE \"phone_sha256\" = ? OR \"email_sha\" = ?"
        );
        assert_eq!(query.params, ["d1", "d1"]);
    }

    #[test]
    fn test_hash_columns_match_nothing_to_match() {
        let layout = TableLayout::new("notes", ["id", "body"]);
        let digests = vec!["d1".to_string()];
        assert!(hash_columns_match(&layout, &layout.hash_columns(), &digests, "hash").is_none());

        let layout = self::layout();
        assert!(hash_columns_match(&layout, &layout.hash_columns(), &[], "hash").is_none());
    }

    #[test]
    fn test_address_match_binds_query_and_tag() {
        let layout = layout();
        let column = layout.address_columns()[0];
        let query = address_match(&layout, column, "Robert'); DROP TABLE Users;--");

        assert!(!query.sql.contains("DROP"));
        assert!(query.sql.contains("lower(\"full_address\") LIKE lower(?)"));
        assert!(query.sql.starts_with("SELECT *, ? AS \"matched_col\""));
        assert_eq!(query.params[0], "full_address");
        assert_eq!(query.params[1], "%Robert'); DROP TABLE Users;--%");
    }

    #[test]
    fn test_hash_array_match_binds_digest() {
        let layout = layout();
        let column = layout.hash_array_column().unwrap();
        let query = hash_array_match(&layout, column, "abc123");

        assert!(query.sql.contains("json_each("));
        assert!(query.sql.contains("t.\"row_hashes\""));
        assert!(!query.sql.contains("abc123"));
        assert_eq!(query.params, ["abc123"]);
    }

    #[test]
    fn test_table_name_is_escaped() {
        let layout = TableLayout::new("odd\"table", ["x_sha"]);
        let digests = vec!["d".to_string()];
        let query = hash_columns_match(&layout, &layout.hash_columns(), &digests, "hash").unwrap();
        assert!(query.sql.contains("FROM \"odd\"\"table\""));
    }
}
