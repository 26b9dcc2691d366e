//! Builds the SELECT statement for the post read pages.
//!
//! The search, filter, sort, and browse pages all share the same contract:
//! zero or more optional predicates combined with AND, and a sort order
//! resolved through a fixed allow-list. Everything except the allow-listed
//! sort direction travels as a bound parameter, never as statement text.

use rusqlite::{ToSql, types::Value};

use crate::database_id::DatabaseID;

/// Allow-listed sort order for post listings.
///
/// Caller-supplied sort tokens are resolved to one of these two variants;
/// anything unrecognized falls back to [SortOrder::Newest]. The direction
/// keyword is taken from the variant, so caller input never reaches the
/// ORDER BY clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most recently created posts first (the default).
    #[default]
    Newest,
    /// Oldest posts first.
    Oldest,
}

impl SortOrder {
    /// Resolve a caller-supplied token, falling back to newest-first.
    pub fn parse(token: &str) -> Self {
        match token {
            "oldest" => Self::Oldest,
            _ => Self::Newest,
        }
    }

    /// The token used in URLs and form values.
    pub fn token(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }

    /// The human-readable label shown in the sort dropdown.
    pub fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest first",
            Self::Oldest => "Oldest first",
        }
    }

    fn direction_sql(self) -> &'static str {
        match self {
            Self::Newest => "DESC",
            Self::Oldest => "ASC",
        }
    }
}

/// The optional predicates and sort order for a post read page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PostQuery {
    /// Case-insensitive partial match on the post title.
    pub title_fragment: Option<String>,
    /// Restrict results to a single category.
    pub category_id: Option<DatabaseID>,
    /// Ordering on the creation timestamp.
    pub sort: SortOrder,
}

impl PostQuery {
    /// Build a query from raw request parameters.
    ///
    /// Parsing is lenient: a blank or whitespace-only search term means no
    /// title predicate, a category id that is missing, non-numeric, or not
    /// positive means all categories, and an unknown sort token means the
    /// newest-first default. Bad input never produces an error page here.
    pub fn from_params(
        search: Option<&str>,
        category_id: Option<&str>,
        sort: Option<&str>,
    ) -> Self {
        let title_fragment = search
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .map(ToOwned::to_owned);

        let category_id = category_id
            .and_then(|raw| raw.trim().parse::<DatabaseID>().ok())
            .filter(|&id| id > 0);

        let sort = sort.map(SortOrder::parse).unwrap_or_default();

        Self {
            title_fragment,
            category_id,
            sort,
        }
    }

    /// Assemble the SELECT statement and its bound parameters.
    ///
    /// The statement always joins posts to their owning category. Each
    /// predicate is appended only when its input applies, and the WHERE
    /// clause is omitted entirely when none do.
    pub fn to_sql(&self) -> PreparedQuery {
        let mut predicates: Vec<&'static str> = Vec::new();
        let mut parameters: Vec<(&'static str, Value)> = Vec::new();

        if let Some(fragment) = &self.title_fragment {
            predicates.push("p.title LIKE :search");
            parameters.push((":search", Value::Text(format!("%{fragment}%"))));
        }

        if let Some(category_id) = self.category_id {
            predicates.push("p.category_id = :category_id");
            parameters.push((":category_id", Value::Integer(category_id)));
        }

        let mut statement = String::from(
            "SELECT p.id, p.title, p.content, p.created_at, c.name AS category_name \
            FROM post p \
            INNER JOIN category c ON p.category_id = c.id",
        );

        if !predicates.is_empty() {
            statement.push_str(" WHERE ");
            statement.push_str(&predicates.join(" AND "));
        }

        statement.push_str(" ORDER BY p.created_at ");
        statement.push_str(self.sort.direction_sql());

        PreparedQuery {
            statement,
            parameters,
        }
    }
}

/// A built statement plus the values bound to its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    /// The SELECT statement with named placeholders.
    pub statement: String,
    /// The placeholder names and the values bound to them.
    pub parameters: Vec<(&'static str, Value)>,
}

impl PreparedQuery {
    /// The parameters in the form rusqlite's named-parameter API expects.
    pub fn params(&self) -> Vec<(&str, &dyn ToSql)> {
        self.parameters
            .iter()
            .map(|(name, value)| (*name, value as &dyn ToSql))
            .collect()
    }

    /// Human-readable placeholder bindings for the debug panel.
    pub fn describe_parameters(&self) -> Vec<String> {
        self.parameters
            .iter()
            .map(|(name, value)| match value {
                Value::Text(text) => format!("{name} = '{text}'"),
                Value::Integer(number) => format!("{name} = {number}"),
                other => format!("{name} = {other:?}"),
            })
            .collect()
    }
}
