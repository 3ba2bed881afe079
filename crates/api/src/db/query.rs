//! Generic list-query composition.
//!
//! One engine serves every table: callers declare the table, its
//! column list and a default ordering, then add AND-combined
//! predicates. Values are always bound through placeholders and cast
//! on the SQL side, so the bind list stays a plain `Vec<String>`.

use scooby::postgres::{select, Parameters};

/// SQL-side casts for bound parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cast {
    Date,
    Timestamp,
    Int,
    Text,
}

impl Cast {
    fn suffix(self) -> &'static str {
        match self {
            Cast::Date => "::DATE",
            Cast::Timestamp => "::TIMESTAMP",
            Cast::Int => "::INT4",
            Cast::Text => "::TEXT",
        }
    }
}

/// A filtered, ordered SELECT over one logical table.
///
/// Produces a count query and a data query over the same predicate
/// set; the paginated path issues both so `total` never depends on the
/// returned page.
pub struct ListQuery {
    table: &'static str,
    columns: &'static [&'static str],
    order: &'static str,
    predicates: Vec<String>,
    binds: Vec<String>,
    params: Parameters,
}

impl ListQuery {
    pub fn new(
        table: &'static str,
        columns: &'static [&'static str],
        order: &'static str,
    ) -> Self {
        Self {
            table,
            columns,
            order,
            predicates: Vec::new(),
            binds: Vec::new(),
            params: Parameters::new(),
        }
    }

    /// Add `column <op> $n::<cast>` to the predicate set.
    pub fn filter(&mut self, column: &str, op: &str, cast: Cast, value: impl Into<String>) {
        let placeholder = self.params.next();
        self.predicates
            .push(format!("{} {} {}{}", column, op, placeholder, cast.suffix()));
        self.binds.push(value.into());
    }

    /// Add a raw predicate without a bound value (e.g. IS NOT NULL).
    pub fn predicate(&mut self, predicate: impl Into<String>) {
        self.predicates.push(predicate.into());
    }

    pub fn binds(&self) -> &[String] {
        &self.binds
    }

    /// `SELECT COUNT(*)` over the same predicates.
    pub fn count_sql(&self) -> String {
        let mut query = select("COUNT(*)").from(self.table);
        for predicate in &self.predicates {
            query = query.where_(predicate.clone());
        }
        query.to_string()
    }

    /// Data query with deterministic ordering, offset and limit.
    /// Limit and offset are validated integers, inlined rather than
    /// bound.
    pub fn data_sql(&self, limit: i64, offset: i64) -> String {
        format!(
            "{} ORDER BY {} LIMIT {} OFFSET {}",
            self.base_select(),
            self.order,
            limit,
            offset
        )
    }

    /// Data query for "latest N" endpoints: ordered and capped, no
    /// offset, no count.
    pub fn latest_sql(&self, limit: i64) -> String {
        format!(
            "{} ORDER BY {} LIMIT {}",
            self.base_select(),
            self.order,
            limit
        )
    }

    /// Unpaginated data query (single-date and single-year lookups).
    pub fn all_sql(&self) -> String {
        format!("{} ORDER BY {}", self.base_select(), self.order)
    }

    fn base_select(&self) -> String {
        let mut query = select(self.columns.join(", ")).from(self.table);
        for predicate in &self.predicates {
            query = query.where_(predicate.clone());
        }
        query.to_string()
    }
}
