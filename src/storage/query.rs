//! Typed query composition for the catalog selects.
//!
//! Optional filter fields become `Predicate` descriptors folded into query
//! text plus a parallel positional-argument list. Values are never
//! interpolated into the SQL; every placeholder has exactly one argument,
//! appended in predicate-declaration order.

use rusqlite::types::Value;

use crate::types::SortOrder;

/// A single optional predicate on a list query.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// `column = ?` with a bound boolean.
    EqualsBool { column: &'static str, value: bool },
    /// `column IN (?, …)` with one argument per value, in caller order.
    /// An empty set contributes no clause at all.
    InSet { column: &'static str, values: Vec<i64> },
}

/// Builder folding a base `SELECT` plus predicates into `(sql, args)`.
#[derive(Debug)]
pub struct SelectBuilder {
    base: String,
    predicates: Vec<Predicate>,
    order_by: Option<(&'static str, SortOrder)>,
}

impl SelectBuilder {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.to_string(),
            predicates: Vec::new(),
            order_by: None,
        }
    }

    pub fn push(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn order_by(mut self, column: &'static str, order: SortOrder) -> Self {
        self.order_by = Some((column, order));
        self
    }

    /// Fold into final query text and the matching argument list.
    ///
    /// Materialized predicates are joined with ` AND ` behind a single
    /// ` WHERE `; the `ORDER BY` clause, if set, always comes last.
    pub fn build(self) -> (String, Vec<Value>) {
        let mut clauses: Vec<String> = Vec::new();
        let mut args: Vec<Value> = Vec::new();

        for predicate in self.predicates {
            match predicate {
                Predicate::EqualsBool { column, value } => {
                    clauses.push(format!("{} = ?", column));
                    args.push(Value::from(value));
                }
                Predicate::InSet { column, values } => {
                    if values.is_empty() {
                        continue;
                    }
                    let placeholders = vec!["?"; values.len()].join(", ");
                    clauses.push(format!("{} IN ({})", column, placeholders));
                    args.extend(values.into_iter().map(Value::from));
                }
            }
        }

        let mut sql = self.base;
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        if let Some((column, order)) = self.order_by {
            sql.push_str(&format!(" ORDER BY {} {}", column, order.as_sql()));
        }

        (sql, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder_count(sql: &str) -> usize {
        sql.matches('?').count()
    }

    #[test]
    fn test_no_predicates_keeps_base() {
        let (sql, args) = SelectBuilder::new("SELECT id FROM races").build();
        assert_eq!(sql, "SELECT id FROM races");
        assert!(args.is_empty());
    }

    #[test]
    fn test_default_order_is_ascending() {
        let (sql, args) = SelectBuilder::new("SELECT id FROM races")
            .order_by("advertised_start_time", SortOrder::default())
            .build();
        assert_eq!(sql, "SELECT id FROM races ORDER BY advertised_start_time ASC");
        assert!(args.is_empty());
    }

    #[test]
    fn test_equals_bool_binds_one_argument() {
        let (sql, args) = SelectBuilder::new("SELECT id FROM races")
            .push(Predicate::EqualsBool {
                column: "visible",
                value: true,
            })
            .order_by("advertised_start_time", SortOrder::Desc)
            .build();
        assert_eq!(
            sql,
            "SELECT id FROM races WHERE visible = ? ORDER BY advertised_start_time DESC"
        );
        assert_eq!(args, vec![Value::from(true)]);
    }

    #[test]
    fn test_in_set_sizes_placeholders_to_values() {
        let (sql, args) = SelectBuilder::new("SELECT id FROM sports")
            .push(Predicate::InSet {
                column: "id",
                values: vec![5, 1, 9],
            })
            .build();
        assert_eq!(sql, "SELECT id FROM sports WHERE id IN (?, ?, ?)");
        // Caller-supplied order is preserved for binding.
        assert_eq!(args, vec![Value::from(5i64), Value::from(1i64), Value::from(9i64)]);
    }

    #[test]
    fn test_empty_in_set_adds_no_clause() {
        let (sql, args) = SelectBuilder::new("SELECT id FROM sports")
            .push(Predicate::InSet {
                column: "id",
                values: vec![],
            })
            .build();
        assert_eq!(sql, "SELECT id FROM sports");
        assert!(args.is_empty());
    }

    #[test]
    fn test_multiple_predicates_joined_with_and() {
        let (sql, args) = SelectBuilder::new("SELECT id FROM races")
            .push(Predicate::EqualsBool {
                column: "visible",
                value: false,
            })
            .push(Predicate::InSet {
                column: "id",
                values: vec![1, 2],
            })
            .build();
        assert_eq!(
            sql,
            "SELECT id FROM races WHERE visible = ? AND id IN (?, ?)"
        );
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn test_placeholders_always_match_arguments() {
        let cases = vec![
            SelectBuilder::new("SELECT 1").build(),
            SelectBuilder::new("SELECT 1")
                .push(Predicate::EqualsBool {
                    column: "visible",
                    value: true,
                })
                .build(),
            SelectBuilder::new("SELECT 1")
                .push(Predicate::InSet {
                    column: "id",
                    values: (1..=7).collect(),
                })
                .push(Predicate::EqualsBool {
                    column: "visible",
                    value: false,
                })
                .order_by("advertised_start_time", SortOrder::Asc)
                .build(),
        ];
        for (sql, args) in cases {
            assert_eq!(placeholder_count(&sql), args.len(), "sql: {}", sql);
        }
    }
}
