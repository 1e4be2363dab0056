// src/sheet/resolve.rs
use std::collections::HashMap;

use crate::coerce;

/// One canonical field and the prioritized header spellings that may
/// carry it in an export. Earlier aliases win.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub aliases: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedColumn {
    /// The observed header text this field reads from.
    header: String,
    column: usize,
}

/// Per-fetch mapping from canonical field to the observed header (and its
/// column position) actually present in the current export.
///
/// Rebuilt on every pass: maintainers rename columns and introduce stray
/// whitespace between exports, so an index cached across fetches would
/// read the wrong cells. A field with no matching alias stays unresolved
/// and yields the coercion default for every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderIndex {
    fields: HashMap<&'static str, ResolvedColumn>,
    identifier: Option<ResolvedColumn>,
}

impl HeaderIndex {
    pub fn resolve(headers: &[String], specs: &[FieldSpec]) -> Self {
        let mut fields = HashMap::with_capacity(specs.len());
        for spec in specs {
            let hit = spec.aliases.iter().find_map(|alias| {
                headers.iter().position(|h| h == alias).map(|column| ResolvedColumn {
                    header: (*alias).to_string(),
                    column,
                })
            });
            if let Some(column) = hit {
                fields.insert(spec.key, column);
            }
        }

        // The leading column is the identifier no matter what it is
        // called; some exports leave it unlabeled entirely.
        let identifier = headers.first().map(|h| ResolvedColumn {
            header: h.clone(),
            column: 0,
        });

        Self { fields, identifier }
    }

    /// Read `key` from a row as trimmed text, defaulting to empty.
    pub fn text(&self, row: &[String], key: &str) -> String {
        coerce::text(cell(self.fields.get(key), row))
    }

    /// Read `key` from a row as a finite number, defaulting to zero.
    pub fn number(&self, row: &[String], key: &str) -> f64 {
        coerce::number(cell(self.fields.get(key), row))
    }

    /// Read the position-0 identifier cell as a number.
    pub fn identifier_number(&self, row: &[String]) -> f64 {
        coerce::number(cell(self.identifier.as_ref(), row))
    }

    /// The observed header resolved for `key`, if any. Diagnostics only.
    pub fn observed(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|c| c.header.as_str())
    }
}

fn cell<'a>(column: Option<&ResolvedColumn>, row: &'a [String]) -> Option<&'a str> {
    column
        .and_then(|c| row.get(c.column))
        .map(String::as_str)
}
