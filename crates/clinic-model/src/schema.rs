//! Static column schemas for the practice datasets.
//!
//! Every dataset declares its columns up front. The loader validates the
//! header row against the schema and converts each field through the
//! column's [`ColumnPolicy`] instead of guessing per value.

use serde::Serialize;

/// How a column's raw text is turned into a [`CellValue`](crate::CellValue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnPolicy {
    /// Numeric literals become numbers, everything else stays text.
    #[default]
    Inferred,
    /// Always text, even when the value looks numeric (identifiers, codes).
    Text,
    /// Must be numeric; anything else is a parse error.
    Number,
}

/// One declared column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub policy: ColumnPolicy,
    /// Whether the header row must contain this column.
    pub required: bool,
}

impl ColumnSpec {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            policy: ColumnPolicy::Text,
            required: true,
        }
    }

    pub const fn number(name: &'static str) -> Self {
        Self {
            name,
            policy: ColumnPolicy::Number,
            required: true,
        }
    }

    pub const fn inferred(name: &'static str) -> Self {
        Self {
            name,
            policy: ColumnPolicy::Inferred,
            required: true,
        }
    }

    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Column layout of one dataset kind.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Schema {
    pub name: &'static str,
    pub columns: &'static [ColumnSpec],
}

impl Schema {
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Policy for a header; undeclared columns fall back to inference.
    pub fn policy_for(&self, name: &str) -> ColumnPolicy {
        self.column(name)
            .map(|column| column.policy)
            .unwrap_or_default()
    }

    /// Required columns absent from `headers`, in schema order.
    pub fn missing_columns<S: AsRef<str>>(&self, headers: &[S]) -> Vec<String> {
        self.columns
            .iter()
            .filter(|column| column.required)
            .filter(|column| !headers.iter().any(|h| h.as_ref() == column.name))
            .map(|column| column.name.to_string())
            .collect()
    }
}
