//! Document model and the store seam
//!
//! Records live in named collections and are addressed by a string id. A
//! document is a flat map of typed field values; queries support equality
//! filters, one ordering field, and a limit.

use std::collections::BTreeMap;
use std::cmp::Ordering;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use crate::utils::errors::{StoreError, StoreResult};

/// A single typed field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Timestamp(DateTime<FixedOffset>),
    /// Write-only marker resolved to the store's clock at commit time
    ServerTimestamp,
}

pub type Fields = BTreeMap<String, FieldValue>;

/// A stored document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

/// Sort direction for ordered queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Equality filter on one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: FieldValue,
}

/// Collection query: equality filters (AND), optional ordering, optional limit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<FieldFilter>,
    pub order_by: Option<(String, Direction)>,
    pub limit: Option<usize>,
}

/// The document store client consumed by the repositories
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Run a query against one collection
    async fn run_query(&self, collection: &str, query: Query) -> StoreResult<Vec<Document>>;

    /// Fetch one document, `None` if it does not exist
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Create or wholesale overwrite a document
    async fn set(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()>;

    /// Delete a document. May report `StoreError::NotFound` for absent ids.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;

    /// Verify the store is reachable with the configured credentials
    async fn health_check(&self) -> StoreResult<()>;
}

/// Conversion from a stored document into a typed record
pub trait FromDocument: Sized {
    fn from_document(document: &Document) -> StoreResult<Self>;
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: &str, value: FieldValue) -> Self {
        self.filters.push(FieldFilter {
            field: field.to_string(),
            value,
        });
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by = Some((field.to_string(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a document satisfies every equality filter
    pub fn matches(&self, fields: &Fields) -> bool {
        self.filters
            .iter()
            .all(|filter| fields.get(&filter.field).map_or(false, |value| value.equals(&filter.value)))
    }
}

impl FieldValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            FieldValue::Timestamp(value) => Some(value),
            _ => None,
        }
    }

    /// Equality as the store evaluates it: integers and doubles compare numerically
    pub fn equals(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Integer(a), FieldValue::Double(b)) | (FieldValue::Double(b), FieldValue::Integer(a)) => {
                (*a as f64) == *b
            }
            _ => self == other,
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Boolean(_) => 1,
            FieldValue::Integer(_) | FieldValue::Double(_) => 2,
            FieldValue::Timestamp(_) | FieldValue::ServerTimestamp => 3,
            FieldValue::String(_) => 4,
        }
    }

    /// Total order used for sorting: values of different types order by type first
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Double(b)) => (*a as f64).total_cmp(b),
            (FieldValue::Double(a), FieldValue::Integer(b)) => a.total_cmp(&(*b as f64)),
            (FieldValue::Double(a), FieldValue::Double(b)) => a.total_cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Integer field; absent or null yields `None`, any other type is malformed
    pub fn i64_field(&self, name: &str) -> StoreResult<Option<i64>> {
        match self.fields.get(name) {
            None | Some(FieldValue::Null) => Ok(None),
            Some(FieldValue::Integer(value)) => Ok(Some(*value)),
            Some(other) => Err(StoreError::Decode(format!(
                "{}/{}: expected integer, found {:?}",
                self.id, name, other
            ))),
        }
    }

    /// String field; absent or null yields `None`
    pub fn string_field(&self, name: &str) -> Option<String> {
        self.fields.get(name).and_then(FieldValue::as_str).map(str::to_string)
    }

    /// Timestamp field; absent or non-timestamp values yield `None`
    pub fn timestamp_field(&self, name: &str) -> Option<DateTime<FixedOffset>> {
        self.fields.get(name).and_then(FieldValue::as_timestamp).cloned()
    }

    /// Boolean field using truthiness for non-boolean values
    pub fn flag(&self, name: &str) -> bool {
        match self.fields.get(name) {
            Some(FieldValue::Boolean(value)) => *value,
            Some(FieldValue::Integer(value)) => *value != 0,
            Some(FieldValue::String(value)) => !value.is_empty(),
            _ => false,
        }
    }
}
