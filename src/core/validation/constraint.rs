//! Field constraints and value predicates
//!
//! A [`FieldConstraint`] is one entry in a field's ordered rule list. The
//! engine evaluates the list in declaration order and stops at the first
//! violation for that field. Predicates that only need the submitted value
//! live here; existence and uniqueness checks are resolved by the engine
//! against the storage collaborator.

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Date format accepted by date-typed fields
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("valid url regex"))
}

/// Parse a submitted value as a date, if it is a date-formatted string
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
}

/// Whether a submitted value counts as empty
///
/// Absent fields, nulls, empty strings and empty arrays are all empty:
/// `Required` fails on them, `Nullable` passes through and skips the rest of
/// the field's rule list.
pub fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Type or format predicate on a submitted value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Numeric,
    Integer,
    Boolean,
    Date,
    Array,
    Email,
    Url,
    /// Upload metadata object: `{ "filename": string, "size": bytes, "mime": string }`
    File,
    /// A file whose mime type is `image/*`
    Image,
}

impl ValueType {
    /// Rule name used for message table lookups
    pub fn rule_name(self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Numeric => "numeric",
            ValueType::Integer => "integer",
            ValueType::Boolean => "boolean",
            ValueType::Date => "date",
            ValueType::Array => "array",
            ValueType::Email => "email",
            ValueType::Url => "url",
            ValueType::File => "file",
            ValueType::Image => "image",
        }
    }

    /// Check a non-empty value against the predicate
    pub fn check(self, value: &Value) -> bool {
        match self {
            ValueType::String => value.is_string(),
            ValueType::Numeric => value.is_number(),
            ValueType::Integer => value.is_i64() || value.is_u64(),
            ValueType::Boolean => value.is_boolean(),
            ValueType::Date => parse_date(value).is_some(),
            ValueType::Array => value.is_array(),
            ValueType::Email => value.as_str().is_some_and(|s| email_regex().is_match(s)),
            ValueType::Url => value.as_str().is_some_and(|s| url_regex().is_match(s)),
            ValueType::File => is_file_value(value),
            ValueType::Image => {
                is_file_value(value)
                    && value
                        .get("mime")
                        .and_then(Value::as_str)
                        .is_some_and(|m| m.starts_with("image/"))
            }
        }
    }
}

/// File values are upload metadata objects supplied by the HTTP layer
fn is_file_value(value: &Value) -> bool {
    value.get("filename").is_some_and(Value::is_string)
        && value.get("size").is_some_and(|s| s.is_u64())
}

/// Anchor for date comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateAnchor {
    /// Compare against the current date
    Today,
    /// Compare against another field's submitted value
    Field(&'static str),
}

/// Comparator for date comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateComparator {
    /// Strictly earlier than the anchor
    Before,
    /// Strictly later than the anchor
    After,
    /// Later than or equal to the anchor
    AfterOrEqual,
}

impl DateComparator {
    /// Rule name used for message table lookups
    pub fn rule_name(self) -> &'static str {
        match self {
            DateComparator::Before => "before",
            DateComparator::After => "after",
            DateComparator::AfterOrEqual => "after_or_equal",
        }
    }

    /// Apply the comparator to (value, anchor)
    pub fn holds(self, value: NaiveDate, anchor: NaiveDate) -> bool {
        match self {
            DateComparator::Before => value < anchor,
            DateComparator::After => value > anchor,
            DateComparator::AfterOrEqual => value >= anchor,
        }
    }
}

/// One constraint in a field's ordered rule list
///
/// `Required` and `Nullable` are mutually exclusive per field and control
/// how empty values are handled; everything else is a predicate on a
/// non-empty value. Bound and length checks pass through values of another
/// type, leaving the preceding type constraint to report the mismatch.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldConstraint {
    /// Field must be present and non-empty
    Required,
    /// Empty values pass and skip the rest of the rule list
    Nullable,
    /// Type or format predicate
    TypeOf(ValueType),
    /// Inclusive numeric lower bound
    Min(f64),
    /// Inclusive numeric upper bound
    Max(f64),
    /// Inclusive character-length lower bound
    MinLength(usize),
    /// Inclusive character-length upper bound
    MaxLength(usize),
    /// Exact character length (e.g. 3-letter currency codes)
    ExactLength(usize),
    /// Value must be one of a fixed allowed set (case-sensitive)
    OneOf(&'static [&'static str]),
    /// Inclusive upper bound on a file value's size in bytes
    MaxBytes(u64),
    /// Value must match the primary key of a row in an external collection
    Exists {
        collection: &'static str,
        key: &'static str,
    },
    /// No other row in the collection may share this value, excluding the
    /// bound current resource
    Unique {
        collection: &'static str,
        key: &'static str,
    },
    /// Parse the value as a date and compare it to an anchor
    DateCompare {
        anchor: DateAnchor,
        comparator: DateComparator,
    },
}

impl FieldConstraint {
    /// Rule name used for message table lookups
    pub fn rule_name(&self) -> &'static str {
        match self {
            FieldConstraint::Required => "required",
            FieldConstraint::Nullable => "nullable",
            FieldConstraint::TypeOf(t) => t.rule_name(),
            FieldConstraint::Min(_) | FieldConstraint::MinLength(_) => "min",
            FieldConstraint::Max(_) | FieldConstraint::MaxLength(_) => "max",
            FieldConstraint::ExactLength(_) => "size",
            FieldConstraint::OneOf(_) => "in",
            FieldConstraint::MaxBytes(_) => "max",
            FieldConstraint::Exists { .. } => "exists",
            FieldConstraint::Unique { .. } => "unique",
            FieldConstraint::DateCompare { comparator, .. } => comparator.rule_name(),
        }
    }

    /// Evaluate the local (non-lookup) predicate against a non-empty value
    ///
    /// Returns `Some(rule_name)` when the constraint is violated, `None` when
    /// it holds or does not apply locally. `Exists` and `Unique` always
    /// return `None` here; the engine resolves them against the storage
    /// collaborator.
    pub fn violation(&self, value: &Value, payload: &Value) -> Option<&'static str> {
        let violated = match self {
            FieldConstraint::Required | FieldConstraint::Nullable => false,
            FieldConstraint::TypeOf(t) => !t.check(value),
            FieldConstraint::Min(min) => value.as_f64().is_some_and(|n| n < *min),
            FieldConstraint::Max(max) => value.as_f64().is_some_and(|n| n > *max),
            FieldConstraint::MinLength(min) => {
                value.as_str().is_some_and(|s| s.chars().count() < *min)
            }
            FieldConstraint::MaxLength(max) => {
                value.as_str().is_some_and(|s| s.chars().count() > *max)
            }
            FieldConstraint::ExactLength(len) => {
                value.as_str().is_some_and(|s| s.chars().count() != *len)
            }
            FieldConstraint::OneOf(allowed) => {
                value.as_str().is_some_and(|s| !allowed.contains(&s))
            }
            FieldConstraint::MaxBytes(max) => value
                .get("size")
                .and_then(Value::as_u64)
                .is_some_and(|bytes| bytes > *max),
            FieldConstraint::Exists { .. } | FieldConstraint::Unique { .. } => false,
            FieldConstraint::DateCompare { anchor, comparator } => {
                match (parse_date(value), resolve_anchor(anchor, payload)) {
                    (Some(date), Some(anchor_date)) => !comparator.holds(date, anchor_date),
                    // Unparsable values or anchors report on their own field
                    _ => false,
                }
            }
        };
        violated.then(|| self.rule_name())
    }
}

fn resolve_anchor(anchor: &DateAnchor, payload: &Value) -> Option<NaiveDate> {
    match anchor {
        DateAnchor::Today => Some(chrono::Utc::now().date_naive()),
        DateAnchor::Field(field) => payload.get(*field).and_then(parse_date),
    }
}
