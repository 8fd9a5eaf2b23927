//! Row admission constraints: comparison operators and tagged values.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when an operator symbol is not one of `==, <, <=, >, >=`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown comparison operator: '{0}'")]
pub struct UnknownOperator(pub String);

/// Comparison operator for a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// Parses an operator symbol (`==`, `<`, `<=`, `>`, `>=`).
    pub fn from_symbol(symbol: &str) -> Result<Self, UnknownOperator> {
        match symbol {
            "==" => Ok(Self::Eq),
            "<" => Ok(Self::Lt),
            "<=" => Ok(Self::Le),
            ">" => Ok(Self::Gt),
            ">=" => Ok(Self::Ge),
            other => Err(UnknownOperator(other.to_string())),
        }
    }

    /// The operator's source symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    /// Whether an ordering between record value and comparison value
    /// satisfies this operator.
    pub fn admits(&self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Lt => ordering == Ordering::Less,
            Self::Le => ordering != Ordering::Greater,
            Self::Gt => ordering == Ordering::Greater,
            Self::Ge => ordering != Ordering::Less,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Comparison value, tagged at construction time.
///
/// The tag decides how the record's string value is coerced when the
/// constraint is evaluated: `Number` parses it as `f64`, `Timestamp`
/// parses it as an ISO 8601 date or datetime, `Text` compares the
/// normalized strings lexically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CompareValue {
    Number(f64),
    Timestamp(NaiveDateTime),
    Text(String),
}

impl CompareValue {
    /// Infers the tag from a raw string: number first, then timestamp,
    /// otherwise text (stored trimmed and lowercased to match the normal
    /// form cleaned record values arrive in).
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(number) = trimmed.parse::<f64>() {
            return Self::Number(number);
        }
        if let Some(timestamp) = parse_timestamp(trimmed) {
            return Self::Timestamp(timestamp);
        }
        Self::Text(trimmed.to_lowercase())
    }

    /// Constructs a text value, normalizing to the cleaned-record form.
    pub fn text(raw: &str) -> Self {
        Self::Text(raw.trim().to_lowercase())
    }
}

impl fmt::Display for CompareValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Timestamp(ts) => write!(f, "{ts}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Parses an ISO 8601 timestamp: `YYYY-MM-DD`, `YYYY-MM-DDThh:mm:ss`, or
/// `YYYY-MM-DD hh:mm:ss`. Date-only values resolve to midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    None
}

/// A per-row admission test: compare one aliased field's value against a
/// fixed comparison value. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// Logical field name the constraint applies to.
    pub alias: String,
    /// Comparison operator.
    pub op: CompareOp,
    /// Comparison value, typed once at construction.
    pub value: CompareValue,
}

impl Constraint {
    pub fn new(alias: impl Into<String>, op: CompareOp, value: CompareValue) -> Self {
        Self {
            alias: alias.into(),
            op,
            value,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.alias, self.op, self.value)
    }
}
