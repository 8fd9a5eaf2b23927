//! Constraint evaluation against normalized records.

use thiserror::Error;

use tally_model::{CompareValue, Constraint, Record, parse_timestamp};

/// A record value could not be coerced to a constraint's comparison type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("value '{value}' for alias '{alias}' is not numeric")]
    NotNumeric { alias: String, value: String },

    #[error("value '{value}' for alias '{alias}' is not a timestamp")]
    NotTimestamp { alias: String, value: String },

    #[error("record has no value for alias '{alias}'")]
    MissingField { alias: String },
}

/// Whether `record` satisfies every constraint (logical AND). An empty
/// constraint list admits every record.
///
/// Coercion follows the constraint's tagged comparison value: numeric
/// bounds parse the record value as `f64`, timestamp bounds parse it as
/// an ISO date/datetime, text bounds compare the normalized strings.
/// Impossible coercion is an error, never a silent rejection.
pub fn constraints_satisfied(
    record: &Record,
    constraints: &[Constraint],
) -> Result<bool, ConstraintError> {
    for constraint in constraints {
        if !satisfies(record, constraint)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn satisfies(record: &Record, constraint: &Constraint) -> Result<bool, ConstraintError> {
    let value = record
        .get(&constraint.alias)
        .ok_or_else(|| ConstraintError::MissingField {
            alias: constraint.alias.clone(),
        })?;
    let ordering = match &constraint.value {
        CompareValue::Number(bound) => {
            let number = value
                .parse::<f64>()
                .map_err(|_| ConstraintError::NotNumeric {
                    alias: constraint.alias.clone(),
                    value: value.clone(),
                })?;
            match number.partial_cmp(bound) {
                Some(ordering) => ordering,
                None => return Ok(false),
            }
        }
        CompareValue::Timestamp(bound) => {
            let timestamp =
                parse_timestamp(value).ok_or_else(|| ConstraintError::NotTimestamp {
                    alias: constraint.alias.clone(),
                    value: value.clone(),
                })?;
            timestamp.cmp(bound)
        }
        CompareValue::Text(bound) => value.as_str().cmp(bound.as_str()),
    };
    Ok(constraint.op.admits(ordering))
}
