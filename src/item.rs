//! Reads and rewrites tagged attributes of an encoded record.

use crate::error::{Error, Result};
use crate::model::{Attribute, Model};
use crate::schema::{FieldKind, NumberKind};

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

pub(crate) type Item = HashMap<String, AttributeValue>;

pub(crate) fn encode<T: Serialize>(record: &T) -> Result<Item> {
    serde_dynamo::to_item(record).map_err(Error::Encode)
}

/// Retains only the hash and sort key attributes, which must be scalar
/// strings, numbers or binaries.
pub(crate) fn extract_key(model: &Model, item: &Item) -> Result<Item> {
    model
        .key_names()
        .map(|name| match item.get(name) {
            Some(value @ (AttributeValue::S(_) | AttributeValue::N(_) | AttributeValue::B(_))) => {
                Ok((name.to_string(), value.clone()))
            }
            Some(other) => Err(Error::InvalidKey {
                name,
                value: format!("{other:?}"),
            }),
            None => Err(Error::MissingAttribute(name)),
        })
        .collect()
}

/// Current state of the version attribute.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Version {
    /// Absent, null, or numerically zero: the item should not exist yet.
    Zero,
    Current {
        value: AttributeValue,
        next: AttributeValue,
    },
}

impl Version {
    pub(crate) const INITIAL: &'static str = "1";

    pub(crate) fn read(attr: &Attribute, item: &Item) -> Result<Self> {
        let number = match item.get(attr.name) {
            None | Some(AttributeValue::Null(_)) => return Ok(Self::Zero),
            Some(AttributeValue::N(number)) => number,
            Some(other) => {
                return Err(Error::InvalidVersion {
                    name: attr.name,
                    value: format!("{other:?}"),
                })
            }
        };
        let invalid = || Error::InvalidVersion {
            name: attr.name,
            value: number.clone(),
        };

        let next = match attr.kind {
            FieldKind::Number(NumberKind::Signed { bits }) => {
                let n = number.parse::<i128>().map_err(|_| invalid())?;
                if n == 0 {
                    return Ok(Self::Zero);
                }
                let next = n.checked_add(1).ok_or_else(invalid)?;
                if next > signed_max(bits) {
                    return Err(invalid());
                }
                next.to_string()
            }
            FieldKind::Number(NumberKind::Unsigned { bits }) => {
                let n = number.parse::<u128>().map_err(|_| invalid())?;
                if n == 0 {
                    return Ok(Self::Zero);
                }
                let next = n.checked_add(1).ok_or_else(invalid)?;
                if next > unsigned_max(bits) {
                    return Err(invalid());
                }
                next.to_string()
            }
            FieldKind::Number(NumberKind::Float) => {
                let n = number.parse::<f64>().map_err(|_| invalid())?;
                if n == 0.0 {
                    return Ok(Self::Zero);
                }
                if !n.is_finite() {
                    return Err(invalid());
                }
                (n + 1.0).to_string()
            }
            _ => return Err(invalid()),
        };

        Ok(Self::Current {
            value: AttributeValue::N(number.clone()),
            next: AttributeValue::N(next),
        })
    }
}

fn signed_max(bits: u8) -> i128 {
    i128::MAX
        .checked_shr(128_u32.saturating_sub(bits.into()))
        .unwrap_or(0)
}

fn unsigned_max(bits: u8) -> u128 {
    u128::MAX
        .checked_shr(128_u32.saturating_sub(bits.into()))
        .unwrap_or(0)
}

/// Returns the stored timestamp, or `None` when it is zero (absent, null, or
/// the Unix epoch).
pub(crate) fn stored_time(attr: &Attribute, item: &Item) -> Result<Option<DateTime<Utc>>> {
    let invalid = |value: String| Error::InvalidTimestamp {
        name: attr.name,
        value,
    };

    let time = match item.get(attr.name) {
        None | Some(AttributeValue::Null(_)) => return Ok(None),
        Some(AttributeValue::N(seconds)) => seconds
            .parse::<i64>()
            .ok()
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
            .ok_or_else(|| invalid(seconds.clone()))?,
        Some(AttributeValue::S(rfc3339)) => DateTime::parse_from_rfc3339(rfc3339)
            .map_err(|_| invalid(rfc3339.clone()))?
            .with_timezone(&Utc),
        Some(other) => return Err(invalid(format!("{other:?}"))),
    };

    Ok((time != DateTime::<Utc>::default()).then_some(time))
}

/// Encodes a timestamp as epoch seconds when `unix_time` is set, otherwise as
/// serde encodes `DateTime<Utc>`.
pub(crate) fn encode_time(attr: &Attribute, time: DateTime<Utc>) -> Result<AttributeValue> {
    if attr.unix_time {
        return Ok(AttributeValue::N(time.timestamp().to_string()));
    }
    serde_dynamo::to_attribute_value(time).map_err(Error::Encode)
}
