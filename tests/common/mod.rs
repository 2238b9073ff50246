#![allow(dead_code)]

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, TimeZone, Utc};

/// 2006-01-02T15:04:05Z
pub fn test_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap()
}

/// 2024-01-01T00:00:00Z
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub const FIXED_NOW_SECONDS: &str = "1704067200";
pub const FIXED_NOW_RFC3339: &str = "2024-01-01T00:00:00Z";

pub fn s(value: &str) -> AttributeValue {
    AttributeValue::S(value.to_string())
}

pub fn n(value: &str) -> AttributeValue {
    AttributeValue::N(value.to_string())
}

pub fn epoch_seconds(value: &AttributeValue) -> DateTime<Utc> {
    let seconds = value.as_n().unwrap().parse::<i64>().unwrap();
    DateTime::from_timestamp(seconds, 0).unwrap()
}
