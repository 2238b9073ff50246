mod common;

use aws_dynamo_fns::{decode, get, put, Fns, GetOpts, PutOpts, Table, UpdateOpts};
use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use common::{fixed_now, n, s, test_time, FIXED_NOW_RFC3339, FIXED_NOW_SECONDS};
use serde::{Deserialize, Serialize};

#[test]
fn test_put_decodes_rfc3339_timestamps() {
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Table)]
    #[serde(rename_all = "camelCase")]
    struct Test {
        #[dynamo(hash_key)]
        id: String,
        #[dynamo(version)]
        version: u32,
        #[dynamo(created_time)]
        created_time: DateTime<Utc>,
        #[dynamo(modified_time)]
        modified_time: Option<DateTime<Utc>>,
    }

    let input = Test {
        id: "hello".to_string(),
        version: 1,
        created_time: test_time(),
        modified_time: None,
    };

    let got = Fns::new()
        .with_clock(fixed_now)
        .put(&input, PutOpts::new())
        .unwrap();
    assert_eq!(got.item().unwrap()["modifiedTime"], s(FIXED_NOW_RFC3339));

    let decoded = decode::<Test>(got.item().cloned()).unwrap();
    assert_eq!(
        decoded,
        Some(Test {
            version: 2,
            modified_time: Some(fixed_now()),
            ..input
        })
    );
}

#[test]
fn test_put_decodes_unix_timestamps() {
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Table)]
    #[serde(rename_all = "camelCase")]
    struct Test {
        #[dynamo(hash_key)]
        id: String,
        #[serde(with = "chrono::serde::ts_seconds")]
        #[dynamo(created_time)]
        created_time: DateTime<Utc>,
        #[serde(with = "chrono::serde::ts_seconds_option")]
        #[dynamo(modified_time, unix_time)]
        modified_time: Option<DateTime<Utc>>,
    }

    let input = Test {
        id: "hello".to_string(),
        created_time: DateTime::default(),
        modified_time: None,
    };

    let got = Fns::new()
        .with_clock(fixed_now)
        .put(&input, PutOpts::new())
        .unwrap();
    let item = got.item().unwrap();
    assert_eq!(item["createdTime"], n(FIXED_NOW_SECONDS));
    assert_eq!(item["modifiedTime"], n(FIXED_NOW_SECONDS));

    let decoded = decode::<Test>(got.item().cloned()).unwrap();
    assert_eq!(
        decoded,
        Some(Test {
            id: "hello".to_string(),
            created_time: fixed_now(),
            modified_time: Some(fixed_now()),
        })
    );
}

#[test]
fn test_update_values_decode_into_record() {
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Table)]
    struct Test {
        #[dynamo(hash_key)]
        id: String,
        #[serde(with = "chrono::serde::ts_seconds")]
        #[dynamo(created_time)]
        created: DateTime<Utc>,
        #[dynamo(modified_time)]
        modified: DateTime<Utc>,
    }

    let input = Test {
        id: "hello".to_string(),
        created: DateTime::default(),
        modified: test_time(),
    };

    let got = Fns::new()
        .with_clock(fixed_now)
        .update(&input, UpdateOpts::new())
        .unwrap();
    assert_eq!(
        got.update_expression(),
        Some("SET #0 = if_not_exists(#0, :0), #1 = :1\n")
    );

    // apply the update to the stored item
    let values = got.expression_attribute_values().unwrap();
    let mut item = serde_dynamo::to_item::<_, std::collections::HashMap<String, AttributeValue>>(
        &input,
    )
    .unwrap();
    item.insert("created".to_string(), values[":0"].clone());
    item.insert("modified".to_string(), values[":1"].clone());

    assert_eq!(
        decode::<Test>(Some(item)).unwrap(),
        Some(Test {
            id: "hello".to_string(),
            created: fixed_now(),
            modified: fixed_now(),
        })
    );
}

#[test]
fn test_binary_key() {
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Table)]
    struct Test {
        #[dynamo(hash_key)]
        #[serde(with = "serde_bytes")]
        id: Vec<u8>,
        #[dynamo(sort_key)]
        sort: serde_bytes::ByteBuf,
        body: String,
    }

    let input = Test {
        id: vec![1, 2],
        sort: serde_bytes::ByteBuf::from(vec![3]),
        body: "hello".to_string(),
    };

    let key = get(&input, GetOpts::new()).unwrap().key().cloned().unwrap();
    assert_eq!(key["id"], AttributeValue::B(Blob::new(vec![1, 2])));
    assert_eq!(key["sort"], AttributeValue::B(Blob::new(vec![3])));
    assert_eq!(key.len(), 2);

    let got = put(&input, PutOpts::new()).unwrap();
    assert_eq!(decode::<Test>(got.item().cloned()).unwrap(), Some(input));
}
