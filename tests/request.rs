mod common;

use aws_config::Region;
use aws_dynamo_fns::{
    delete_item_request, get_item_request, put_item_request, update_item_request, DeleteOpts, Fns,
    GetOpts, PutOpts, Table, UpdateOpts,
};
use aws_sdk_dynamodb::types::ReturnValuesOnConditionCheckFailure;
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, Utc};
use common::{fixed_now, n, s, FIXED_NOW_SECONDS};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Serialize, Table)]
#[serde(rename_all = "camelCase")]
#[dynamo(table_name = "AwesomeFooTable")]
struct FooTable {
    #[dynamo(hash_key)]
    primary: String,
    #[dynamo(range_key)]
    range_key: u32,
    #[dynamo(version)]
    version: i32,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    #[dynamo(modified_time, unix_time)]
    modified_time: Option<DateTime<Utc>>,
}

async fn client() -> Client {
    let config = aws_config::from_env()
        .region(Region::new("us-east-1"))
        .load()
        .await;
    Client::new(&config)
}

fn foo() -> FooTable {
    FooTable {
        primary: "p".to_string(),
        range_key: 7,
        version: 2,
        modified_time: None,
    }
}

fn key() -> HashMap<String, aws_sdk_dynamodb::types::AttributeValue> {
    HashMap::from([
        ("primary".to_string(), s("p")),
        ("rangeKey".to_string(), n("7")),
    ])
}

#[tokio::test]
async fn test_get_item_request() {
    let client = client().await;
    let input = Fns::new()
        .get(&foo(), GetOpts::new().with_projection(["primary"]))
        .unwrap();

    let builder = get_item_request(&client, input);
    assert_eq!(builder.get_table_name().as_deref(), Some("AwesomeFooTable"));
    assert_eq!(builder.get_key().as_ref(), Some(&key()));
    assert_eq!(builder.get_projection_expression().as_deref(), Some("#0"));
}

#[tokio::test]
async fn test_put_item_request() {
    let client = client().await;
    let input = Fns::new()
        .with_clock(fixed_now)
        .put(
            &foo(),
            PutOpts::new().with_return_values_on_condition_check_failure(
                ReturnValuesOnConditionCheckFailure::AllOld,
            ),
        )
        .unwrap();

    let builder = put_item_request(&client, input);
    assert_eq!(builder.get_table_name().as_deref(), Some("AwesomeFooTable"));
    assert_eq!(builder.get_condition_expression().as_deref(), Some("#0 = :0"));
    assert_eq!(
        builder.get_return_values_on_condition_check_failure().as_ref(),
        Some(&ReturnValuesOnConditionCheckFailure::AllOld)
    );

    let item = builder.get_item().as_ref().unwrap();
    assert_eq!(item["version"], n("3"));
    assert_eq!(item["modifiedTime"], n(FIXED_NOW_SECONDS));
}

#[tokio::test]
async fn test_update_item_request() {
    let client = client().await;
    let input = Fns::new()
        .with_clock(fixed_now)
        .update(&foo(), UpdateOpts::new().add("views", 1))
        .unwrap();

    let builder = update_item_request(&client, input);
    assert_eq!(builder.get_key().as_ref(), Some(&key()));
    assert_eq!(builder.get_condition_expression().as_deref(), Some("#0 = :0"));
    assert_eq!(
        builder.get_update_expression().as_deref(),
        Some("ADD #1 :1, #0 :2\nSET #2 = :3\n")
    );
}

#[tokio::test]
async fn test_delete_item_request() {
    let client = client().await;
    let input = Fns::new().delete(&foo(), DeleteOpts::new()).unwrap();

    let builder = delete_item_request(&client, input);
    assert_eq!(builder.get_key().as_ref(), Some(&key()));
    assert_eq!(builder.get_condition_expression().as_deref(), Some("#0 = :0"));
    assert_eq!(
        builder.get_expression_attribute_values().as_ref(),
        Some(&HashMap::from([(":0".to_string(), n("2"))]))
    );
}
