//! DynamoDB-backed store

use super::types::{QueryPage, QueryRequest, StorageClient};
use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::keys::IndexKind;
use crate::query::{Expression, QueryPlan};
use crate::types::{AttrValue, Key, Record};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;

type Item = HashMap<String, AttributeValue>;

/// [`StorageClient`] backed by a DynamoDB table and its goals index
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DynamoStore {
    /// Wrap an existing client
    pub fn new(client: Client, config: &StoreConfig) -> Self {
        Self {
            client,
            table_name: config.table_name.clone(),
            index_name: config.index_name.clone(),
        }
    }

    /// Build a client from the region and optional endpoint in `config`
    pub async fn connect(config: &StoreConfig) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        tracing::info!(
            region = %config.region,
            endpoint = ?config.endpoint,
            table = %config.table_name,
            "Connected DynamoDB client"
        );
        Self::new(Client::new(&sdk_config), config)
    }

    /// Table this store reads and writes
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

// ============================================================================
// Attribute Conversion
// ============================================================================

fn to_attribute(value: &AttrValue) -> AttributeValue {
    match value {
        AttrValue::S(s) => AttributeValue::S(s.clone()),
        AttrValue::N(n) => AttributeValue::N(n.to_string()),
    }
}

fn from_attribute(name: &str, value: &AttributeValue) -> Result<AttrValue> {
    match value {
        AttributeValue::S(s) => Ok(AttrValue::S(s.clone())),
        AttributeValue::N(n) => n
            .parse::<i64>()
            .map(AttrValue::N)
            .map_err(|e| Error::codec(format!("attribute '{name}' is not an integer: {e}"))),
        other => Err(Error::codec(format!(
            "attribute '{name}' has unsupported type: {other:?}"
        ))),
    }
}

fn to_item_key(key: &Key) -> Item {
    key.iter()
        .map(|(name, value)| (name.clone(), to_attribute(value)))
        .collect()
}

fn from_item_key(item: &Item) -> Result<Key> {
    item.iter()
        .map(|(name, value)| Ok((name.clone(), from_attribute(name, value)?)))
        .collect()
}

fn decode_items(items: Vec<Item>) -> Result<Vec<Record>> {
    serde_dynamo::from_items(items).map_err(|e| Error::codec(e.to_string()))
}

fn transport(operation: &str, err: impl std::error::Error) -> Error {
    Error::store(operation, DisplayErrorContext(err).to_string())
}

fn clamp_limit(limit: u32) -> i32 {
    i32::try_from(limit).unwrap_or(i32::MAX)
}

#[async_trait]
impl StorageClient for DynamoStore {
    async fn scan(&self, limit: u32) -> Result<Vec<Record>> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .limit(clamp_limit(limit))
            .send()
            .await
            .map_err(|e| transport("scan", e))?;
        decode_items(output.items.unwrap_or_default())
    }

    async fn get_item(&self, key: &Key) -> Result<Option<Record>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(to_item_key(key)))
            .send()
            .await
            .map_err(|e| transport("get_item", e))?;

        match output.item {
            Some(item) if !item.is_empty() => serde_dynamo::from_item(item)
                .map(Some)
                .map_err(|e| Error::codec(e.to_string())),
            _ => Ok(None),
        }
    }

    async fn put_item(&self, record: &Record) -> Result<()> {
        let item: Item = serde_dynamo::to_item(record).map_err(|e| Error::codec(e.to_string()))?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| transport("put_item", e))?;
        Ok(())
    }

    async fn query(&self, plan: &QueryPlan, request: &QueryRequest) -> Result<QueryPage> {
        let expression = Expression::from_plan(plan);
        let names = (!expression.names.is_empty()).then_some(expression.names);
        let values: Option<Item> = (!expression.values.is_empty()).then(|| {
            expression
                .values
                .iter()
                .map(|(placeholder, value)| (placeholder.clone(), to_attribute(value)))
                .collect()
        });
        let start_key = request.exclusive_start_key.as_ref().map(to_item_key);
        let limit = request.limit.map(clamp_limit);

        // Scan plans carry no key condition and go through the scan API.
        let (items, count, scanned_count, last_evaluated_key) = if plan.is_scan() {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_filter_expression(expression.filter)
                .set_expression_attribute_names(names)
                .set_expression_attribute_values(values)
                .set_limit(limit)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| transport("scan", e))?;
            (
                output.items,
                output.count,
                output.scanned_count,
                output.last_evaluated_key,
            )
        } else {
            let index_name = match plan.index() {
                IndexKind::Primary => None,
                IndexKind::Goals => Some(self.index_name.clone()),
            };
            let output = self
                .client
                .query()
                .table_name(&self.table_name)
                .set_index_name(index_name)
                .set_key_condition_expression(expression.key_condition)
                .set_filter_expression(expression.filter)
                .set_expression_attribute_names(names)
                .set_expression_attribute_values(values)
                .set_limit(limit)
                .set_exclusive_start_key(start_key)
                .scan_index_forward(!request.scan_descending)
                .send()
                .await
                .map_err(|e| transport("query", e))?;
            (
                output.items,
                output.count,
                output.scanned_count,
                output.last_evaluated_key,
            )
        };

        let items = decode_items(items.unwrap_or_default())?;
        let last_evaluated_key = last_evaluated_key
            .filter(|key| !key.is_empty())
            .map(|key| from_item_key(&key))
            .transpose()?;

        tracing::debug!(
            index = ?plan.index(),
            count,
            scanned_count,
            more = last_evaluated_key.is_some(),
            "dynamo query"
        );

        Ok(QueryPage {
            matched_count: count.max(0) as usize,
            scanned_count: scanned_count.max(0) as usize,
            items,
            last_evaluated_key,
        })
    }
}
