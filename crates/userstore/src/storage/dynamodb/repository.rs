//! DynamoDB repository implementation.
//!
//! Implements `UserBackend` from `userstore_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;

use userstore_core::storage::{FieldValue, Result, UpdateRequest, UpdatedAttributes, UserBackend};
use userstore_core::user::{User, USER_ID_ATTR};

use super::conversions::{
    field_to_attribute, item_to_user, item_to_values, user_to_item, values_to_item,
};
use super::error::{map_get_item_error, map_put_item_error, map_scan_error, map_update_item_error};
use crate::config::{create_client, StoreConfig};

/// DynamoDB-based user backend.
///
/// Holds one client handle and the table it talks to; both are fixed at
/// construction.
#[derive(Debug, Clone)]
pub struct DynamoDbBackend {
    client: Client,
    table_name: String,
}

impl DynamoDbBackend {
    /// Creates a new backend with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new backend from a store configuration, using the AWS SDK
    /// default credential chain.
    pub async fn from_config(config: &StoreConfig) -> Self {
        let client = create_client(config).await;
        Self::new(client, config.table_name.clone())
    }

    fn key(user_id: &str) -> AttributeValue {
        AttributeValue::S(user_id.to_string())
    }
}

#[async_trait]
impl UserBackend for DynamoDbBackend {
    async fn scan(&self, attribute: &str, value: &FieldValue) -> Result<Vec<User>> {
        // Single page only; callers use this for small result sets.
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .filter_expression("#attr = :value")
            .expression_attribute_names("#attr", attribute)
            .expression_attribute_values(":value", field_to_attribute(value))
            .send()
            .await
            .map_err(|e| map_scan_error(e, &self.table_name))?;

        if result.last_evaluated_key.is_some() {
            tracing::warn!(
                table = %self.table_name,
                attribute,
                "Scan result was truncated; only the first page is returned"
            );
        }

        let items = result.items.unwrap_or_default();
        items.iter().map(item_to_user).collect()
    }

    async fn get(&self, user_id: &str) -> Result<Option<User>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(USER_ID_ATTR, Self::key(user_id))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, &self.table_name, user_id))?;

        match result.item {
            Some(item) => Ok(Some(item_to_user(&item)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, user: &User) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(user_to_item(user)))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, &self.table_name, &user.user_id))?;

        Ok(())
    }

    async fn update(&self, user_id: &str, request: &UpdateRequest) -> Result<UpdatedAttributes> {
        // DynamoDB rejects empty name/value maps, so only send them when present.
        let names = (!request.names.is_empty()).then(|| request.names.clone());
        let values = (!request.values.is_empty()).then(|| values_to_item(&request.values));

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(USER_ID_ATTR, Self::key(user_id))
            .update_expression(&request.update_expression)
            .set_condition_expression(request.condition_expression.clone())
            .set_expression_attribute_names(names)
            .set_expression_attribute_values(values)
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, &self.table_name, user_id))?;

        match result.attributes {
            Some(attributes) => item_to_values(&attributes),
            None => Ok(UpdatedAttributes::new()),
        }
    }
}
