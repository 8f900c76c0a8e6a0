use std::env;

/// Default table name when `USERSTORE_TABLE` is unset.
pub const DEFAULT_TABLE_NAME: &str = "users";
/// Default AWS region when `AWS_REGION` is unset.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Store configuration. Immutable once a backend has been built from it;
/// point at another table or region by building another store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Table holding the user records (default: "users")
    pub table_name: String,
    /// AWS region (default: "us-east-1")
    pub region: String,
    /// Custom endpoint URL, e.g. DynamoDB Local
    pub endpoint_url: Option<String>,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `USERSTORE_TABLE` - Table name (default: "users")
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `AWS_ENDPOINT_URL` - Custom endpoint (default: none)
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("USERSTORE_TABLE")
                .unwrap_or_else(|_| DEFAULT_TABLE_NAME.to_string()),
            region: env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
            endpoint_url: env::var("AWS_ENDPOINT_URL").ok(),
        }
    }

    /// Sets the table name.
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    /// Sets the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Sets a custom endpoint.
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("table '{}' on local DynamoDB ({})", self.table_name, url),
            None => format!(
                "table '{}' on AWS DynamoDB (region: {})",
                self.table_name, self.region
            ),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Creates a DynamoDB client for the configured region and endpoint.
#[cfg(feature = "dynamodb")]
pub async fn create_client(config: &StoreConfig) -> aws_sdk_dynamodb::Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    aws_sdk_dynamodb::Client::new(&sdk_config)
}
