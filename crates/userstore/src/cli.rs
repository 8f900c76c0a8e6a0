//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};

use userstore::{StoreConfig, ValueKind};

/// Manage user records, sessions and credits stored in DynamoDB.
#[derive(Debug, Parser)]
#[command(name = "userstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Table holding the user records.
    #[arg(long, env = "USERSTORE_TABLE", default_value = userstore::config::DEFAULT_TABLE_NAME)]
    pub table: String,

    /// AWS region.
    #[arg(long, env = "AWS_REGION", default_value = userstore::config::DEFAULT_REGION)]
    pub region: String,

    /// Custom DynamoDB endpoint, e.g. http://localhost:8000 for DynamoDB Local.
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Print JSON on a single line.
    #[arg(long)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            table_name: self.table.clone(),
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
        }
    }
}

/// How a command-line value is matched against stored attributes.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ValueType {
    /// Match as a string (ids and sessions are always strings).
    #[default]
    String,
    /// Match as a number, e.g. credits.
    Number,
    /// Match as true/false, e.g. the cleared-session marker.
    Bool,
}

impl From<ValueType> for ValueKind {
    fn from(t: ValueType) -> Self {
        match t {
            ValueType::String => ValueKind::Str,
            ValueType::Number => ValueKind::Int,
            ValueType::Bool => ValueKind::Bool,
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List users whose attribute equals a value (full scan, first page only).
    Find {
        attribute: String,
        value: String,
        /// Type of the value.
        #[arg(long = "type", value_enum, default_value = "string")]
        value_type: ValueType,
    },
    /// Like find, but fail unless exactly one user matches.
    FindOne {
        attribute: String,
        value: String,
        /// Type of the value.
        #[arg(long = "type", value_enum, default_value = "string")]
        value_type: ValueType,
    },
    /// Look up a user by id.
    Exists { user_id: String },
    /// Create (or overwrite) a user with zero credits.
    Create {
        user_id: String,
        #[arg(long)]
        session_id: Option<String>,
    },
    /// Create the user if needed, otherwise set its session.
    Login { user_id: String, session_id: String },
    /// Clear the user's session.
    Logout { user_id: String },
    /// Add one credit.
    AddCredit { user_id: String },
    /// Spend one credit; fails when the user has none left.
    UseCredit { user_id: String },
    /// Resolve the user behind a raw Cookie header.
    Whoami {
        #[arg(long)]
        cookie: Option<String>,
    },
    /// Run a JSON event through the function entry point, e.g.
    /// '{"action":"get","key":"sessionid","value":"abc123"}'.
    Invoke { event: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use userstore::FieldValue;

    fn find_value(args: &[&str]) -> FieldValue {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Find {
                value, value_type, ..
            }
            | Commands::FindOne {
                value, value_type, ..
            } => FieldValue::parse_as(&value, value_type.into()).unwrap(),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_find_value_is_a_string_by_default() {
        let value = find_value(&["userstore", "find", "user-id", "42"]);
        assert_eq!(value, FieldValue::from("42"));

        let value = find_value(&["userstore", "find-one", "sessionid", "123456"]);
        assert_eq!(value, FieldValue::from("123456"));
    }

    #[test]
    fn test_find_value_with_explicit_type() {
        let value = find_value(&["userstore", "find", "credits", "2", "--type", "number"]);
        assert_eq!(value, FieldValue::Int(2));

        let value = find_value(&["userstore", "find", "sessionid", "false", "--type", "bool"]);
        assert_eq!(value, FieldValue::Bool(false));
    }
}
