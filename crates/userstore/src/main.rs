mod cli;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use userstore::handler::handle_raw_event;
use userstore::storage::DynamoDbBackend;
use userstore::{FieldValue, LoginOutcome, User, UserStore};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "userstore=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.store_config();
    tracing::debug!(store = %config.target_display(), "Connecting");

    let store = UserStore::new(DynamoDbBackend::from_config(&config).await);

    match cli.command {
        Commands::Find {
            attribute,
            value,
            value_type,
        } => {
            let value = FieldValue::parse_as(&value, value_type.into())?;
            let users = store.find(&attribute, value).await?;
            print(&users, cli.compact)?;
        }
        Commands::FindOne {
            attribute,
            value,
            value_type,
        } => {
            let value = FieldValue::parse_as(&value, value_type.into())?;
            let user = store.find_one(&attribute, value).await?;
            print(&user, cli.compact)?;
        }
        Commands::Exists { user_id } => {
            let user = store.exists(&user_id).await?;
            print(&user, cli.compact)?;
        }
        Commands::Create {
            user_id,
            session_id,
        } => {
            let user = User {
                sessionid: session_id,
                ..User::new(user_id)
            };
            let outcome = store.create(&user).await?;
            print(&outcome, cli.compact)?;
        }
        Commands::Login {
            user_id,
            session_id,
        } => {
            let user = User::new(user_id).with_session(session_id);
            let answer = match store.login(&user).await? {
                LoginOutcome::Created => json!({ "created": true }),
                LoginOutcome::SessionUpdated(updated) => {
                    json!({ "created": false, "updated": updated })
                }
            };
            print(&answer, cli.compact)?;
        }
        Commands::Logout { user_id } => {
            let updated = store.logout(&User::new(user_id)).await?;
            print(&updated, cli.compact)?;
        }
        Commands::AddCredit { user_id } => {
            let updated = store.add_credit(&User::new(user_id)).await?;
            print(&updated, cli.compact)?;
        }
        Commands::UseCredit { user_id } => {
            let updated = store.use_credit(&User::new(user_id)).await?;
            print(&updated, cli.compact)?;
        }
        Commands::Whoami { cookie } => {
            let user = store.user_from_cookie(cookie.as_deref()).await?;
            print(&user, cli.compact)?;
        }
        Commands::Invoke { event } => {
            let answer = handle_raw_event(&store, &event).await?;
            print(&answer, cli.compact)?;
        }
    }

    Ok(())
}

fn print<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{out}");
    Ok(())
}
