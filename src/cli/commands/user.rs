//! User account command handlers

use std::io::Write;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, SeaOrmAuthService};

fn read_password(provided: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = provided {
        return Ok(password);
    }

    print!("Password: ");
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

async fn auth_service(config: &Config) -> anyhow::Result<SeaOrmAuthService> {
    let store = Store::new(&config.general.database_path).await?;
    Ok(SeaOrmAuthService::new(store, config.security.clone()))
}

pub async fn cmd_user_add(
    config: &Config,
    username: &str,
    password: Option<String>,
) -> anyhow::Result<()> {
    let password = read_password(password)?;
    let user = auth_service(config)
        .await?
        .create_user(username, &password)
        .await?;

    println!("Created user '{}' (ID: {})", user.username, user.id);
    Ok(())
}

pub async fn cmd_user_passwd(
    config: &Config,
    username: &str,
    password: Option<String>,
) -> anyhow::Result<()> {
    let password = read_password(password)?;
    auth_service(config)
        .await?
        .set_password(username, &password)
        .await?;

    println!("Password updated for '{username}'");
    Ok(())
}
