use anyhow::Context;
use serde_json::json;

use crate::auth::issue_admin_token;
use crate::cli::OutputFormat;
use crate::config::config;

/// Mint an admin token locally. Needs the same secret the server runs with.
pub fn handle(subject: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config().security;
    let secret = security
        .admin_jwt_secret
        .as_deref()
        .context("ADMIN_JWT_SECRET is not set")?;
    let token = issue_admin_token(secret, subject, security.jwt_expiry_hours)?;

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "token": token,
                "subject": subject,
                "expires_in_hours": security.jwt_expiry_hours
            }))?
        ),
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}
