use crate::cli::utils::output_value;
use crate::cli::OutputFormat;
use crate::client::StorefrontClient;

pub async fn handle(
    name: &str,
    email: &str,
    client: &StorefrontClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let user = client.create_signup(name, email).await?;
    output_value(&output_format, &user, |user| {
        println!("✓ Signed up {} <{}>", user.name, user.email)
    })
}
