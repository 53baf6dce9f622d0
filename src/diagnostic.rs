//! Interactive console mode for exercising the upstream API without an MCP host.

use crate::core::error::Result;
use crate::upstream::XeamsClient;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Address offered when the operator just presses enter at the first prompt.
pub const DEFAULT_TEST_EMAIL: &str = "support@AnInvalidDomain.com";

/// Runs the prompts against the process console.
pub async fn run(client: &XeamsClient, default_email: &str) -> Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    let output = tokio::io::stdout();
    run_with(client, default_email, input, output).await
}

/// Prompts for one address to validate and one to check, printing each result.
pub async fn run_with<R, W>(
    client: &XeamsClient,
    default_email: &str,
    input: R,
    mut output: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    prompt(
        &mut output,
        &format!("Enter an email to validate [{}]: ", default_email),
    )
    .await?;
    let answer = lines.next_line().await?.unwrap_or_default();
    let email = match answer.trim() {
        "" => default_email.to_string(),
        typed => typed.to_string(),
    };
    let outcome = client.validate(&email, client.sender_email()).await;
    let report = format!(
        "Email Validation Result for {}: {} ({})\n",
        email,
        outcome.code(),
        outcome.describe()
    );
    output.write_all(report.as_bytes()).await?;

    prompt(&mut output, "Enter a recipient's email to check status: ").await?;
    let recipient = lines
        .next_line()
        .await?
        .unwrap_or_default()
        .trim()
        .to_string();
    let records = client.check_status(&recipient, client.sender_email()).await;
    let report = format!(
        "Email Status Results for {}: {}\n",
        recipient,
        serde_json::to_string_pretty(&records)?
    );
    output.write_all(report.as_bytes()).await?;
    for record in &records {
        if let Some(status) = record.delivery_status() {
            let line = format!("  {} -> {}\n", record.subject, status);
            output.write_all(line.as_bytes()).await?;
        }
    }
    output.flush().await?;
    Ok(())
}

async fn prompt<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}
