use anyhow::{Context, Result};
use clap::Parser;
use client_core::{load_settings, report, DiagnosticClient, IntakeDraft, SUBMIT_FAILURE_MESSAGE};

/// Headless RevDX submitter: runs one diagnostic round trip and prints the
/// rendered report. Values are accepted as raw text and validated exactly
/// like the intake form.
#[derive(Parser, Debug)]
struct Args {
    /// Diagnostic endpoint; overrides revdx.toml and REVDX_DIAGNOSTIC_URL.
    #[arg(long)]
    diagnostic_url: Option<String>,
    /// Total request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
    #[arg(long)]
    company_name: String,
    #[arg(long)]
    industry: String,
    #[arg(long)]
    current_arr: String,
    #[arg(long)]
    target_arr: String,
    #[arg(long)]
    sales_team_size: String,
    #[arg(long)]
    average_deal_size: String,
    #[arg(long)]
    sales_cycle_length: String,
    #[arg(long)]
    win_rate: String,
    #[arg(long)]
    context: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = args.diagnostic_url {
        settings.diagnostic_url = url;
    }
    if let Some(secs) = args.timeout_secs {
        settings.request_timeout_secs = secs;
    }

    let draft = IntakeDraft {
        company_name: args.company_name,
        industry: args.industry,
        current_arr: args.current_arr,
        target_arr: args.target_arr,
        sales_team_size: args.sales_team_size,
        average_deal_size: args.average_deal_size,
        sales_cycle_length: args.sales_cycle_length,
        win_rate: args.win_rate,
        context: args.context,
    };
    let request = draft.validate()?;

    let client = DiagnosticClient::new(&settings)?;
    let result = client
        .run_diagnostic(&request.into_submission())
        .await
        .context(SUBMIT_FAILURE_MESSAGE)?;

    print!("{}", report::render_text_report(&result));
    Ok(())
}
