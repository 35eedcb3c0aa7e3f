use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use regflow_api::{MockApi, RegistrationApi, delay_from_env};
use regflow_types::Step;

/// Terminal registration wizard: phone, email, name, password.
#[derive(Debug, Parser)]
#[command(name = "regflow", version, about)]
struct Cli {
    /// Artificial delay applied to every service request, in milliseconds
    /// (defaults to REGFLOW_API_DELAY_MS, then 2000).
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Force the service to reject a step's requests; repeatable.
    /// Accepts phone, email, name, or password.
    #[arg(long = "fail", value_name = "STEP")]
    fail_steps: Vec<Step>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let delay = cli.delay_ms.map(Duration::from_millis).unwrap_or_else(delay_from_env);
    let mut mock = MockApi::new(delay);
    for step in cli.fail_steps {
        mock = mock.fail_step(step);
    }

    let api: Arc<dyn RegistrationApi> = Arc::new(mock);
    regflow_tui::run(api).await
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    // Log to stderr; stdout belongs to the alternate-screen UI.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
