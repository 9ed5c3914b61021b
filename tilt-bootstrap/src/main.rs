use anyhow::Result;
use clap::{Parser, Subcommand};

use tilt_bootstrap::{init_tracing, run_assess, run_check, run_server, AppContext, AssessSource};
use tilt_infrastructure::{AppConfig, CONFIG_ENV};

#[derive(Parser, Debug)]
#[command(name = "tilt-agent")]
#[command(about = "Tilt detection agent", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API and run periodic session checks (default)
    Serve,
    /// Evaluate the rule set against one session file and print the report
    Check {
        #[arg(short, long)]
        session: Option<String>,
    },
    /// Score a metrics file, or a session file aggregated into metrics, and
    /// print the assessment
    Assess {
        #[arg(short, long, conflicts_with = "session", required_unless_present = "session")]
        metrics: Option<String>,
        #[arg(short, long)]
        session: Option<String>,
        #[arg(long)]
        session_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = &args.config {
        std::env::set_var(CONFIG_ENV, config);
    }

    let config = AppConfig::load().await?;
    let _guard = init_tracing(config.log_dir.as_deref())?;
    let context = AppContext::new(&config)?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => run_server(context).await,
        Command::Check { session } => {
            let path = session
                .or_else(|| config.session_path.clone())
                .ok_or_else(|| anyhow::anyhow!("no session file given and session_path is not configured"))?;
            let report = run_check(context, &path).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Command::Assess {
            metrics,
            session,
            session_id,
        } => {
            let source = match (metrics, session) {
                (Some(path), _) => AssessSource::Metrics(path),
                (None, Some(path)) => AssessSource::Session(path),
                (None, None) => anyhow::bail!("either --metrics or --session is required"),
            };
            let assessment = run_assess(context, source, session_id).await?;
            println!("{}", serde_json::to_string_pretty(&assessment)?);
            Ok(())
        }
    }
}
