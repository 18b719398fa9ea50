use clap::Parser;
use dependency_changes::{self, Envelope, Outcome};
use std::path::PathBuf;
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the webhook payload of the triggering event
    #[arg(short, long, env = "GITHUB_EVENT_PATH")]
    event_path: PathBuf,

    /// Name of the triggering event
    #[arg(short = 'n', long, env = "GITHUB_EVENT_NAME", default_value = "pull_request")]
    event_name: String,

    /// Token used to call the GitHub API
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// GitHub API base URL (for GitHub Enterprise)
    #[arg(short, long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Print the comment instead of posting it
    #[arg(short, long)]
    dry_run: bool,

    /// Log level
    #[arg(global = true, short, long, value_enum, default_value = "error")]
    log: LevelFilter,
}

#[tokio::main]
async fn main() -> dependency_changes::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive(cli.log.into());

    fmt()
        .with_env_filter(env_filter)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(true)
        .pretty()
        .init();

    let envelope = Envelope::from_path(&cli.event_name, &cli.event_path, cli.dry_run)?;
    debug!(
        number = envelope.payload.number,
        action = %envelope.payload.action,
        "Event loaded"
    );

    let processor = dependency_changes::new(&cli.token, cli.api_url.as_deref())?;

    match processor.process(&envelope).await? {
        Outcome::NoChanges => println!("No dependencies changed"),
        Outcome::DryRun(body) => print!("{body}"),
        Outcome::Commented(body) => {
            println!("📝 Posted comment on {}:\n", envelope.payload.pull_request.head.sha);
            print!("{body}");
        }
    }

    Ok(())
}
