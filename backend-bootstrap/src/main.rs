use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "mensa-backend")]
#[command(about = "Mensa Campus Cafeteria Backend", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,
    /// Directory for daily-rolling log files; stdout only when unset
    #[arg(long)]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let mut _log_guard = None;
    if let Some(log_dir) = &args.log_dir {
        let appender = tracing_appender::rolling::daily(log_dir, "mensa-backend.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        _log_guard = Some(guard);
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    if let Some(config) = args.config {
        std::env::set_var("MENSA_CONFIG", config);
    }

    backend_bootstrap::run_standalone().await
}
