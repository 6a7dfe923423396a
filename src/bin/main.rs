use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "omdb-explorer")]
#[command(about = "Search OMDb, browse movie details and keep a favorites list", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "omdb-explorer.yaml")]
    config: String,

    /// Log at debug level for this crate
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let default_filter = if args.debug {
        "omdb_explorer=debug,tower_http=debug"
    } else {
        "omdb_explorer=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = omdb_explorer::run(&args.config, args.debug).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
