//! Roadcast CLI — consumer-side inspection of a running producer.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "roadcast")]
#[command(version, about = "Roadcast — simulation telemetry consumer tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode and print a shared telemetry region once.
    Peek {
        /// Path to the region file.
        path: String,
    },

    /// Listen for published telemetry datagrams and print them.
    Listen {
        /// Address to bind, e.g. 127.0.0.1:4545.
        #[arg(short, long, default_value = "127.0.0.1:4545")]
        addr: String,

        /// Stop after this many messages (0 = run forever).
        #[arg(short, long, default_value_t = 0)]
        count: u64,
    },

    /// Request messages from a request/reply producer and print them.
    Request {
        /// Producer address, e.g. 127.0.0.1:4546.
        #[arg(short, long, default_value = "127.0.0.1:4546")]
        addr: String,

        /// Number of messages to request.
        #[arg(short, long, default_value_t = 1)]
        count: u64,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Peek { path } => commands::peek(&path),
        Commands::Listen { addr, count } => commands::listen(&addr, count),
        Commands::Request { addr, count } => commands::request(&addr, count),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
