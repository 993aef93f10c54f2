use clap::{Parser, Subcommand};
use ferrous_wire_domain::CliOverrides;
use tracing::debug;

mod bootstrap;
mod commands;
mod hosts;
mod input;

#[derive(Parser)]
#[command(name = "ferrous-wire")]
#[command(version = "0.1.0")]
#[command(about = "Ferrous Wire - DNS message encoder, decoder and hosts responder")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Reject messages whose header counts disagree with their contents
    #[arg(long, global = true)]
    strict_counts: bool,

    /// Largest input message accepted, in bytes
    #[arg(long, global = true)]
    max_message_size: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build and encode one query per name
    Query {
        /// Names to query
        names: Vec<String>,

        /// File with more names, one per line
        #[arg(long = "names", value_name = "FILE")]
        names_file: Option<String>,

        /// Query type (A, AAAA, MX, TYPE65280, ...)
        #[arg(
            short = 't',
            long = "type",
            default_value = "A",
            value_parser = commands::query::parse_qtype
        )]
        qtype: u16,

        /// ID of the first query; later queries count up from it (random when omitted)
        #[arg(long)]
        id: Option<u16>,

        /// Write raw wire bytes instead of a hex dump
        #[arg(long)]
        raw: bool,
    },

    /// Decode a message and print it
    Decode {
        /// Input file (stdin when omitted)
        file: Option<String>,

        /// Input is hex text rather than raw bytes
        #[arg(long)]
        hex: bool,
    },

    /// Answer a query from a hosts file
    Answer {
        /// Hosts file (overrides [hosts] path)
        #[arg(long, value_name = "FILE")]
        hosts: Option<String>,

        /// Query file (stdin when omitted)
        query: Option<String>,

        /// Input is hex text rather than raw bytes
        #[arg(long)]
        hex: bool,

        /// Write raw wire bytes instead of a hex dump
        #[arg(long)]
        raw: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        strict_counts: cli.strict_counts.then_some(true),
        max_message_size: cli.max_message_size,
        hosts_path: match &cli.command {
            Command::Answer { hosts, .. } => hosts.clone(),
            _ => None,
        },
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    debug!(
        strict_counts = config.codec.strict_counts,
        max_message_size = config.codec.max_message_size,
        "Ferrous Wire v{}",
        env!("CARGO_PKG_VERSION")
    );

    match cli.command {
        Command::Query {
            names,
            names_file,
            qtype,
            id,
            raw,
        } => commands::query::run(
            &config,
            commands::query::QueryArgs {
                names,
                names_file,
                qtype,
                id,
                raw,
            },
        ),
        Command::Decode { file, hex } => commands::decode::run(&config, file.as_deref(), hex),
        Command::Answer {
            query,
            hex,
            raw,
            ..
        } => commands::answer::run(&config, query.as_deref(), hex, raw),
    }
}
