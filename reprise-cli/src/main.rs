mod commands;
mod logging;
mod position;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::position::{Encoding, PositionSpec};

#[derive(Debug, Parser)]
#[command(name = "reprise", about = "Replay and attack captured HTTP requests")]
struct Cli {
    /// Config file; defaults to the user config dir.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send one raw request and print the response.
    Send {
        #[arg(long)]
        request: PathBuf,
        #[arg(long)]
        https: bool,
    },
    /// Expand a marked template and replay every variant.
    Attack {
        #[arg(long)]
        template: PathBuf,
        #[arg(long = "type", default_value = "sniper")]
        attack_type: String,
        /// One per marker, in order: list:FILE, words:a,b,c or range:FROM:TO[:STEP].
        #[arg(long = "position", required = true)]
        positions: Vec<PositionSpec>,
        #[arg(long)]
        https: bool,
        #[arg(long)]
        dry_run: bool,
        #[arg(long)]
        max_requests: Option<usize>,
        #[arg(long)]
        prefix: Option<String>,
        #[arg(long)]
        suffix: Option<String>,
        /// Applied to every payload, in the order given.
        #[arg(long, value_enum)]
        encode: Vec<Encoding>,
        #[arg(long)]
        grep: Vec<String>,
        #[arg(long)]
        extract: Vec<String>,
    },
    /// Drop duplicate requests from a JSON capture file.
    Dedup {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;
    let config_path = cli
        .config
        .unwrap_or_else(reprise_replay::ReplayConfig::default_path);
    let config = reprise_replay::ReplayConfig::load(&config_path).map_err(|err| err.to_string())?;

    match cli.command {
        Command::Send { request, https } => commands::send(&config, &request, https).await,
        Command::Attack {
            template,
            attack_type,
            positions,
            https,
            dry_run,
            max_requests,
            prefix,
            suffix,
            encode,
            grep,
            extract,
        } => {
            let args = commands::AttackArgs {
                template,
                attack_type,
                positions,
                https,
                dry_run,
                max_requests,
                processing: reprise_fuzzer::PayloadProcessing {
                    prefix: prefix.unwrap_or_default(),
                    suffix: suffix.unwrap_or_default(),
                    transforms: encode.into_iter().map(Into::into).collect(),
                },
                analysis: reprise_fuzzer::AnalysisConfig { grep, extract },
            };
            commands::attack(&config, args).await
        }
        Command::Dedup { input, output } => commands::dedup(&input, output.as_deref()),
    }
}
