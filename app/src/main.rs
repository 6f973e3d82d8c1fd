#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, Command, CommandFactory, FromArgMatches, Parser};
use gxfilter_config::{FilterConfig, MissingArgument};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;

use command::{CommandStrategy, FilterInput, FilterStrategy};

const EXAMPLE: &str = "\
example use:
    gxfilter --ids /path/to/ids --gff /path/to/gtf --feature exon --noversion > gff_filtered";

#[derive(Parser, Debug)]
#[command(name = "gxfilter", version)]
#[command(
    about = "Given a list of gene names/ids in a file and a gtf/gff file, filter the gtf/gff file for features annotated with input names/ids",
    long_about = None,
    after_help = EXAMPLE,
    arg_required_else_help = true,
    disable_version_flag = true
)]
struct Cli {
    /// Path to file with gene names/ids. One entry per line, supports gzipped (.gz) files
    #[arg(short = 'i', long, value_name = "PATH")]
    ids: Option<PathBuf>,

    /// Path to GTF/GFF formatted file. Supports gzipped (.gz) files
    #[arg(short = 'g', long, value_name = "PATH")]
    gff: Option<PathBuf>,

    /// Feature to parse, from the 3rd column in GTF/GFF formatted files
    #[arg(
        short = 'f',
        long,
        value_name = "FEATURE",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    feature: Option<String>,

    /// Omit version numbers from gene names/ids before filtering
    #[arg(short = 'n', long)]
    noversion: bool,

    /// JSON preset with default values for the options above
    #[arg(short = 'c', long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// The derived command with `-v` in place of clap's default `-V`.
fn cli_command() -> Command {
    Cli::command().arg(
        Arg::new("version")
            .short('v')
            .long("version")
            .action(ArgAction::Version)
            .help("Show version information and exit"),
    )
}

fn parse_cli() -> Result<Cli, clap::Error> {
    let matches = cli_command().try_get_matches()?;
    Cli::from_arg_matches(&matches)
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        ids,
        gff,
        feature,
        noversion,
        config,
    } = cli;
    let overrides = FilterConfig {
        ids,
        gff,
        feature,
        noversion,
    };

    let config = match config {
        Some(path) => FilterConfig::load(&path)?.merge(overrides),
        None => overrides,
    };

    FilterStrategy.execute(FilterInput::from(config.resolve()?))
}

fn main() -> ExitCode {
    let cli = match parse_cli() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    if let Err(e) = init_tracing() {
        eprintln!("ERROR! cannot initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(missing) = e.downcast_ref::<MissingArgument>() {
                eprintln!("ERROR! {missing}");
                eprintln!("{}", cli_command().render_usage());
            } else {
                eprintln!("ERROR! {e}. Check your input");
                eprintln!("exiting...");
            }
            ExitCode::FAILURE
        }
    }
}
