//! bin2rpk - generate an RPK file from bin file(s)
//!
//! Usage: bin2rpk [OPTIONS] <main_file>

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rpk_builder::{DiagnosticReporter, PcbType, Pipeline, PipelineConfig};
use tracing_subscriber::EnvFilter;

/// Paged PCB variants that can be forced from the command line
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum PagedVariant {
    /// paged7
    #[value(name = "7")]
    Paged7,
    /// paged12k
    #[value(name = "12k")]
    Paged12k,
    /// paged (16K)
    #[value(name = "16k")]
    Paged16k,
    /// paged377
    #[value(name = "377")]
    Paged377,
    /// paged378
    #[value(name = "378")]
    Paged378,
    /// paged379i
    #[value(name = "379")]
    Paged379,
}

impl From<PagedVariant> for PcbType {
    fn from(variant: PagedVariant) -> Self {
        match variant {
            PagedVariant::Paged7 => PcbType::Paged7,
            PagedVariant::Paged12k => PcbType::Paged12k,
            PagedVariant::Paged16k => PcbType::Paged,
            PagedVariant::Paged377 => PcbType::Paged377,
            PagedVariant::Paged378 => PcbType::Paged378,
            PagedVariant::Paged379 => PcbType::Paged379i,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "bin2rpk")]
#[command(version)]
#[command(about = "Generate an RPK file from bin file(s)", long_about = None)]
struct Args {
    /// Main .bin file (or a zip archive containing the bin files)
    #[arg(required = true)]
    main_file: PathBuf,

    /// Force a certain paged variant
    #[arg(short, long, value_enum)]
    paged: Option<PagedVariant>,

    /// RPK filename (automatically chosen if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug output and full error causes
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    if let Err(e) = run(&args) {
        DiagnosticReporter::new().report_error(&e, args.debug);
        process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = PipelineConfig {
        forced_pcb: args.paged.map(PcbType::from),
        ..PipelineConfig::default()
    };
    let pipeline = Pipeline::new(config);

    pipeline
        .convert(&args.main_file, args.output.as_deref())
        .with_context(|| format!("cannot convert {}", args.main_file.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_paged_choices() {
        let args = Args::try_parse_from(["bin2rpk", "-p", "379", "game.bin"]).unwrap();
        assert_eq!(args.paged.map(PcbType::from), Some(PcbType::Paged379i));

        let args = Args::try_parse_from(["bin2rpk", "--paged", "16k", "-o", "out.rpk", "game.bin"]).unwrap();
        assert_eq!(args.paged.map(PcbType::from), Some(PcbType::Paged));
        assert_eq!(args.output, Some(PathBuf::from("out.rpk")));

        assert!(Args::try_parse_from(["bin2rpk", "-p", "16", "game.bin"]).is_err());
    }
}
