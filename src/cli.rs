use anyhow::Result;
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::load_config;
use crate::layout::compute_layout;
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::parser::parse_family_data;

#[derive(Parser, Debug)]
#[command(
    name = "kintree",
    version,
    about = "Family-tree layout engine (JSON snapshot in, positioned forest out)"
)]
pub struct Args {
    /// Input snapshot (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Layout config file (JSON5, partial overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Pretty-print the JSON dump
    #[arg(long = "pretty")]
    pub pretty: bool,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let data = parse_family_data(&input)?;
    let layout = compute_layout(&data, &config);

    match args.output.as_deref() {
        Some(path) => write_layout_dump(path, &layout, args.pretty)?,
        None => {
            let dump = LayoutDump::from_layout(&layout);
            let rendered = if args.pretty {
                serde_json::to_string_pretty(&dump)?
            } else {
                serde_json::to_string(&dump)?
            };
            println!("{rendered}");
        }
    }

    Ok(())
}

// Warnings go to stderr so piping the dump stays clean; RUST_LOG overrides.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
