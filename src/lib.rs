pub mod aggregate;
pub mod archive;
pub mod cli;
pub mod convert;
pub mod discover;
pub mod download;
pub mod error;
pub mod io_utils;
pub mod markup;
pub mod parse;
pub mod record;
pub mod writer;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

pub use crate::{
    aggregate::aggregate,
    error::ScrubError,
    markup::strip,
    parse::{LineOutcome, SkipReason, parse_line},
    record::Record,
    writer::{write_csv, write_records},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("jsonl_scrub", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Convert(args) => convert::execute_convert(&args),
        Commands::Unpack(args) => convert::execute_unpack(&args),
        Commands::Fetch(args) => convert::execute_fetch(&args),
    }
}
