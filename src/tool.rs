// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! CLI tool for interacting with static hash files

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use humansize::{SizeFormatter, BINARY};
use static_hash_file::{BucketIndex, Config, HashFile, Record};
use std::path::PathBuf;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    prelude::*,
    registry::Registry,
};

macro_rules! die {
    ($fmt:literal, $($arg:tt)*) => {{
        eprintln!($fmt, $($arg)*);
        std::process::exit(1);
    }};

    ($msg:literal) => {{
        eprintln!($msg);
        std::process::exit(1);
    }};

    () => {{
        eprintln!("Program terminated unexpectedly");
        std::process::exit(1);
    }};
}

#[allow(unused_imports)]
use tracing::{debug, error, info, trace, warn};

pub fn init_tracing(quiet: bool, verbose: u8) -> (bool, LevelFilter) {
    let is_verbose = !quiet && verbose > 0;

    let level_filter = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    // Bridge log crate macros to tracing (for library code that uses log::*)
    tracing_log::LogTracer::init().expect("Failed to set log tracer");

    let registry = Registry::default();

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("SHF_LOG")
        .from_env_lossy();

    let subscriber = registry.with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .compact(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        die!("INTERNAL ERROR: setting default tracing::subscriber failed");
    }

    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing_panic::panic_hook(info);
        prev_hook(info); // daisy-chain to old panic hook
    }));

    (is_verbose, level_filter)
}

/// CLI tool for interacting with static hash files
#[derive(Parser, Debug)]
#[command(name = "shf")]
#[command(about = "CLI tool for interacting with static hash files")]
struct ToolArgs {
    /// Suppress all output except for errors. This overrides the -v flag.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Turn on verbose output. Supply -v multiple times to increase verbosity.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the hash file (will be created if it doesn't exist)
    hash_file_path: PathBuf,

    /// Number of primary buckets (must match the value the file was created with)
    #[arg(short, long, default_value_t = 5)]
    buckets: u64,

    /// Number of record slots per bucket (must match the value the file was created with)
    #[arg(short, long, default_value_t = 4)]
    slots: u16,

    /// Width of the record name in bytes (must match the value the file was created with)
    #[arg(long, default_value_t = 30)]
    name_width: u16,

    /// Width of the record field in bytes (must match the value the file was created with)
    #[arg(long, default_value_t = 20)]
    field_width: u16,

    /// Command to run
    #[command(subcommand)]
    command: ToolCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ToolCommand {
    /// Insert the reference records and print a few lookups to stderr
    Demo,
    /// Insert a record
    Add {
        /// The record key
        #[arg(allow_negative_numbers = true)]
        key: i32,
        /// The record name (truncated to the name width)
        name: String,
        /// The record field (truncated to the field width)
        field: String,
    },
    /// Find all records with a key
    Find {
        /// The key to look up
        #[arg(allow_negative_numbers = true)]
        key: i32,
    },
    /// List all live records
    #[command(visible_alias = "list", visible_alias = "ls")]
    Scan,
    /// Show hash file statistics
    Info,
}

/// Renders records as `[<Record: ...>, <Record: ...>]`
fn format_records(records: &[Record]) -> String {
    let items = records
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    format!("[{items}]")
}

fn handle_demo(hash_file: &mut HashFile) -> static_hash_file::Result<()> {
    let records = [
        Record::new(1, "Alvaro", "A1"),
        Record::new(1, "Alfredo", "A2"),
        Record::new(1, "Alejandro", "A3"),
        Record::new(1, "Alberto", "A4"),
        Record::new(1, "Alex", "A5"),
        Record::new(2, "Brazil", "B1"),
        Record::new(3, "Carlos", "C1"),
        Record::new(4, "Diego", "D1"),
        Record::new(4, "Don", "D2"),
        Record::new(5, "Enrique", "E1"),
        Record::new(6, "Federico", "F1"),
    ];

    for record in &records {
        hash_file.add(record)?;
    }

    info!("Inserted {} records", records.len());

    for key in [1, 2, 6] {
        eprintln!("{}", format_records(&hash_file.find(key)?));
    }

    Ok(())
}

fn handle_add(hash_file: &mut HashFile, record: &Record) -> static_hash_file::Result<()> {
    let layout = hash_file.layout();

    if record.name().len() > layout.name_width() || record.field().len() > layout.field_width() {
        warn!("Record {record} exceeds field widths and will be truncated");
    }

    hash_file.add(record)?;
    hash_file.sync()?;

    println!("OK");
    Ok(())
}

fn handle_find(hash_file: &mut HashFile, key: i32) -> static_hash_file::Result<()> {
    let records = hash_file.find(key)?;
    println!("{}", format_records(&records));
    Ok(())
}

fn handle_scan(hash_file: &mut HashFile) -> static_hash_file::Result<()> {
    let records = hash_file.scan()?;

    for record in &records {
        println!("{record}");
    }

    if records.is_empty() {
        println!("(empty)");
    }

    Ok(())
}

fn handle_info(hash_file: &mut HashFile) -> static_hash_file::Result<()> {
    let layout = hash_file.layout();
    let bucket_count = hash_file.bucket_count()?;
    let primary = hash_file.primary_bucket_count();

    println!("Path: {}", hash_file.path().display());
    println!(
        "Layout: {primary} primary buckets, {} slots/bucket, {}+{} byte fields",
        layout.slot_count(),
        layout.name_width(),
        layout.field_width(),
    );
    println!("Bucket size: {} bytes", layout.bucket_size());
    println!("Buckets: {bucket_count} ({} overflow)", bucket_count.saturating_sub(primary));
    println!(
        "Disk space: {}",
        SizeFormatter::new(bucket_count * layout.bucket_size(), BINARY),
    );
    println!("Records: {}", hash_file.scan()?.len());

    for idx in 0..primary {
        let chain = hash_file.chain_from(BucketIndex::new(idx))?;
        let chain = chain
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" -> ");

        println!("  Chain {idx}: {chain}");
    }

    Ok(())
}

fn execute_command(hash_file: &mut HashFile, cmd: ToolCommand) -> static_hash_file::Result<()> {
    match cmd {
        ToolCommand::Demo => handle_demo(hash_file),
        ToolCommand::Add { key, name, field } => {
            handle_add(hash_file, &Record::new(key, name, field))
        }
        ToolCommand::Find { key } => handle_find(hash_file, key),
        ToolCommand::Scan => handle_scan(hash_file),
        ToolCommand::Info => handle_info(hash_file),
    }
}

fn main() {
    let args = ToolArgs::parse();
    let (verbose, level_filter) = init_tracing(args.quiet, args.verbose);

    let cmd = ToolArgs::command();

    info!(
        "starting {} ({} {}), log level: {level_filter}",
        cmd.get_name(),
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let note = if verbose {
        ""
    } else {
        ". Note: Use -v (one or multiple times) for more information"
    };

    let mut hash_file = match Config::new(&args.hash_file_path)
        .bucket_count(args.buckets)
        .slot_count(args.slots)
        .name_width(args.name_width)
        .field_width(args.field_width)
        .open()
    {
        Ok(hf) => hf,
        Err(e) => die!("Error opening hash file: {}{}", e, note),
    };

    if let Err(e) = execute_command(&mut hash_file, args.command) {
        die!("Error: {}{}", e, note);
    }
}
