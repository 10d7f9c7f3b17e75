//! Library Layout CLI
//!
//! Usage:
//!   library-layout [OPTIONS] [FILE]
//!
//! Options:
//!   -o, --out <DIR>          Output directory (default: data/layout)
//!   -f, --floors <FILE>      Floor plan file (TOML format)
//!   --top-subs <N>           Named subcategories per floor (default: 8)
//!   --min-sub-books <N>      Books needed for a named subcategory (default: 200)
//!   --print-floors           Print the built-in floor plan
//!   -v, --verbose            Debug logging
//!   -h, --help               Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use library_layout::floorplan::DEFAULT_FLOOR_PLAN;
use library_layout::{
    generate_with_config, write_artifacts, CatalogError, FloorPlan, GenerateConfig,
    GenerateError, LayoutConfig,
};

#[derive(Parser)]
#[command(name = "library-layout")]
#[command(about = "Deterministic floor, room and shelf layout for a book catalog")]
struct Cli {
    /// Catalog file, one JSON object per line (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "data/layout")]
    out: PathBuf,

    /// Floor plan file (TOML format)
    #[arg(short, long)]
    floors: Option<PathBuf>,

    /// Maximum named subcategories per floor
    #[arg(long, default_value_t = 8)]
    top_subs: usize,

    /// Merge subcategories smaller than this into Other
    #[arg(long, default_value_t = 200)]
    min_sub_books: usize,

    /// Print the built-in floor plan and exit
    #[arg(long)]
    print_floors: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if cli.print_floors {
        println!("{}", DEFAULT_FLOOR_PLAN.trim());
        return;
    }

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Load floor plan
    let plan = match &cli.floors {
        Some(path) => match FloorPlan::from_file(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error loading floor plan '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => FloorPlan::default(),
    };

    // Read input
    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let config = GenerateConfig::new().with_plan(plan).with_layout(
        LayoutConfig::new()
            .with_top_subs(cli.top_subs)
            .with_min_sub_books(cli.min_sub_books),
    );

    let layout = match generate_with_config(&source, &config) {
        Ok(layout) => layout,
        Err(GenerateError::Catalog(e @ CatalogError::Malformed { .. })) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match write_artifacts(&layout, &cli.out, &config.output) {
        Ok(written) => {
            println!("Wrote: {}", written.floor_index.display());
            println!("Wrote: {}", written.slots.display());
            println!("Wrote: {}", written.primary_locations.display());
            println!("roomsTotal: {}", layout.rooms_total);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_intro() {
    println!(
        r#"Library Layout - deterministic shelf placement for a book catalog

USAGE:
    library-layout [OPTIONS] [FILE]
    cat bookMetaById.v1.jsonl | library-layout --out data/layout

OPTIONS:
    -o, --out <DIR>         Output directory (default: data/layout)
    -f, --floors <FILE>     Custom floor plan (TOML file)
    --top-subs <N>          Named subcategories per floor (default: 8)
    --min-sub-books <N>     Books needed for a named subcategory (default: 200)
    --print-floors          Print the built-in floor plan
    -v, --verbose           Debug logging
    -h, --help              Print help

OUTPUT:
    floors7.v1.json                    floors, room ranges, subcategories
    slots7.v1.json                     book id and sub-id per slot
    primaryLocationByBookId.v1.json    first location of every book
    tags/room-NNN.v1.json              shelf section tags per room

Run --print-floors for a starting point when writing a custom floor plan."#
    );
}
