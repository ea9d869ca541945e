//! Coaster Track Generator
//!
//! Reads a template track design, replaces its element sequence with a
//! freshly generated closed circuit and writes the result back. The search
//! retries from scratch until a circuit of at least the minimum length
//! closes at the station, so a run can take a while but normally succeeds.

mod visualization;

use std::path::Path;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use coastergen::pieces::Catalogue;
use coastergen::solver::{self, SearchParams};
use coastergen::{persistence, solver::replay};

const TEMPLATE_PATH: &str = "template.td6";
const OUTPUT_PATH: &str = "output.td6";
const LAYOUT_PATH: &str = "layout.txt";

/// Generates closed roller-coaster circuits into a track design file.
#[derive(Parser)]
#[command(name = "coastergen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a circuit from the template and save it.
    Generate,
    /// Print the element sequence of the generated design.
    Show,
    /// Display the generated layout in an interactive 3D viewer.
    Display,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Generate) => {
            run_generate();
        }
        Some(Command::Show) => run_show(),
        Some(Command::Display) => run_display(),
        None => {
            // default: generate and display
            run_generate();
            run_display();
        }
    }
}

/// Loads the template, generates a circuit and saves the design.
///
/// Exits with a non-zero status when the template cannot be loaded. A
/// failing export is reported but does not change the exit status, since
/// generation itself succeeded.
fn run_generate() {
    let mut design = match persistence::load(Path::new(TEMPLATE_PATH)) {
        Ok(design) => design,
        Err(e) => {
            error!("failed to load template {TEMPLATE_PATH}: {e}");
            process::exit(-1);
        }
    };
    design.track_elements.clear();
    design.entrance_elements.clear();

    let catalogue = Catalogue::build();
    let params = SearchParams::default();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    info!(seed, "seeding generator");
    let mut rng = SmallRng::seed_from_u64(seed);

    let tracks = solver::generate(&catalogue, &params, &mut rng);
    println!("Ok: {} pieces", tracks.len());

    if let Some(result) = replay(&catalogue, &params, &tracks) {
        if let Err(e) = std::fs::write(LAYOUT_PATH, result.grid.format_layout()) {
            error!("failed to write {LAYOUT_PATH}: {e}");
        }
    }

    design.track_elements = tracks;
    if let Err(e) = persistence::save(&design, Path::new(OUTPUT_PATH)) {
        error!("failed to save {OUTPUT_PATH}: {e}");
    } else {
        println!("Wrote {OUTPUT_PATH} and {LAYOUT_PATH}");
    }
}

/// Prints the generated element sequence by piece name.
fn run_show() {
    match persistence::load(Path::new(OUTPUT_PATH)) {
        Ok(design) => {
            for (i, element) in design.track_elements.iter().enumerate() {
                println!("{i}: {:?}", element.id);
            }
        }
        Err(e) => {
            eprintln!("No generated design found ({e}). Run 'coastergen generate' first.");
        }
    }
}

/// Replays the generated design and opens the 3D viewer on it.
fn run_display() {
    let design = match persistence::load(Path::new(OUTPUT_PATH)) {
        Ok(design) => design,
        Err(e) => {
            eprintln!("No generated design found ({e}). Run 'coastergen generate' first.");
            return;
        }
    };

    let catalogue = Catalogue::build();
    let params = SearchParams::default();
    match replay(&catalogue, &params, &design.track_elements) {
        Some(result) => visualization::display(&result.grid),
        None => eprintln!("The saved design does not replay onto an empty grid."),
    }
}
