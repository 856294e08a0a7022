//! Loopspan CLI - spaced vertex selection along edge loops.
//!
//! Usage: loopspan <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `loopspan --help` for available commands. Set `RUST_LOG=debug` to see
//! pipeline diagnostics.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use log::info;

use loopspan::algo::{build_loops, select_spaced_vertices, SpacingOptions};
use loopspan::io;
use loopspan::mesh::EdgeMesh;

#[derive(Parser)]
#[command(name = "loopspan")]
#[command(author, version, about = "Spaced vertex selection along edge loops", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the selection stored in the input file.
#[derive(Args)]
struct SelectionArgs {
    /// Select every vertex before processing
    #[arg(long, conflicts_with = "selection")]
    select_all: bool,

    /// File with vertex indices to select (whitespace or comma separated)
    #[arg(long, value_name = "FILE")]
    selection: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh and selection information
    Info {
        /// Input mesh file
        input: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Re-select loop vertices at spaced intervals
    Select {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file (.ply)
        output: PathBuf,

        /// Distance budget along a loop
        #[arg(short = 'l', long, default_value = "3.0")]
        edge_length: f64,

        /// Turning-angle budget along a loop, in degrees
        #[arg(short, long, default_value = "110.0")]
        gradual_angle: f64,

        /// Deselect corners with an interior angle below this, in degrees
        #[arg(short, long, default_value = "110.0")]
        deselect_angle: f64,

        /// Disable the turning-angle budget
        #[arg(long)]
        no_gradual: bool,

        /// Disable the sharp-corner filter
        #[arg(long)]
        no_deselect: bool,

        /// Leave loop endpoints to the spacing rule instead of deselecting them
        #[arg(long)]
        keep_endpoints: bool,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Print the indices of the selected vertices
        #[arg(long)]
        print: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input, selection } => {
            cmd_info(&input, &selection)?;
        }

        Commands::Select {
            input,
            output,
            edge_length,
            gradual_angle,
            deselect_angle,
            no_gradual,
            no_deselect,
            keep_endpoints,
            selection,
            print,
        } => {
            let mut options = SpacingOptions::default()
                .with_edge_length(edge_length)
                .with_gradual_angle(gradual_angle)
                .with_deselect_angle(deselect_angle)
                .with_exclude_endpoints(!keep_endpoints);
            if no_gradual {
                options = options.without_gradual_angle();
            }
            if no_deselect {
                options = options.without_deselect_angle();
            }
            cmd_select(&input, &output, &options, &selection, print)?;
        }
    }

    Ok(())
}

/// Load a mesh and apply the command-line selection override, if any.
fn load_mesh(input: &Path, selection: &SelectionArgs) -> Result<EdgeMesh, Box<dyn std::error::Error>> {
    let mut mesh: EdgeMesh = io::load(input)?;

    if selection.select_all {
        mesh.select_all();
    } else if let Some(path) = &selection.selection {
        let indices = io::read_selection(path)?;
        mesh.deselect_all();
        mesh.select_vertices(indices)?;
        mesh.flush_edge_selection();
    }

    Ok(mesh)
}

fn cmd_info(input: &Path, selection: &SelectionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = load_mesh(input, selection)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Edges: {}", mesh.num_edges());
    println!("Selected vertices: {}", mesh.num_selected());

    if let Some((min, max)) = mesh.bounding_box() {
        println!("Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z);
        let diag = max - min;
        println!("Dimensions: {:.3} x {:.3} x {:.3}", diag.x, diag.y, diag.z);
    }

    // Loop summary
    let loops = build_loops(&mesh);
    println!("Loops: {} ({} open, {} closed)", loops.len(), loops.num_open(), loops.num_closed());
    if let (Some(shortest), Some(longest)) = (
        loops.iter().map(|l| l.len()).min(),
        loops.iter().map(|l| l.len()).max(),
    ) {
        println!("Loop length range: [{}, {}] vertices", shortest, longest);
    }
    if !loops.overflows().is_empty() {
        println!("Truncated loops: {}", loops.overflows().len());
        for err in loops.overflows() {
            println!("  {}", err);
        }
    }

    Ok(())
}

fn cmd_select(
    input: &Path,
    output: &Path,
    options: &SpacingOptions,
    selection: &SelectionArgs,
    print: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    options.validate()?;

    let mut mesh = load_mesh(input, selection)?;
    println!(
        "Loaded: {} vertices, {} edges, {} selected",
        mesh.num_vertices(),
        mesh.num_edges(),
        mesh.num_selected()
    );
    info!("options: {:?}", options);

    let start = Instant::now();
    let report = select_spaced_vertices(&mut mesh, options)?;
    let elapsed = start.elapsed();

    println!("Result: {}", report);
    println!("Time: {:.2?}", elapsed);

    if print {
        let indices: Vec<String> = mesh
            .selected_vertices()
            .iter()
            .map(|v| v.index().to_string())
            .collect();
        println!("{}", indices.join(" "));
    }

    io::save(&mesh, output)?;
    println!("Saved: {}", output.display());

    Ok(())
}
