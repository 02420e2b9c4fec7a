use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use comm_analysis::analysis::analyze;
use comm_analysis::io::MeshPartitions;
use comm_analysis::report::write_report;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path of the mesh partition file
    mesh: PathBuf,

    /// Write a DOT file of the partition adjacency graph for visualisation
    #[arg(short, long)]
    dot: Option<PathBuf>,

    /// Write the dense edge-cut matrix
    #[arg(short, long)]
    matrix: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut mesh = MeshPartitions::open(&args.mesh)?;
    let analysis = analyze(&mut mesh)?;

    if let Some(path) = &args.dot {
        analysis.graph().export_dot(path)?;
    }
    if let Some(path) = &args.matrix {
        analysis.graph().export_matrix(path)?;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &analysis)?;
    out.flush()?;
    Ok(())
}
