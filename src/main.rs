//! Bike Geometry CLI
//!
//! Usage:
//!   bike-geometry [OPTIONS] [GEOMETRY]
//!
//! Options:
//!   -r, --reference <FILE>   Reference geometry drawn underneath (TOML)
//!   -s, --style <FILE>       Style for the primary drawing (TOML)
//!       --stack <MM>         Override stack
//!       --reach <MM>         Override reach
//!       --fork-length        Place the front hub by the literal fork length
//!       --no-dimensions      Omit dimension annotations
//!   -m, --measurements       Print derived measurements as TOML instead of SVG
//!   -o, --output <FILE>      Write to a file instead of stdout
//!   -v, --verbose            Debug logging on stderr

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bike_geometry::{
    render_with_config, solve_with_config, DiagramStyle, FrontHubModel, Geometry, LoadError,
    RenderConfig, SolverConfig,
};

#[derive(Parser)]
#[command(name = "bike-geometry")]
#[command(about = "Derive bicycle frame geometry and render an annotated SVG drawing")]
struct Cli {
    /// Geometry file (TOML); the default geometry is used if omitted
    geometry: Option<PathBuf>,

    /// Reference geometry drawn underneath in a muted style
    #[arg(short, long)]
    reference: Option<PathBuf>,

    /// Style file for the primary drawing (TOML)
    #[arg(short, long)]
    style: Option<PathBuf>,

    /// Override stack (mm)
    #[arg(long)]
    stack: Option<f64>,

    /// Override reach (mm)
    #[arg(long)]
    reach: Option<f64>,

    /// Place the front hub using the literal fork length
    #[arg(long)]
    fork_length: bool,

    /// Omit dimension annotations
    #[arg(long)]
    no_dimensions: bool,

    /// Print derived measurements as TOML instead of SVG
    #[arg(short, long)]
    measurements: bool,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let geometry = load_geometry(cli)?;
    let reference = cli
        .reference
        .as_deref()
        .map(Geometry::from_file)
        .transpose()?;
    let style = match &cli.style {
        Some(path) => DiagramStyle::from_file(path)?,
        None => DiagramStyle::primary(),
    };

    let front_hub = if cli.fork_length {
        FrontHubModel::ForkLength
    } else {
        FrontHubModel::LevelHubs
    };
    let solver = SolverConfig::new().with_front_hub(front_hub);

    let output = if cli.measurements {
        let layout = solve_with_config(&geometry, &solver);
        toml::to_string(&layout.measurements)?
    } else {
        let config = RenderConfig::new()
            .with_solver(solver)
            .with_style(style)
            .with_dimensions(!cli.no_dimensions);
        render_with_config(&geometry, reference.as_ref(), &config)
    };

    match &cli.output {
        Some(path) => fs::write(path, output).map_err(|e| LoadError::io(path, e))?,
        None => println!("{}", output),
    }
    Ok(())
}

fn load_geometry(cli: &Cli) -> Result<Geometry, LoadError> {
    let mut geometry = match &cli.geometry {
        Some(path) => Geometry::from_file(path)?,
        None => Geometry::default(),
    };
    if let Some(stack) = cli.stack {
        geometry.stack = stack;
    }
    if let Some(reach) = cli.reach {
        geometry.reach = reach;
    }
    Ok(geometry)
}
