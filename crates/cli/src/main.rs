#![deny(unsafe_code)]
//! CLI binary for the gauss-shell demo.
//!
//! Subcommands:
//! - `render` evaluates the shell and writes the field map and potential surface
//! - `metrics` prints surface field, interior potential and flux direction
//! - `probe <x> <y>` evaluates a single point
//! - `list` prints palettes and the control schema
//! - `serve` serves the interactive page

mod error;
mod serve;

use clap::{Args, Parser, Subcommand, ValueEnum};
use error::CliError;
use gauss_shell_charts::{ChartOptions, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use gauss_shell_core::metrics::format_sci;
use gauss_shell_core::params::{DEFAULT_CHARGE, DEFAULT_RADIUS, DEFAULT_RESOLUTION};
use gauss_shell_core::{
    evaluate, sample_at, Controls, Palette, ShellField, ShellMetrics, ShellParams,
};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "gauss-shell",
    about = "Electric field and potential of a charged spherical shell"
)]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Shell radius and charge, shared by every evaluating subcommand.
#[derive(Args, Clone, Copy)]
struct ShellArgs {
    /// Shell radius R in metres (0.5 to 3.0, step 0.1).
    #[arg(short, long, default_value_t = DEFAULT_RADIUS)]
    radius: f64,

    /// Total charge Q (-10 to 10, step 0.5).
    #[arg(short, long, default_value_t = DEFAULT_CHARGE, allow_negative_numbers = true)]
    charge: f64,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Png,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Svg => "svg",
            Format::Png => "png",
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate the shell and write field.{svg,png} and potential.{svg,png}.
    Render {
        #[command(flatten)]
        shell: ShellArgs,

        /// Grid samples per axis (30, 50 or 80).
        #[arg(short = 'n', long, default_value_t = DEFAULT_RESOLUTION)]
        resolution: usize,

        /// Leave the field direction arrows off the field map.
        #[arg(long)]
        no_vectors: bool,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Png)]
        format: Format,

        /// Palette for the field map.
        #[arg(long, default_value = gauss_shell_charts::DEFAULT_FIELD_PALETTE)]
        field_palette: String,

        /// Palette for the potential surface.
        #[arg(long, default_value = gauss_shell_charts::DEFAULT_SURFACE_PALETTE)]
        surface_palette: String,

        /// Chart width in pixels.
        #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
        width: u32,

        /// Chart height in pixels.
        #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
        height: u32,

        /// Directory the charts are written to.
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Print surface field, interior potential and flux direction.
    Metrics {
        #[command(flatten)]
        shell: ShellArgs,
    },
    /// Evaluate field and potential at a single point (x, y) in metres.
    Probe {
        #[arg(allow_negative_numbers = true)]
        x: f64,

        #[arg(allow_negative_numbers = true)]
        y: f64,

        #[command(flatten)]
        shell: ShellArgs,
    },
    /// List palettes and the control schema.
    List,
    /// Serve the interactive page.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:8501")]
        addr: SocketAddr,
    },
}

/// Normalizes raw values the way the page sliders would, warning about
/// anything that moved.
fn controls_from_args(shell: ShellArgs, resolution: usize, show_vectors: bool) -> Controls {
    let controls = Controls::new(shell.radius, shell.charge, resolution, show_vectors);
    if controls.radius() != shell.radius {
        warn!(
            requested = shell.radius,
            used = controls.radius(),
            "radius adjusted to control range"
        );
    }
    if controls.charge() != shell.charge {
        warn!(
            requested = shell.charge,
            used = controls.charge(),
            "charge adjusted to control range"
        );
    }
    if controls.resolution() != resolution {
        warn!(
            requested = resolution,
            used = controls.resolution(),
            "resolution snapped to nearest option"
        );
    }
    controls
}

fn write_charts(
    field: &ShellField,
    show_vectors: bool,
    opts: &ChartOptions,
    format: Format,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, CliError> {
    std::fs::create_dir_all(out_dir)
        .map_err(|e| CliError::Io(format!("cannot create {}: {e}", out_dir.display())))?;

    let field_path = out_dir.join(format!("field.{}", format.extension()));
    let potential_path = out_dir.join(format!("potential.{}", format.extension()));
    match format {
        Format::Svg => {
            let write = |path: &Path, doc: String| {
                std::fs::write(path, doc)
                    .map_err(|e| CliError::Io(format!("cannot write {}: {e}", path.display())))
            };
            write(
                &field_path,
                gauss_shell_charts::field_map_svg(field, opts, show_vectors)?,
            )?;
            write(&potential_path, gauss_shell_charts::potential_svg(field, opts)?)?;
        }
        Format::Png => {
            gauss_shell_charts::snapshot::write_field_png(field, opts, show_vectors, &field_path)?;
            gauss_shell_charts::snapshot::write_potential_png(field, opts, &potential_path)?;
        }
    }
    info!(
        field = %field_path.display(),
        potential = %potential_path.display(),
        "rendered charts"
    );
    Ok(vec![field_path, potential_path])
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let palettes = Palette::list_names();
            let schema = Controls::param_schema();
            if cli.json {
                let info = serde_json::json!({
                    "palettes": palettes,
                    "controls": schema,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
                println!("Controls:");
                if let Some(controls) = schema.as_object() {
                    for (name, entry) in controls {
                        println!(
                            "  {name:<13} {}  (default {})",
                            entry["description"].as_str().unwrap_or_default(),
                            entry["default"]
                        );
                    }
                }
            }
        }
        Command::Metrics { shell } => {
            let controls = controls_from_args(shell, DEFAULT_RESOLUTION, true);
            let metrics = ShellMetrics::from_shell(&controls.shell_params().shell()?);
            if cli.json {
                let info = serde_json::json!({
                    "controls": controls.params(),
                    "metrics": metrics,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{metrics}");
            }
        }
        Command::Probe { x, y, shell } => {
            let params = ShellParams::new(shell.radius, shell.charge, DEFAULT_RESOLUTION);
            let sample = sample_at(x, y, &params)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&sample)?);
            } else {
                println!("point ({x}, {y}) m, r = {:.4} m, {:?}", sample.distance, sample.region);
                println!("  |E| = {} N/C", format_sci(sample.e_mag));
                println!("  V   = {} V", format_sci(sample.v_pot));
                println!(
                    "  E   = ({}, {}) N/C",
                    format_sci(sample.ex),
                    format_sci(sample.ey)
                );
            }
        }
        Command::Render {
            shell,
            resolution,
            no_vectors,
            format,
            field_palette,
            surface_palette,
            width,
            height,
            out_dir,
        } => {
            let controls = controls_from_args(shell, resolution, !no_vectors);
            let opts = ChartOptions {
                width,
                height,
                field_palette,
                surface_palette,
            };
            opts.validate().map_err(|e| CliError::Input(e.to_string()))?;
            opts.palettes()?;

            let field = evaluate(&controls.shell_params())?;
            let outputs = write_charts(&field, controls.show_vectors(), &opts, format, &out_dir)?;
            let metrics = field.metrics();

            if cli.json {
                let info = serde_json::json!({
                    "controls": controls.params(),
                    "metrics": metrics,
                    "clip_limit": field.clip_limit(),
                    "reaches_boundary": field.reaches_boundary(),
                    "outputs": outputs
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{metrics}");
                for path in &outputs {
                    eprintln!("wrote {}", path.display());
                }
            }
        }
        Command::Serve { addr } => {
            let runtime = tokio::runtime::Runtime::new()
                .map_err(|e| CliError::Server(format!("cannot start runtime: {e}")))?;
            runtime.block_on(serve::serve(addr))?;
        }
    }

    Ok(())
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gauss_shell=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
