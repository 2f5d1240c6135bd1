//! tetview command-line interface.
//!
//! ```sh
//! tetview view runs/                     # step through every file in runs/
//! tetview view --latest best runs/       # open the newest best* snapshot
//! tetview render best0042 -o best.pdf
//! tetview animate runs/ -o frames/
//! tetview animate best0042 -o build/ --build-up
//! tetview info best0042
//! tetview wrap best0042 -o wrapped.dat
//! tetview --colormap viridis config      # keep viridis as the default
//! ```

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use gtk4::glib::ExitCode;
use log::LevelFilter;
use std::path::{Path, PathBuf};
use tetview::config::{Config, OutputMode};
use tetview::io::{frames, load_solution, save_solution};
use tetview::rendering::animation::{render_build_up, render_sequence};
use tetview::rendering::colormap::ColorMap;
use tetview::rendering::{export_scene, Scene};
use tetview::state::AppState;
use tetview::utils::logger;

#[derive(Parser)]
#[command(name = "tetview")]
#[command(about = "Visualize periodic tetrahedron packings")]
#[command(version)]
struct Cli {
    /// Settings file to use instead of the per-user settings.json.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    style: StyleArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides applied on top of the loaded settings.
#[derive(Args, Default)]
struct StyleArgs {
    /// Hide ghost particles.
    #[arg(long, global = true)]
    no_ghosts: bool,
    /// Draw the 26 neighbouring images of every particle.
    #[arg(long, global = true)]
    periodic_images: bool,
    /// Fold every particle back into the primary cell before drawing.
    #[arg(long, global = true)]
    wrap: bool,
    /// Opacity of primary particles (0..1).
    #[arg(long, global = true)]
    opacity: Option<f64>,
    /// Opacity of ghosts and periodic images (0..1).
    #[arg(long, global = true)]
    ghost_opacity: Option<f64>,
    #[arg(long, global = true, value_enum)]
    colormap: Option<ColorMap>,
    #[arg(long, global = true, value_enum)]
    ghost_colormap: Option<ColorMap>,
    /// Output width in pixels (or points for PDF/SVG).
    #[arg(long, global = true)]
    width: Option<u32>,
    #[arg(long, global = true)]
    height: Option<u32>,
    /// Camera azimuth in degrees.
    #[arg(long, global = true, allow_hyphen_values = true)]
    azimuth: Option<f64>,
    /// Camera elevation in degrees.
    #[arg(long, global = true, allow_hyphen_values = true)]
    elevation: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive viewer.
    View {
        /// Solution files or directories of them.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Only open the last file whose name starts with this prefix.
        #[arg(long)]
        latest: Option<String>,
    },
    /// Render one solution to an image.
    Render {
        /// Solution file (or directory, with --latest).
        input: PathBuf,
        /// Output file; .png, .pdf or .svg selects the format.
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long)]
        latest: Option<String>,
    },
    /// Render a sequence of frames.
    Animate {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output directory.
        #[arg(short, long)]
        output: PathBuf,
        /// Build a single solution up one particle per frame.
        #[arg(long)]
        build_up: bool,
        /// Frame format (defaults to the configured output mode).
        #[arg(long, value_enum)]
        format: Option<OutputMode>,
    },
    /// Print cell and particle statistics.
    Info { input: PathBuf },
    /// Wrap all particles into the primary cell and write the result.
    Wrap {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Save the current settings, overrides included, as the defaults.
    Config {
        /// Write here instead of the per-user settings.json.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl StyleArgs {
    fn apply(&self, config: &mut Config) {
        let style = &mut config.style;
        if self.no_ghosts {
            style.show_ghosts = false;
        }
        if self.periodic_images {
            style.periodic_images = true;
        }
        if self.wrap {
            style.wrap_particles = true;
        }
        if let Some(v) = self.opacity {
            style.particle_opacity = v.clamp(0.0, 1.0);
        }
        if let Some(v) = self.ghost_opacity {
            style.ghost_opacity = v.clamp(0.0, 1.0);
        }
        if let Some(c) = self.colormap {
            style.particle_colormap = c;
        }
        if let Some(c) = self.ghost_colormap {
            style.ghost_colormap = c;
        }

        let output = &mut config.output;
        if let Some(w) = self.width {
            output.width = w;
        }
        if let Some(h) = self.height {
            output.height = h;
        }

        if let Some(a) = self.azimuth {
            config.view.azimuth = a;
        }
        if let Some(e) = self.elevation {
            config.view.elevation = e.clamp(-90.0, 90.0);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The viewer logs into its console pane, everything else to stderr
    if !matches!(cli.command, Commands::View { .. }) {
        logger::init_terminal(LevelFilter::Info);
    }

    // Messages for the viewer wait until its console logger is up
    let mut notices = Vec::new();
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => {
            let (config, msg) = Config::load();
            notices.push(msg);
            config
        }
    };
    if !matches!(cli.command, Commands::View { .. }) {
        for msg in notices.drain(..) {
            log::info!("{}", msg);
        }
    }
    cli.style.apply(&mut config);

    match cli.command {
        Commands::View { inputs, latest } => {
            let files = match latest {
                Some(prefix) => vec![latest_in(&inputs[0], &prefix)?],
                None => frames::expand_inputs(&inputs)?,
            };
            if files.is_empty() {
                bail!("No solution files found");
            }
            let state = AppState::new(config, files);
            let code = tetview::ui::run(state, notices);
            if code != ExitCode::SUCCESS {
                bail!("Viewer exited with {:?}", code);
            }
            Ok(())
        }
        Commands::Render { input, output, latest } => {
            let input = match latest {
                Some(prefix) => latest_in(&input, &prefix)?,
                None => input,
            };
            let mode = OutputMode::for_output(&output, config.output.mode).with_context(|| {
                format!("Cannot write {}: use .png, .pdf or .svg", output.display())
            })?;
            let solution = load_solution(&input)?;

            let mut scene = Scene::new();
            scene.draw_solution(&solution, &config.style)?;
            export_scene(&scene, &config.view, &config, mode, &output)?;
            log::info!("Wrote {}", output.display());
            Ok(())
        }
        Commands::Animate { inputs, output, build_up, format } => {
            let mode = format.unwrap_or(config.output.mode);
            let written = if build_up {
                if inputs.len() != 1 {
                    bail!("--build-up takes exactly one input file");
                }
                render_build_up(&inputs[0], &output, &config, mode)?
            } else {
                let files = frames::expand_inputs(&inputs)?;
                render_sequence(&files, &output, &config, mode)?
            };
            println!("{} frames written to {}", written.len(), output.display());
            Ok(())
        }
        Commands::Info { input } => {
            let solution = load_solution(&input)?;
            println!("{}", input.display());
            println!("{}", solution.report());
            Ok(())
        }
        Commands::Wrap { input, output } => {
            let mut solution = load_solution(&input)?;
            solution.wrap_particles()?;
            save_solution(&output, &solution)
                .with_context(|| format!("Could not write {}", output.display()))?;
            Ok(())
        }
        Commands::Config { output } => {
            let path = match output {
                Some(path) => {
                    config.save_to(&path)?;
                    path
                }
                None => config.save()?,
            };
            println!("Settings written to {}", path.display());
            Ok(())
        }
    }
}

/// Resolve `--latest`: the last file in `dir` starting with `prefix`.
fn latest_in(dir: &Path, prefix: &str) -> anyhow::Result<PathBuf> {
    frames::latest(dir, prefix)
        .with_context(|| format!("Could not list {}", dir.display()))?
        .with_context(|| format!("No file starting with '{}' in {}", prefix, dir.display()))
}
