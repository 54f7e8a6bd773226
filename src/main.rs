use rksim::{bench_rk4, steps_path, FramePlan, Scenario, ScenarioConfig, Trajectory};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(version, about = "Fixed-step RK4 simulation of 2D point masses under Newtonian gravity")]
struct Args {
    /// Scenario file (YAML)
    #[arg(short, long, required_unless_present = "bench")]
    infile: Option<PathBuf>,

    /// Write the run log here instead of stderr
    #[arg(short, long)]
    outfile: Option<PathBuf>,

    /// Step bodies in parallel
    #[arg(short)]
    parallel: bool,

    /// Replay the trajectory in a window when done
    #[arg(long)]
    view: bool,

    /// Time serial vs parallel stepping and exit
    #[arg(long)]
    bench: bool,
}

// RUST_LOG still overrides the default level
fn init_logging(outfile: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Info).parse_default_env();

    if let Some(path) = outfile {
        let file = File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.outfile.as_deref())?;

    if args.bench {
        bench_rk4();
        return Ok(());
    }

    let Some(infile) = args.infile else {
        bail!("no scenario file given, use --help");
    };

    info!("Reading scenario from {}", infile.display());
    let cfg = ScenarioConfig::from_path(&infile)?;
    let scenario = Scenario::build_scenario(cfg, args.parallel).context("invalid scenario")?;

    if args.parallel {
        info!("Stepping bodies in parallel on {} threads", rayon::current_num_threads());
    }

    info!("Preparing the simulation for the following bodies:");
    for b in &scenario.system.bodies {
        info!(
            " - {}: mass = {:.2e} Earth masses, position = ({:.2e}, {:.2e}) AU, velocity = ({:.2e}, {:.2e}) AU/day",
            b.name, b.m, b.x.x, b.x.y, b.v.x, b.v.y
        );
    }
    info!(
        "dt = {} days, {} steps, {} days total",
        scenario.parameters.dt, scenario.parameters.n_steps, scenario.parameters.duration
    );

    let trajectory = Trajectory::integrate(&scenario.system, &scenario.parameters, &scenario.rk4)?;

    let steps_file = steps_path(&infile);
    let file = File::create(&steps_file).with_context(|| format!("failed to create {}", steps_file.display()))?;
    trajectory.write_steps(BufWriter::new(file))?;
    info!("Trajectory written to {}", steps_file.display());

    if args.view {
        let Some(visual) = &scenario.visual else {
            bail!("--view needs a `visual` block in the scenario");
        };
        let plan = FramePlan::new(trajectory.n_steps(), visual.fps, visual.duration);
        let title = visual.name.clone().unwrap_or_else(|| "rksim".to_string());
        view(trajectory, plan, visual.figure_size, &title);
    } else if scenario.visual.is_some() {
        info!("Scenario has a visual block; pass --view to replay it");
    }

    info!("Done!");
    Ok(())
}

#[cfg(feature = "viewer")]
fn view(trajectory: Trajectory, plan: FramePlan, figure_size: f64, title: &str) {
    rksim::run_2d(trajectory, plan, figure_size, title);
}

#[cfg(not(feature = "viewer"))]
fn view(_trajectory: Trajectory, _plan: FramePlan, _figure_size: f64, _title: &str) {
    log::warn!("built without the `viewer` feature, skipping replay");
}
