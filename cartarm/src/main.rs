// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use std::path::PathBuf;

use cartarm_core::algorithm::{simplex_volume_with_limit, MAX_DIMENSION};
use cartarm_core::control::Panel;
use cartarm_core::{Cart, ParameterId};
use clap::{Parser, ValueHint};

mod config;
mod console;

#[derive(Parser)]
#[command(author = "Copyright (C) 2024 Laixer Equipment B.V.")]
#[command(version, propagate_version = true)]
#[command(about = "Cart kinematics viewer", long_about = None)]
struct Args {
    /// Configuration file.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct SliderArgs {
    /// Horizontal offset [-200, 200].
    #[arg(short, allow_hyphen_values = true)]
    a: Option<i32>,
    /// Mast height [40, 100].
    #[arg(short)]
    b: Option<i32>,
    /// Mast rotation in degrees [0, 180].
    #[arg(short)]
    c: Option<i32>,
    /// Gripper rotation in degrees [0, 360].
    #[arg(short)]
    d: Option<i32>,
    /// Gripper extension [40, 100].
    #[arg(short)]
    e: Option<i32>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Evaluate a single parameter set.
    Eval {
        #[command(flatten)]
        sliders: SliderArgs,

        /// Print the drawing primitives.
        #[arg(long)]
        scene: bool,
    },
    /// Move one slider through its full range.
    Sweep {
        /// Parameter to move (a, b, c, d or e).
        #[arg(long)]
        param: ParameterId,

        /// Slider step size.
        #[arg(long, default_value_t = 10)]
        step: u32,

        #[command(flatten)]
        sliders: SliderArgs,
    },
    /// Calculate the volume of a simplex.
    Volume {
        /// Points as JSON array, for example '[[0,0],[2,0],[1,2]]'.
        points: String,

        /// Largest accepted simplex dimension.
        #[arg(long, default_value_t = MAX_DIMENSION)]
        max_dimension: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut log_config = simplelog::ConfigBuilder::new();
    log_config.set_time_level(log::LevelFilter::Off);
    log_config.set_thread_level(log::LevelFilter::Off);
    log_config.set_target_level(log::LevelFilter::Off);
    log_config.set_location_level(log::LevelFilter::Off);

    simplelog::TermLogger::init(
        log_level(args.verbose),
        log_config.build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let config = match args.config {
        Some(path) => config::Config::try_from_file(vec![path])?,
        None => {
            let local_config = std::env::current_dir()?.join("cartarm.toml");

            // Try read configuration from global system location first, then from local directory.
            config::Config::try_from_file(vec![
                PathBuf::from("/etc/cartarm/cartarm.toml"),
                local_config,
            ])?
        }
    };

    log::trace!("{}", config);

    match args.command {
        Command::Eval { sliders, scene } => {
            let mut panel = panel(&config, &sliders);
            if scene {
                panel.attach(Box::new(console::ScenePrinter::new(config.geometry)));
            }
            panel.attach(Box::new(console::LabelPrinter));

            panel.refresh();
        }
        Command::Sweep {
            param,
            step,
            sliders,
        } => {
            if step == 0 {
                anyhow::bail!("step must be positive");
            }

            let mut panel = panel(&config, &sliders);
            panel.attach(Box::new(console::LabelPrinter));

            let range = param.range();
            log::info!(
                "Sweeping {} from {} to {}",
                param,
                range.start(),
                range.end()
            );

            for value in range.step_by(step as usize) {
                panel.set(param, value);
            }
        }
        Command::Volume {
            points,
            max_dimension,
        } => {
            let points: Vec<Vec<f64>> = serde_json::from_str(&points)?;
            let volume = simplex_volume_with_limit(&points, max_dimension)?;

            log::info!("Simplex of {} points", points.len());

            println!("{}", volume);
        }
    }

    Ok(())
}

/// Map the verbosity count onto a log level.
///
/// Warnings are always shown.
fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Construct the slider panel from configuration and command line overrides.
fn panel(config: &config::Config, sliders: &SliderArgs) -> Panel {
    let mut raw = config.parameters;

    for (id, value) in [
        (ParameterId::A, sliders.a),
        (ParameterId::B, sliders.b),
        (ParameterId::C, sliders.c),
        (ParameterId::D, sliders.d),
        (ParameterId::E, sliders.e),
    ] {
        if let Some(value) = value {
            if !id.range().contains(&value) {
                log::warn!("Parameter {} out of range: {}", id, value);
            }
            raw.set(id, value);
        }
    }

    Panel::new(Cart::new(config.geometry), raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0), log::LevelFilter::Warn);
        assert_eq!(log_level(1), log::LevelFilter::Info);
        assert_eq!(log_level(2), log::LevelFilter::Debug);
        assert_eq!(log_level(5), log::LevelFilter::Trace);
    }

    #[test]
    fn test_out_of_range_warning_visible() {
        assert!(log::Level::Warn <= log_level(0));
    }

    #[test]
    fn test_panel_clamps_overrides() {
        let sliders = SliderArgs {
            a: Some(-500),
            b: None,
            c: Some(200),
            d: None,
            e: None,
        };
        let panel = panel(&config::Config::default(), &sliders);

        assert_eq!(panel.raw().a, -200);
        assert_eq!(panel.raw().c, 180);
        assert_eq!(panel.raw().b, 60);
    }
}
