//! # cordic-sweep
//!
//! Runs the accuracy sweeps through the streaming testbench:
//! - every 16-bit angle code through the sin/cos core
//! - evenly spaced unit-circle vectors through the angle/magnitude core
//!
//! Idle and backpressure patterns come from the configuration file.
//!
//! ## Run
//! ```bash
//! cargo run --bin cordic-sweep -- --mode both --points 32
//! cargo run --bin cordic-sweep -- --config cordic-axis.yaml --mode sin-cos
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use cordic_axis::{
    init_logging, AxisConfig, AxisResult, Beat, CordicMode, CordicPipeline, StreamStats, Testbench,
};
use cordic_core::reference::{
    angle_mag_sweep_vectors, score_angle_mag, score_sin_cos, sin_cos_sweep_codes,
};
use cordic_core::{ErrorStats, ACCURACY_BOUND_LSB};

const DEFAULT_POINTS: usize = 32;

struct Args {
    config: Option<PathBuf>,
    modes: Vec<CordicMode>,
    points: usize,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = std::env::args().collect();
    let value = |flag: &str| {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .map(|s| s.as_str())
    };

    let modes = match value("--mode").unwrap_or("both") {
        "sin-cos" => vec![CordicMode::SinCos],
        "angle-mag" => vec![CordicMode::AngleMag],
        "both" => vec![CordicMode::SinCos, CordicMode::AngleMag],
        other => return Err(format!("unknown mode '{}' (sin-cos, angle-mag, both)", other)),
    };

    let points = match value("--points") {
        Some(s) => s
            .parse()
            .map_err(|_| format!("invalid point count '{}'", s))?,
        None => DEFAULT_POINTS,
    };

    Ok(Args {
        config: value("--config").map(PathBuf::from),
        modes,
        points,
    })
}

fn load_config(args: &Args) -> AxisResult<AxisConfig> {
    match &args.config {
        Some(path) => AxisConfig::load_from(path),
        None => AxisConfig::load(),
    }
}

fn testbench(config: &AxisConfig, mode: CordicMode) -> AxisResult<Testbench<CordicPipeline>> {
    let core = CordicPipeline::new(config.core.clone().mode(mode))?;
    let mut tb = Testbench::new(core, config.harness.clone())?;
    tb.reset();
    Ok(tb)
}

fn report(label: &str, a: (&str, &ErrorStats), b: (&str, &ErrorStats), stats: &StreamStats) -> bool {
    let mut both = a.1.clone();
    both.merge(b.1);
    let pass = both.within(ACCURACY_BOUND_LSB);

    println!("{} sweep: {}", label, if pass { "PASS" } else { "FAIL" });
    println!("  {:<4} {}", a.0, a.1);
    println!("  {:<4} {}", b.0, b.1);
    println!("  {:<4} {}", "all", both);
    println!(
        "  beats {} in {} ticks ({:.3} beats/tick), latency min {} avg {:.1} max {}",
        stats.beats_out,
        stats.ticks,
        stats.throughput(),
        stats.min_latency.unwrap_or(0),
        stats.avg_latency(),
        stats.max_latency.unwrap_or(0),
    );
    pass
}

fn sweep_sin_cos(config: &AxisConfig) -> AxisResult<bool> {
    let mut tb = testbench(config, CordicMode::SinCos)?;
    let codes = sin_cos_sweep_codes();
    let outputs = tb.run_beats(codes.iter().copied().map(Beat::angle))?;

    let lanes: Vec<(i16, i16)> = outputs.iter().map(Beat::lanes).collect();
    let (sin, cos) = score_sin_cos(&codes, &lanes)?;
    Ok(report("sin/cos", ("sin", &sin), ("cos", &cos), &tb.stats()))
}

fn sweep_angle_mag(config: &AxisConfig, points: usize) -> AxisResult<bool> {
    let mut tb = testbench(config, CordicMode::AngleMag)?;
    let vectors = angle_mag_sweep_vectors(points);
    let outputs = tb.run_beats(vectors.iter().copied().map(Beat::from))?;

    let lanes: Vec<(i16, i16)> = outputs.iter().map(Beat::lanes).collect();
    let (x, y) = score_angle_mag(&vectors, &lanes)?;
    Ok(report("angle/magnitude", ("x", &x), ("y", &y), &tb.stats()))
}

fn run(args: &Args) -> AxisResult<bool> {
    let config = load_config(args)?;
    init_logging(&config.logging);

    println!(
        "=== CORDIC sweep: {} iterations, idle {}, backpressure {} ===\n",
        config.core.iterations, config.harness.idle, config.harness.backpressure
    );

    let mut pass = true;
    for &mode in &args.modes {
        pass &= match mode {
            CordicMode::SinCos => sweep_sin_cos(&config)?,
            CordicMode::AngleMag => sweep_angle_mag(&config, args.points)?,
        };
        println!();
    }
    Ok(pass)
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("error: {}", msg);
            eprintln!("usage: cordic-sweep [--config <path>] [--mode sin-cos|angle-mag|both] [--points <n>]");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("accuracy bound of {} LSB exceeded", ACCURACY_BOUND_LSB);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
