//! Terrain generator binary — builds the terrain engine and reports on it.
//!
//! Usage: cargo run --release --bin generate_terrain -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>     JSON engine config (flags below override it)
//!   --seed <SEED>       Noise seed (default: 12345)
//!   --width <W>         Domain width along x (default: 600)
//!   --depth <D>         Domain depth along z (default: 500)
//!   --step <S>          Grid step; must tile width and depth (default: 4)
//!   --light <X,Y,Z>     Initial light position (default: -10,10,-10)
//!   --orbit <N>         Recompute shadows for N light positions on a circle
//!   --jobs <N>          Worker threads (default: all cores)

use std::time::Instant;

use glam::Vec3;

use terrashade::core::logging;
use terrashade::engine::{EngineConfig, TerrainEngine, DEFAULT_LIGHT_POSITION};

/// Shadow histogram buckets over [0.4, 1.0]
const HISTOGRAM_BUCKETS: usize = 6;

fn main() {
    logging::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> terrashade::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => EngineConfig::load_json(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = parse_u32_arg(&args, "--seed") {
        config.seed = seed;
    }
    if let Some(width) = parse_f32_arg(&args, "--width") {
        config.width = width;
    }
    if let Some(depth) = parse_f32_arg(&args, "--depth") {
        config.depth = depth;
    }
    if let Some(step) = parse_f32_arg(&args, "--step") {
        config.grid_step = step;
    }
    let light = parse_vec3_arg(&args, "--light").unwrap_or(DEFAULT_LIGHT_POSITION);
    let orbit = parse_usize_arg(&args, "--orbit").unwrap_or(0);

    if let Some(jobs) = parse_usize_arg(&args, "--jobs") {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(jobs).build_global() {
            log::warn!("Could not configure thread pool: {}", e);
        }
    }

    println!("=== Terrashade Terrain Generator ===");
    println!("Seed:   {}", config.seed);
    println!("Domain: {} x {}", config.width, config.depth);
    println!("Step:   {}", config.grid_step);
    println!("Light:  {}, {}, {}", light.x, light.y, light.z);
    println!();

    let start = Instant::now();
    let mut engine = TerrainEngine::new(config, light)?;
    let elapsed = start.elapsed();

    let snapshot = engine.snapshot();
    println!("Vertices:  {}", snapshot.vertex_count());
    println!("Triangles: {}", snapshot.mesh().triangle_count());
    if let Some(stats) = engine.height_stats() {
        println!("Heights:   [{:.2}, {:.2}] (range {:.2})", stats.min, stats.max, stats.range());
    }
    println!("Generated in {:.1}s", elapsed.as_secs_f64());
    println!();
    print_histogram(snapshot.shadows());

    if orbit > 0 {
        let grid = *engine.grid();
        let center = Vec3::new(0.0, 0.0, grid.depth() * 0.5);
        let radius = grid.width().max(grid.depth()) * 0.5;

        let start = Instant::now();
        for k in 0..orbit {
            let angle = k as f32 / orbit as f32 * std::f32::consts::TAU;
            let orbit_light = center + Vec3::new(angle.cos() * radius, light.y, angle.sin() * radius);
            engine.update_shadows(orbit_light);

            let shadows = engine.shadows();
            let lit = shadows.iter().filter(|&&s| s >= 1.0).count();
            println!("  [{}/{}] light ({:.1}, {:.1}, {:.1}): {:.1}% fully lit",
                k + 1, orbit, orbit_light.x, orbit_light.y, orbit_light.z,
                100.0 * lit as f64 / shadows.len().max(1) as f64);
        }
        let elapsed = start.elapsed();
        println!();
        println!("Shadow updates: {} in {:.1}s ({:.2}s each)",
            orbit, elapsed.as_secs_f64(), elapsed.as_secs_f64() / orbit as f64);
    }

    Ok(())
}

fn print_histogram(shadows: &[f32]) {
    let mut buckets = [0usize; HISTOGRAM_BUCKETS];
    for &s in shadows {
        let t = ((s - 0.4) / 0.6).clamp(0.0, 1.0);
        let bucket = ((t * HISTOGRAM_BUCKETS as f32) as usize).min(HISTOGRAM_BUCKETS - 1);
        buckets[bucket] += 1;
    }

    println!("Shadow factors:");
    let total = shadows.len().max(1) as f64;
    for (i, count) in buckets.iter().enumerate() {
        let lo = 0.4 + 0.6 * i as f32 / HISTOGRAM_BUCKETS as f32;
        let hi = 0.4 + 0.6 * (i + 1) as f32 / HISTOGRAM_BUCKETS as f32;
        let share = *count as f64 / total;
        println!("  [{:.2}, {:.2}{} {:>8}  {}",
            lo, hi, if i + 1 == HISTOGRAM_BUCKETS { "]" } else { ")" },
            count, "#".repeat((share * 50.0).round() as usize));
    }
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_vec3_arg(args: &[String], flag: &str) -> Option<Vec3> {
    let value = parse_str_arg(args, flag)?;
    let parts: Vec<f32> = value.split(',')
        .map(|s| s.trim().parse().ok())
        .collect::<Option<_>>()?;
    match parts.as_slice() {
        [x, y, z] => Some(Vec3::new(*x, *y, *z)),
        _ => None,
    }
}
