//! Space Race Headless Harness
//!
//! Renders every mission flight path into an off-screen legacy screen and
//! validates the mission data, the renderer and the supporting game logic.
//! Runs entirely in-process, no window.
//!
//! Usage:
//!   cargo run -p spacerace-simtest
//!   cargo run -p spacerace-simtest -- --verbose --data data
//!   RUST_LOG=spacerace_logic=debug cargo run -p spacerace-simtest

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use spacerace_logic::audio::voice_file_name;
use spacerace_logic::config::RenderConfig;
use spacerace_logic::constants::colors;
use spacerace_logic::crew::{self, Astronaut, AstronautStatus, Roster};
use spacerace_logic::data::{FileType, MissionSteps};
use spacerace_logic::error::PathError;
use spacerace_logic::player::Player;
use spacerace_logic::program::MissionProgram;
use spacerace_logic::renderer::{MissionPathRenderer, MissionRegistration};
use spacerace_logic::resolution::PathResolution;
use spacerace_logic::rle;
use spacerace_logic::starfield::draw_starfield;
use spacerace_logic::surface::{LegacySurface, Surface};

#[derive(Parser)]
#[command(name = "spacerace-simtest")]
#[command(about = "Render every mission flight path off-screen and validate the game data")]
struct Args {
    /// Print every check, not only failures
    #[arg(long)]
    verbose: bool,

    /// Data root holding gamedata/missSteps.json (overrides the config)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Render configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the results as JSON to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let verbose = args.verbose;
    println!("=== Space Race Mission Path Harness ===\n");

    let mut results = Vec::new();

    // 1. Configuration
    let mut config = load_config(&args, &mut results);
    if let Some(root) = &args.data {
        config.data_root = root.clone();
    }

    // 2. Mission records
    let steps = load_steps(&config, &mut results);
    if let Some(steps) = &steps {
        results.extend(validate_records(steps, verbose));

        // 3. Render every mission
        results.extend(validate_renders(steps, &config, verbose));

        // 4. Resolution sweep
        results.extend(validate_resolution_sweep(steps, &config, verbose));
    }

    // 5. Malformed programs
    results.extend(validate_error_paths(verbose));

    // 6. Crew bookkeeping
    results.extend(validate_crew_logic(verbose));

    // 7. Legacy assets
    results.extend(validate_legacy_assets(&config, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if let Some(path) = &args.report {
        match serde_json::to_string_pretty(&results) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::error!("Failed to write report {}: {}", path.display(), e);
                }
            }
            Err(e) => log::error!("Failed to serialize report: {}", e),
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn load_config(args: &Args, results: &mut Vec<TestResult>) -> RenderConfig {
    println!("--- Configuration ---");

    let config = match &args.config {
        Some(path) => match RenderConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                results.push(TestResult::new(
                    "config_load",
                    false,
                    format!("{}: {}", path.display(), e),
                ));
                RenderConfig::default()
            }
        },
        None => RenderConfig::default(),
    };

    let errors = config.validate();
    results.push(TestResult::new(
        "config_valid",
        errors.is_empty(),
        if errors.is_empty() {
            format!("resolution {}, data root {}", config.resolution, config.data_root.display())
        } else {
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        },
    ));

    config
}

// ── 2. Mission records ──────────────────────────────────────────────────

fn load_steps(config: &RenderConfig, results: &mut Vec<TestResult>) -> Option<MissionSteps> {
    println!("--- Mission Records ---");
    match MissionSteps::load(&config.data_paths()) {
        Ok(steps) => {
            results.push(TestResult::new(
                "steps_load",
                !steps.is_empty(),
                format!("{} records", steps.len()),
            ));
            Some(steps)
        }
        Err(e) => {
            results.push(TestResult::new("steps_load", false, e.to_string()));
            None
        }
    }
}

fn validate_records(steps: &MissionSteps, verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    let mut bad = Vec::new();
    for record in steps.records() {
        match MissionProgram::parse(record) {
            Ok(program) => {
                if verbose {
                    println!(
                        "  {:02}: {} steps, {} bubbles",
                        program.code,
                        program.steps.len(),
                        program.bubble_count()
                    );
                }
            }
            Err(e) => bad.push(format!("{:?}: {}", record, e)),
        }
    }
    results.push(TestResult::new(
        "records_parse",
        bad.is_empty(),
        if bad.is_empty() {
            "every record parses".to_string()
        } else {
            bad.join("; ")
        },
    ));

    let codes = steps.codes();
    let mut dupes: Vec<u8> = codes
        .iter()
        .enumerate()
        .filter(|(i, c)| codes[..*i].contains(*c))
        .map(|(_, &c)| c)
        .collect();
    dupes.dedup();
    results.push(TestResult::new(
        "records_unique_codes",
        dupes.is_empty(),
        if dupes.is_empty() {
            format!("{} distinct mission codes", codes.len())
        } else {
            format!("duplicate codes (first wins): {:?}", dupes)
        },
    ));

    results
}

// ── 3. Renders ──────────────────────────────────────────────────────────

fn validate_renders(steps: &MissionSteps, config: &RenderConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Mission Renders ---");
    let mut results = Vec::new();
    let mut renderer = config.to_renderer();
    let mut registrations: Vec<MissionRegistration> = Vec::new();

    let mut count_mismatch = Vec::new();
    let mut hit_failures = Vec::new();
    let mut render_errors = Vec::new();
    let mut blank = Vec::new();

    for code in steps.codes() {
        let expected = match steps.program(code) {
            Ok(p) => p.bubble_count(),
            Err(_) => continue,
        };

        let mut surface = LegacySurface::new();
        draw_starfield(&mut surface, config.starfield_seed, config.star_count);
        match renderer.render_mission_path(
            config.player,
            code,
            config.pad,
            steps,
            &mut surface,
            &mut registrations,
        ) {
            Ok(drawn) => {
                if drawn != expected {
                    count_mismatch.push(format!("{:02}: drew {} expected {}", code, drawn, expected));
                }
                if surface.count_color(colors::PATH) == 0 {
                    blank.push(code);
                }
                for bubble in renderer.bubbles() {
                    // Overlapping bubbles resolve to the earliest one
                    match renderer.hit_test_bubble(bubble.x, bubble.y) {
                        Some(i) if i <= bubble.index => {}
                        other => hit_failures.push(format!(
                            "{:02}/{}: hit {:?}",
                            code,
                            bubble.label(),
                            other
                        )),
                    }
                }
                if verbose {
                    println!(
                        "  {:02}: {} bubbles, {} path pixels",
                        code,
                        drawn,
                        surface.count_color(colors::PATH)
                    );
                }
            }
            Err(e) => render_errors.push(format!("{:02}: {}", code, e)),
        }
    }

    results.push(TestResult::new(
        "render_all_missions",
        render_errors.is_empty(),
        if render_errors.is_empty() {
            format!("{} missions rendered", registrations.len())
        } else {
            render_errors.join("; ")
        },
    ));
    results.push(TestResult::new(
        "render_bubble_counts",
        count_mismatch.is_empty(),
        if count_mismatch.is_empty() {
            "bubble counts match programs".to_string()
        } else {
            count_mismatch.join("; ")
        },
    ));
    results.push(TestResult::new(
        "render_trails_visible",
        blank.is_empty(),
        format!("{} missions without trail pixels", blank.len()),
    ));
    results.push(TestResult::new(
        "render_hit_tests",
        hit_failures.is_empty(),
        if hit_failures.is_empty() {
            "every bubble answers its own hit-test".to_string()
        } else {
            hit_failures.join("; ")
        },
    ));

    let registered_ok = registrations
        .iter()
        .all(|r| r.player == config.player && r.pad == config.pad);
    results.push(TestResult::new(
        "render_registrations",
        registered_ok,
        format!("{} missions registered", registrations.len()),
    ));

    results
}

// ── 4. Resolution sweep ─────────────────────────────────────────────────

fn validate_resolution_sweep(
    steps: &MissionSteps,
    config: &RenderConfig,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Resolution Sweep ---");
    let mut results = Vec::new();
    let code = config.default_mission;

    let mut counts = Vec::new();
    for segs in [1u16, 2, 5, PathResolution::default().get(), 100, 500] {
        let mut renderer = MissionPathRenderer::with_resolution(PathResolution::new(segs));
        let mut surface = LegacySurface::new();
        let mut reg: Vec<MissionRegistration> = Vec::new();
        match renderer.render_mission_path(config.player, code, 0, steps, &mut surface, &mut reg) {
            Ok(n) => {
                if verbose {
                    println!(
                        "  SEG={:3}: {} bubbles, {} path pixels",
                        segs,
                        n,
                        surface.count_color(colors::PATH)
                    );
                }
                counts.push(n);
            }
            Err(e) => {
                results.push(TestResult::new(
                    "resolution_sweep",
                    false,
                    format!("SEG={}: {}", segs, e),
                ));
                return results;
            }
        }
    }

    let stable = counts.windows(2).all(|w| w[0] == w[1]);
    results.push(TestResult::new(
        "resolution_bubbles_stable",
        stable,
        format!("mission {:02} bubble counts {:?}", code, counts),
    ));

    let mut r = MissionPathRenderer::with_resolution(PathResolution::MAX);
    r.increase_path_resolution();
    let high = r.resolution();
    let mut r = MissionPathRenderer::with_resolution(PathResolution::MIN);
    r.decrease_path_resolution();
    let low = r.resolution();
    results.push(TestResult::new(
        "resolution_clamped",
        high == PathResolution::MAX && low == PathResolution::MIN,
        format!("range {}..={}", low.get(), high.get()),
    ));

    results
}

// ── 5. Malformed programs ───────────────────────────────────────────────

fn validate_error_paths(verbose: bool) -> Vec<TestResult> {
    println!("--- Malformed Programs ---");
    let mut results = Vec::new();

    let cases: [(&str, fn(&PathError) -> bool); 4] = [
        ("X1AZ", |e| matches!(e, PathError::MalformedHeader)),
        ("01A1XZ", |e| matches!(e, PathError::UnknownOpcode { letter: 'X', .. })),
        ("01C1Z", |e| matches!(e, PathError::TruncatedOperands { .. })),
        ("01A1K", |e| matches!(e, PathError::MissingTerminator)),
    ];

    for (record, expected) in cases {
        let outcome = MissionProgram::parse(record);
        let ok = outcome.as_ref().err().is_some_and(expected);
        if verbose {
            println!("  {:?} -> {:?}", record, outcome.as_ref().err());
        }
        results.push(TestResult::new(
            "program_rejected",
            ok,
            format!("{:?}", record),
        ));
    }

    // A failed render leaves nothing behind
    let steps = MissionSteps::new(vec!["01A0KLZ".into(), "02C1Z".into()]);
    let mut renderer = MissionPathRenderer::new();
    let mut surface = LegacySurface::new();
    let mut reg: Vec<MissionRegistration> = Vec::new();
    let first = renderer.render_mission_path(Player::Usa, 1, 0, &steps, &mut surface, &mut reg);
    let second = renderer.render_mission_path(Player::Usa, 2, 0, &steps, &mut surface, &mut reg);
    let missing = renderer.render_mission_path(Player::Usa, 3, 0, &steps, &mut surface, &mut reg);
    results.push(TestResult::new(
        "failed_render_clears_registry",
        first.is_ok()
            && second.is_err()
            && matches!(missing, Err(PathError::MissionNotFound(3)))
            && renderer.bubbles_drawn() == 0
            && reg.len() == 1
            && surface.sync_count() == 1,
        format!("{} registrations, {} syncs", reg.len(), surface.sync_count()),
    ));

    results
}

// ── 6. Crew bookkeeping ─────────────────────────────────────────────────

fn validate_crew_logic(verbose: bool) -> Vec<TestResult> {
    println!("--- Crew Logic ---");
    let mut results = Vec::new();

    let astro = |name: &str, compat: i16| Astronaut {
        name: name.into(),
        compat,
        compat_left: 2,
        compat_right: 2,
        ..Default::default()
    };

    // Compatibility wraps around the 1-10 scale
    let pairs = [(1, 10, true), (1, 9, true), (5, 8, false), (9, 1, true)];
    let wrong: Vec<_> = pairs
        .iter()
        .filter(|&&(a, b, want)| crew::compatible(&astro("a", a), &astro("b", b)) != want)
        .collect();
    results.push(TestResult::new(
        "crew_compat_wrap",
        wrong.is_empty(),
        format!("{} mismatched pairs", wrong.len()),
    ));

    let mut roster = Roster {
        pool: (1..=6).map(|i| astro(&format!("Astro {}", i), i)).collect(),
        crews: vec![vec![vec![0, 1], vec![2, 3]], vec![vec![4, 5]]],
    };
    roster.pool[3].status = AstronautStatus::Dead;
    roster.pool[4].moved = true;

    let before = crew::available_crews_count(&roster, 1, roster_options(false));
    let trained = crew::available_crews_count(&roster, 1, roster_options(true));
    results.push(TestResult::new(
        "crew_training_wait",
        before == 0 && trained == 1,
        format!("{} available, {} without training", before, trained),
    ));

    let broken = crew::check_flight_crews(&mut roster);
    if verbose {
        println!("  broke {} crews", broken);
    }
    results.push(TestResult::new(
        "crew_break_grounded",
        broken == 1 && roster.crews[0][1].is_empty() && roster.crews[0][0] == vec![0, 1],
        format!("{} crews broken", broken),
    ));

    results
}

fn roster_options(no_crew_training: bool) -> crew::CrewOptions {
    crew::CrewOptions { no_crew_training }
}

// ── 7. Legacy assets ────────────────────────────────────────────────────

fn validate_legacy_assets(config: &RenderConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Legacy Assets ---");
    let mut results = Vec::new();

    // 4x2 image: a run of four 7s, then a literal row
    let src = [(-3i8) as u8, 7, 3, 1, 2, 3, 4];
    let decoded = rle::decode_rle_image(&src, 4, 2);
    results.push(TestResult::new(
        "rle_decode",
        decoded.as_deref() == Ok(&[7, 7, 7, 7, 1, 2, 3, 4][..]),
        format!("{:?}", decoded),
    ));

    let pcx = rle::decode_pcx(&[0xc4, 0x21, 0x09]);
    results.push(TestResult::new(
        "pcx_decode",
        pcx.as_deref() == Ok(&[0x21, 0x21, 0x21, 0x21, 0x09][..]),
        format!("{:?}", pcx),
    ));

    let names = [
        voice_file_name(Player::Usa, 3),
        voice_file_name(Player::Soviet, 42),
    ];
    results.push(TestResult::new(
        "voice_file_names",
        names[0] == "usa_003.ogg" && names[1] == "sov_042.ogg",
        names.join(", "),
    ));
    if verbose {
        let path = config.data_paths().path_of(&names[0], FileType::Audio);
        println!("  voice clips resolve under {}", path.display());
    }

    let mut a = LegacySurface::new();
    let mut b = LegacySurface::new();
    draw_starfield(&mut a, config.starfield_seed, config.star_count);
    draw_starfield(&mut b, config.starfield_seed, config.star_count);
    a.sync();
    results.push(TestResult::new(
        "starfield_deterministic",
        a.pixels() == b.pixels() && a.count_color(colors::BUBBLE) == 0,
        format!("{} stars from seed {}", config.star_count, config.starfield_seed),
    ));

    results
}
