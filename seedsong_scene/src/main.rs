// Seedsong CLI entry point.
//
// Grows an L-system figure and renders the result twice: as SVG frames of
// the growth animation (with the currently sounding note highlighted) and,
// optionally, as a MIDI file of the same melody.
//
// Usage:
//   seedsong [OPTIONS]
//     --preset <NAME>      Start from a named preset (default: sprig)
//     --config <FILE>      Load a scene config JSON file
//     --axiom/--rules/--iterations/--scale   Override pieces of the scene
//     --frames <N> --fps <N> --final-only --midi <FILE> --out <DIR>
//
// Run with --help for the full list, --list-presets for the presets.

use std::path::PathBuf;

use seedsong_grammar::RuleSet;
use seedsong_music::{Scale, interpret_for_tone, midi::write_midi};
use seedsong_scene::{AnimationDriver, SceneConfig, write_frames};

struct CliOptions {
    config: SceneConfig,
    frames: u32,
    fps: f64,
    final_only: bool,
    midi_path: Option<PathBuf>,
    out_dir: PathBuf,
}

fn main() {
    let options = parse_args();
    let grammar = &options.config.grammar;

    println!("=== Seedsong ===");
    println!("Axiom: {}", grammar.axiom);
    for (symbol, replacement) in grammar.rules.iter() {
        println!("Rule:  {symbol} -> {replacement}");
    }
    println!("Iterations: {}", grammar.iterations);
    println!("Scale: {}", options.config.tone.scale.name());
    println!("Output: {}", options.out_dir.display());
    println!();

    println!("[1/4] Expanding grammar...");
    let estimate = grammar.estimated_len();
    println!("  Upper-bound estimate: {estimate} symbols.");
    if estimate > 50_000_000 {
        println!("  Warning: that is a very large expansion; this may take a while.");
    }

    let mut driver = AnimationDriver::new();
    let timeline = driver.restart(&options.config, options.frames, options.fps);
    println!(
        "  Expanded to {} symbols.",
        driver.expanded_path().chars().count()
    );

    println!("[2/4] Laying out the melody...");
    println!(
        "  {} notes, {:.1} s of playback.",
        driver.note_count(),
        driver.melody_seconds()
    );

    println!("[3/4] Rendering SVG...");
    if options.final_only {
        if let Err(e) = std::fs::create_dir_all(&options.out_dir) {
            eprintln!("  Error creating {}: {e}", options.out_dir.display());
            std::process::exit(1);
        }
        let file = options.out_dir.join("final.svg");
        match std::fs::write(&file, driver.render_final()) {
            Ok(()) => println!("  Wrote {}.", file.display()),
            Err(e) => {
                eprintln!("  Error writing {}: {e}", file.display());
                std::process::exit(1);
            }
        }
    } else {
        match write_frames(&mut driver, &timeline, &options.out_dir) {
            Ok(files) => println!(
                "  Wrote {} frames to {}.",
                files.len(),
                options.out_dir.display()
            ),
            Err(e) => {
                eprintln!("  Error writing frames: {e}");
                std::process::exit(1);
            }
        }
    }

    match &options.midi_path {
        Some(path) => {
            println!("[4/4] Writing MIDI to {}...", path.display());
            let events = interpret_for_tone(driver.expanded_path(), &options.config.tone);
            match write_midi(&events, options.config.tone.volume, path) {
                Ok(()) => {
                    println!("  Done.");
                    println!();
                    println!("Play with: timidity {} (or any MIDI player)", path.display());
                }
                Err(e) => {
                    eprintln!("  Error writing MIDI: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("[4/4] No --midi path given; skipping MIDI export.");
            println!();
            println!(
                "Open {}/frame_0000.svg in a browser to watch it grow.",
                options.out_dir.display()
            );
        }
    }
}

/// Parse command-line arguments into `CliOptions`. Uses simple
/// `std::env::args()` matching, no clap dependency.
fn parse_args() -> CliOptions {
    let args: Vec<String> = std::env::args().collect();

    let mut preset: Option<String> = None;
    let mut config_file: Option<PathBuf> = None;
    let mut axiom: Option<String> = None;
    let mut rules_json: Option<String> = None;
    let mut iterations: Option<u32> = None;
    let mut scale: Option<Scale> = None;
    let mut frames: u32 = 120;
    let mut fps: f64 = 30.0;
    let mut final_only = false;
    let mut midi_path: Option<PathBuf> = None;
    let mut out_dir = PathBuf::from("frames");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--preset" => {
                i += 1;
                preset = Some(require_value(&args, i, "--preset"));
            }
            "--config" => {
                i += 1;
                config_file = Some(PathBuf::from(require_value(&args, i, "--config")));
            }
            "--axiom" => {
                i += 1;
                axiom = Some(require_value(&args, i, "--axiom"));
            }
            "--rules" => {
                i += 1;
                rules_json = Some(require_value(&args, i, "--rules"));
            }
            "--iterations" => {
                i += 1;
                iterations = Some(require_parsed(&args, i, "--iterations"));
            }
            "--scale" => {
                i += 1;
                let name = require_value(&args, i, "--scale");
                scale = Some(Scale::from_name(&name).unwrap_or_else(|| {
                    eprintln!("Unknown scale '{name}'. Known scales: {}.", scale_names());
                    std::process::exit(1);
                }));
            }
            "--frames" => {
                i += 1;
                frames = require_parsed(&args, i, "--frames");
            }
            "--fps" => {
                i += 1;
                fps = require_parsed(&args, i, "--fps");
                if !(fps > 0.0 && fps.is_finite()) {
                    eprintln!("--fps must be a positive number");
                    std::process::exit(1);
                }
            }
            "--final-only" => final_only = true,
            "--midi" => {
                i += 1;
                midi_path = Some(PathBuf::from(require_value(&args, i, "--midi")));
            }
            "--out" => {
                i += 1;
                out_dir = PathBuf::from(require_value(&args, i, "--out"));
            }
            "--list-presets" => {
                println!("Presets:");
                for name in SceneConfig::PRESET_NAMES {
                    println!("  {name}");
                }
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = if let Some(file) = &config_file {
        match SceneConfig::load(file) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {e}", file.display());
                std::process::exit(1);
            }
        }
    } else if let Some(name) = &preset {
        SceneConfig::preset(name).unwrap_or_else(|| {
            eprintln!("Unknown preset '{name}'. Try --list-presets.");
            std::process::exit(1);
        })
    } else {
        SceneConfig::default()
    };

    if let Some(new_axiom) = axiom {
        config.grammar.axiom = new_axiom;
    }
    if let Some(json) = rules_json {
        config.grammar.rules = match RuleSet::from_json_str(&json) {
            Ok(rules) => rules,
            Err(e) => {
                eprintln!("Bad --rules JSON: {e}");
                std::process::exit(1);
            }
        };
    }
    if let Some(n) = iterations {
        config.grammar.iterations = n;
    }
    if let Some(s) = scale {
        config.tone.scale = s;
    }

    // Validate the assembled scene as a whole; overrides can break an
    // otherwise good preset.
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    CliOptions {
        config,
        frames,
        fps,
        final_only,
        midi_path,
        out_dir,
    }
}

fn require_value(args: &[String], i: usize, flag: &str) -> String {
    args.get(i).cloned().unwrap_or_else(|| {
        eprintln!("{flag} requires a value");
        std::process::exit(1);
    })
}

fn require_parsed<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        eprintln!("{flag} requires a valid number");
        std::process::exit(1);
    })
}

fn scale_names() -> String {
    Scale::ALL
        .iter()
        .map(|s| s.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_usage() {
    println!("Usage: seedsong [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --preset <NAME>        Start from a named preset (default: sprig)");
    println!("  --config <FILE>        Load a scene config JSON file");
    println!("  --axiom <SYMBOLS>      Override the grammar axiom");
    println!("  --rules <JSON>         Override the rules, e.g. '{{\"F\": \"F[+F]\"}}'");
    println!("  --iterations <N>       Override the rewrite iteration count");
    println!("  --scale <NAME>         Override the tone scale");
    println!("  --frames <N>           Animation frames to render (default: 120)");
    println!("  --fps <N>              Frames per second of growth time (default: 30)");
    println!("  --final-only           Render a single fully grown final.svg");
    println!("  --midi <FILE>          Also write the melody as a MIDI file");
    println!("  --out <DIR>            Output directory (default: frames)");
    println!("  --list-presets         List preset names and exit");
    println!("  --help, -h             Show this help");
    println!();
    println!("Scales: {}", scale_names());
}
