//! Deployment Diagram CLI
//!
//! Validates the built-in deployment presets and prints a report per preset.
//!
//! Usage:
//!   deployment-diagram [OPTIONS] [PRESET]
//!
//! Options:
//!   -c, --config <FILE>      Layout configuration (TOML format)
//!   -s, --sweep              Also validate with each component toggled on in turn
//!   -a, --all-visible        Validate with every component switched on
//!   -p, --positions          Print resolved component and boundary positions
//!   -l, --list               List the built-in presets
//!   --log-level <LEVEL>      Log level (off, error, warn, info, debug, trace)
//!   -h, --help               Print help

use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::Parser;
use log::{debug, LevelFilter};

use deployment_diagram::layout::{sweep_toggles, validate, Scene};
use deployment_diagram::preset::{self, builtin};
use deployment_diagram::{Error, LayoutConfig};

#[derive(Parser, Debug)]
#[command(name = "deployment-diagram")]
#[command(about = "Validate reference cloud deployment diagram presets")]
struct Cli {
    /// Preset to validate (validates every built-in preset if not provided)
    preset: Option<String>,

    /// Layout configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Validate once per component with that component toggled on
    #[arg(short, long)]
    sweep: bool,

    /// Validate with every component visible
    #[arg(short, long)]
    all_visible: bool,

    /// Print resolved positions before the report
    #[arg(short, long)]
    positions: bool,

    /// List the built-in presets and exit
    #[arg(short, long)]
    list: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", cli.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
    debug!(cli:?; "Parsed arguments");

    if cli.list {
        print_list();
        return;
    }

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Error::Preset(err) = &e {
                if let Some(suggestions) = err.suggestions().filter(|s| !s.is_empty()) {
                    eprintln!("Did you mean: {}?", suggestions.join(", "));
                }
            }
            process::exit(1);
        }
    }
}

/// Validate the requested presets; `Ok(false)` when any error was found
fn run(cli: &Cli) -> Result<bool, Error> {
    let config = match &cli.config {
        Some(path) => LayoutConfig::from_file(path)?,
        None => LayoutConfig::default(),
    };

    let ids: Vec<String> = match &cli.preset {
        Some(id) => vec![id.clone()],
        None => builtin::PRESET_IDS.iter().map(|id| id.to_string()).collect(),
    };

    let mut clean = true;
    for id in ids {
        let mut preset = preset::load(&id, &config)?;
        if cli.all_visible {
            preset = preset.with_all_visible();
        }
        let scene = preset.scene(&config);

        println!("=== {} ({}) ===", preset.name, preset.id);
        if cli.positions {
            print_positions(&scene);
        }

        let report = validate(&scene);
        println!("{}", report);
        println!();
        clean &= report.is_valid();

        if cli.sweep {
            println!("Toggle sweep:");
            let checks = sweep_toggles(&preset.components, &preset.boundaries, &config);
            for check in &checks {
                let errors = check.report.error_count();
                if errors == 0 {
                    println!("  {:<24} ok", check.component_id);
                } else {
                    println!("  {:<24} {} error(s)", check.component_id, errors);
                    for violation in check.report.errors() {
                        println!("      {}", violation);
                    }
                }
                clean &= errors == 0;
            }
            println!();
        }
    }

    Ok(clean)
}

fn print_list() {
    for definition in builtin::definitions() {
        println!("{:<18} {}", definition.id, definition.name);
        if !definition.description.is_empty() {
            println!("{:<18} {}", "", definition.description);
        }
    }
}

fn print_positions(scene: &Scene) {
    let visible = scene.components.iter().filter(|c| c.visible).count();
    println!("Visible components: {}/{}", visible, scene.components.len());

    for boundary in scene.boundaries {
        let bounds = scene.effective_box(boundary);
        println!(
            "{} at ({}, {}) {}x{} [{}]",
            boundary.label, bounds.x, bounds.y, bounds.width, bounds.height, boundary.zone
        );
        for c in scene
            .components
            .iter()
            .filter(|c| c.visible && c.has_parent(&boundary.id))
        {
            let abs = scene.absolute_position(c);
            println!(
                "  - {}: rel({}, {}) -> abs({}, {})",
                c.label, c.position.x, c.position.y, abs.x, abs.y
            );
        }
    }

    for c in scene
        .components
        .iter()
        .filter(|c| c.visible && c.parent_boundary.is_none())
    {
        let abs = scene.absolute_position(c);
        match &c.positioning {
            Some(p) => println!(
                "{}: ({}, {}) [{}] {} {}",
                c.label, abs.x, abs.y, c.zone, p.placement, p.relative_to
            ),
            None => println!("{}: ({}, {}) [{}]", c.label, abs.x, abs.y, c.zone),
        }
    }
    println!();
}
