//! restyle - print a markdown file with the styling engine's attributes

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;

use restyle::syntax::{Dirty, TriggerSet};
use restyle::{display, Config, Result, StyleError};

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Log to stderr, filtered by `RESTYLE_LOG` (default `warn`)
fn init_logging() {
    let filter = EnvFilter::try_from_env("RESTYLE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    padding: Option<usize>,
    triggers: Option<String>,
    file: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Args>> {
    let mut parsed = Args::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                print_version();
                return Ok(None);
            }
            "--config" | "-c" => {
                let path = args.next().ok_or_else(|| StyleError::invalid("--config", "missing path"))?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--padding" | "-p" => {
                let value = args.next().unwrap_or_default();
                let padding = value
                    .parse::<usize>()
                    .map_err(|_| StyleError::invalid("--padding", &value))?;
                parsed.padding = Some(padding);
            }
            "--triggers" | "-t" => {
                let chars = args.next().ok_or_else(|| StyleError::invalid("--triggers", "missing characters"))?;
                parsed.triggers = Some(chars);
            }
            other if other.starts_with('-') => {
                return Err(StyleError::Message(format!("Unknown option: {other}")));
            }
            _ => parsed.file = Some(PathBuf::from(arg)),
        }
    }

    Ok(Some(parsed))
}

fn run() -> Result<()> {
    let Some(args) = parse_args(env::args().skip(1))? else {
        return Ok(());
    };
    let Some(file) = args.file else {
        print_usage();
        return Err(StyleError::Message("No input file".to_string()));
    };

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(padding) = args.padding {
        config.paragraph_padding = padding;
    }
    if let Some(chars) = &args.triggers {
        config.triggers = TriggerSet::from_chars(chars);
    }

    let styler = config.styler()?;
    let text = fs::read_to_string(&file)?;
    let output = styler.restyle(&text, &Dirty::All);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    display::render(&mut out, &text, output.window.runs(), config.font_size)?;

    if !output.labels.is_empty() {
        println!();
        println!("Trigger labels:");
        for label in &output.labels {
            println!("  {:>6}  {}  {}", label.offset, label.trigger, label.label.trim_end());
        }
    }

    Ok(())
}

fn print_usage() {
    println!("restyle {} - markdown styling engine preview", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: restyle [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -c, --config FILE     Read settings and rules from FILE (default ~/.restyle.toml)");
    println!("  -p, --padding N       Paragraphs of padding around each edit");
    println!("  -t, --triggers CHARS  Trigger characters for labels (default \"#@&![\")");
    println!("  -h, --help            Show this help message");
    println!("  -V, --version         Show version information");
    println!();
    println!("Set RESTYLE_LOG=debug to trace styling passes on stderr.");
}

fn print_version() {
    println!("restyle {}", env!("CARGO_PKG_VERSION"));
}
