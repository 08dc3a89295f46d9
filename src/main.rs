//! JSON Template CLI
//!
//! Usage:
//!   json-template [OPTIONS] <TEMPLATE>
//!
//! Options:
//!   -d, --data <FILE>               Data file (JSON, or TOML by extension; stdin if omitted)
//!   -c, --config <FILE>             Compile options (TOML format)
//!       --format-char <CHAR>        Formatter separator, `|` or `:`
//!       --meta <MARKER>             Delimiter marker, e.g. `{}` or `[[]]`
//!       --default-formatter <NAME>  Default formatter, or `none`
//!   -v, --verbose                   Increase log verbosity
//!   -h, --help                      Print help

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use thiserror::Error;
use tracing::{debug, Level};

use json_template::{Template, TemplateConfig, Value, WriterSink};

#[derive(Parser)]
#[command(name = "json-template")]
#[command(about = "Expand a JSON Template against structured data")]
struct Cli {
    /// Template file
    template: PathBuf,

    /// Data file: JSON, or TOML when the extension is .toml (reads JSON from stdin if not provided)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Compile options file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Formatter separator, `|` or `:`
    #[arg(long)]
    format_char: Option<char>,

    /// Delimiter marker with equal left and right halves
    #[arg(long)]
    meta: Option<String>,

    /// Default formatter name, or `none` to require explicit formatters
    #[arg(long)]
    default_formatter: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    // Load compile options, command-line flags win over the config file
    let mut config = match &cli.config {
        Some(path) => match TemplateConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => TemplateConfig::default(),
    };
    if cli.format_char.is_some() {
        config.format_char = cli.format_char;
    }
    if cli.meta.is_some() {
        config.meta = cli.meta.clone();
    }
    if cli.default_formatter.is_some() {
        config.default_formatter = cli.default_formatter.clone();
    }
    debug!(?config, "compile options");
    let options = config.into_options();

    let source = match fs::read_to_string(&cli.template) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", cli.template.display(), e);
            process::exit(1);
        }
    };

    let filename = cli.template.display().to_string();
    let template = match Template::with_options(&source, &options) {
        Ok(t) => t,
        Err(e) => {
            eprint!("{}", e.format(&source, &filename));
            process::exit(1);
        }
    };

    let data = match load_data(cli.data.as_deref()) {
        Ok(data) => data,
        Err(e) => {
            match &cli.data {
                Some(path) => eprintln!("Error loading data '{}': {}", path.display(), e),
                None => eprintln!("Error loading data from stdin: {}", e),
            }
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut sink = WriterSink::new(BufWriter::new(stdout.lock()));
    let rendered = template.render(&data, &mut sink);
    let flushed = sink.into_inner().flush();

    if let Err(e) = rendered {
        eprintln!("Error: {}: {}", e.kind(), e);
        process::exit(1);
    }
    if let Err(e) = flushed {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Errors that can occur when loading the data tree
#[derive(Error, Debug)]
enum DataError {
    #[error("Failed to read data: {0}")]
    IoError(#[from] io::Error),
    #[error("Failed to parse JSON data: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Failed to parse TOML data: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Read the data tree from a file or stdin
fn load_data(path: Option<&Path>) -> Result<Value, DataError> {
    let (content, is_toml) = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let is_toml = path.extension().is_some_and(|ext| ext == "toml");
            (content, is_toml)
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            (buffer, false)
        }
    };

    if is_toml {
        let table: toml::Value = toml::from_str(&content)?;
        Ok(Value::from(table))
    } else {
        let json: serde_json::Value = serde_json::from_str(&content)?;
        Ok(Value::from(json))
    }
}
