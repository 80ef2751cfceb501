//! # linebar CLI
//!
//! Command-line interface for encoding and inspecting linear barcodes.
//!
//! ## Usage
//!
//! ```bash
//! # Bar/space widths of a Code 128 barcode
//! linebar encode "HELLO 123"
//!
//! # EAN-13 as PNG
//! linebar encode -t EAN13 4001513000620 --png ean.png
//!
//! # EAN-128 with '|' standing for FNC1, as JSON
//! linebar encode -t EAN128 --separator '|' "10ABC|15031231" --json
//!
//! # Load layout from a JSON file, override the code
//! linebar encode --config label.json 40125435
//!
//! # Bracketed label of raw EAN-128 data
//! linebar decode 01040123453333361503123110123456
//!
//! # Check digit, UPC-E conversion, catalog
//! linebar parity 400151300062
//! linebar upce 042100005264
//! linebar fields
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use linebar::{
    barcode::BarcodeSpec,
    ean128::{self, DecodedField, FNC1},
    error::BarcodeError,
    render::{self, RenderError},
    symbology::{self, BarWidths, CharPosition, Symbology, ean},
};

/// linebar - Linear barcode encoder
#[derive(Parser, Debug)]
#[command(name = "linebar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a code into bar/space widths
    Encode {
        /// Code text (defaults to the symbology's sample code)
        code: Option<String>,

        /// Symbology name, e.g. code128, EAN13, EAN128, itf
        #[arg(short = 't', long = "type", value_name = "SYMBOLOGY")]
        symbology: Option<Symbology>,

        /// Load the barcode spec from a JSON file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Character written as FNC1 in the code text
        #[arg(long, value_name = "CHAR")]
        separator: Option<char>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Print the multi-line description instead
        #[arg(long, conflicts_with = "json")]
        describe: bool,

        /// Also render the barcode to an image (.png or .jpg)
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,

        /// Magnification for the image
        #[arg(long)]
        magnification: Option<f32>,

        /// Module width in pixels
        #[arg(long)]
        bar_width: Option<u32>,

        /// Bar height in pixels
        #[arg(long)]
        bar_height: Option<u32>,

        /// Draw bars only
        #[arg(long)]
        no_text: bool,
    },

    /// Convert raw EAN-128 data into its bracketed label
    Decode {
        /// Raw data; variable-length fields end with FNC1 (see --separator)
        raw: String,

        /// Character written as FNC1 in the raw data
        #[arg(long, value_name = "CHAR")]
        separator: Option<char>,

        /// Check content against the catalog (numeric-only, maximum length)
        #[arg(long)]
        strict: bool,

        /// Print the decoded fields as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute the EAN/UPC check digit
    Parity {
        /// Digits without check digit
        digits: String,
    },

    /// Convert a UPC-A code into UPC-E
    Upce {
        /// 12-digit UPC-A code
        upca: String,

        /// Also print the UPC-E bar widths
        #[arg(long)]
        bars: bool,
    },

    /// List supported symbologies
    List,

    /// List EAN-128 application identifiers
    Fields {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Barcode(#[from] BarcodeError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("cannot read config '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("'{0}' has no UPC-E form")]
    NoUpcE(String),
}

/// JSON form of `encode`.
#[derive(Serialize)]
struct EncodeReport<'a> {
    symbology: Symbology,
    code: &'a str,
    human_text: String,
    raw_text: String,
    module_width: u32,
    bars: BarWidths,
    guard_bar_indices: &'static [usize],
    char_positions: Vec<CharPosition>,
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or(filter);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Encode {
            code,
            symbology,
            config,
            separator,
            json,
            describe,
            png,
            magnification,
            bar_width,
            bar_height,
            no_text,
        } => {
            let mut spec = match &config {
                Some(path) => load_spec(path, symbology)?,
                None => BarcodeSpec::new(symbology.unwrap_or(Symbology::Code128)),
            };
            if let Some(code) = code {
                spec.code = code;
            }
            if let Some(sep) = separator {
                spec.code = with_fnc1(&spec.code, sep);
            }
            if let Some(m) = magnification {
                spec = spec.magnification(m);
            }
            if let Some(w) = bar_width {
                spec = spec.bar_width(w);
            }
            if let Some(h) = bar_height {
                spec = spec.bar_height(h);
            }
            if no_text {
                spec = spec.draw_text(false);
            }

            if describe {
                println!("{}", spec.describe());
            } else {
                let bars = spec.bars()?;
                if json {
                    let report = EncodeReport {
                        symbology: spec.symbology,
                        code: &spec.code,
                        human_text: spec.human_text()?,
                        raw_text: spec.raw_text()?,
                        module_width: bars.module_width(),
                        bars,
                        guard_bar_indices: spec.guard_bar_indices(),
                        char_positions: spec.char_positions(),
                    };
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    println!("{}", spec.human_text()?);
                    println!("{}", join_widths(&bars));
                    println!("{} runs, {} modules", bars.len(), bars.module_width());
                }
            }

            if let Some(path) = png {
                render::export(&spec, &path)?;
                info!(path = %path.display(), "image written");
                eprintln!("Saved to {}", path.display());
            }
        }

        Commands::Decode {
            raw,
            separator,
            strict,
            json,
        } => {
            let raw = match separator {
                Some(sep) => with_fnc1(&raw, sep),
                None => raw,
            };
            let fields = if strict {
                ean128::validate(&raw)?
            } else {
                ean128::decode_fields(&raw)?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&fields)?);
            } else {
                let label: String = fields.iter().map(DecodedField::to_string).collect();
                println!("{}", label);
                for field in &fields {
                    println!("  ({}) {:<30} {}", field.id, field.content, field.field.description);
                }
            }
        }

        Commands::Parity { digits } => {
            let digits = symbology::keep_numbers(&digits);
            let check = ean::calculate_ean_parity(&digits);
            println!("{}", check);
            println!("{}{}", digits, check);
        }

        Commands::Upce { upca, bars } => {
            let upce = ean::convert_upca_to_upce(&upca).ok_or_else(|| CliError::NoUpcE(upca.clone()))?;
            println!("{}", upce);
            if bars {
                println!("{}", join_widths(&ean::upce_bars(&upce)?));
            }
        }

        Commands::List => {
            println!("Available symbologies:");
            for name in symbology::list_symbologies() {
                println!("  {}", name);
            }
        }

        Commands::Fields { json } => {
            if json {
                let fields: Vec<_> = ean128::fields().collect();
                println!("{}", serde_json::to_string_pretty(&fields)?);
            } else {
                println!("{:<10} {:>4} {:<8} {:<8} DESCRIPTION", "AI", "LEN", "KIND", "CONTENT");
                for field in ean128::fields() {
                    println!(
                        "{:<10} {:>4} {:<8} {:<8} {}",
                        field.id,
                        field.content_length,
                        if field.fixed_length { "fixed" } else { "variable" },
                        if field.numeric_only { "numeric" } else { "alnum" },
                        field.description
                    );
                }
            }
        }
    }

    Ok(())
}

fn load_spec(path: &Path, symbology: Option<Symbology>) -> Result<BarcodeSpec, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;
    let spec = BarcodeSpec::from_json(&text, symbology).map_err(|source| CliError::ConfigParse {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), "loaded barcode config");
    Ok(spec)
}

fn with_fnc1(text: &str, separator: char) -> String {
    text.chars()
        .map(|c| if c == separator { FNC1 } else { c })
        .collect()
}

fn join_widths(widths: &[u8]) -> String {
    widths
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
