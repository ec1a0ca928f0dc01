//! CLI application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use slidebolt_core::{
    build_url, extract_blocks, link_for_block, parse_block, rewrite_deck, Config, DeckBlock,
    LogReporter, ParsedCodeBlock,
};

/// Output format for the `show` command
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "slidebolt")]
#[command(author, version, about = "Compiler-visualization links for slide decks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite annotated fences to their audience-facing display source
    Process {
        /// Input deck (Markdown)
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print one service URL per annotated block
    Links {
        /// Input deck (Markdown)
        input: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the parsed block records
    Show {
        /// Input deck (Markdown)
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output,
            config,
        } => process_command(&input, output.as_deref(), config.as_deref()),
        Commands::Links { input, config } => links_command(&input, config.as_deref()),
        Commands::Show {
            input,
            format,
            config,
        } => show_command(&input, format, config.as_deref()),
    }
}

/// Execute the process command: splice display sources back into the deck
pub fn process_command(
    input: &Path,
    output: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let text = read_deck(input)?;

    let (deck_blocks, parsed) = parse_deck(&text, &config);
    let replacements: Vec<(DeckBlock, String)> = deck_blocks
        .into_iter()
        .zip(parsed)
        .map(|(block, parsed)| (block, parsed.display_source))
        .collect();
    let rewritten = rewrite_deck(&text, &replacements);

    match output {
        Some(path) => fs::write(path, rewritten)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?,
        None => print!("{}", rewritten),
    }

    Ok(())
}

/// Execute the links command: one full service URL per annotated block
pub fn links_command(input: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let text = read_deck(input)?;

    let (_, parsed) = parse_deck(&text, &config);
    let mut reporter = LogReporter;
    for block in &parsed {
        let fragment = link_for_block(&config, block, &mut reporter);
        println!("{}", build_url(&config, &fragment));
    }

    Ok(())
}

/// Execute the show command
pub fn show_command(input: &Path, format: OutputFormat, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let text = read_deck(input)?;

    let (_, parsed) = parse_deck(&text, &config);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&parsed)
                .context("Failed to serialize blocks to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if parsed.is_empty() {
                println!("No annotated blocks found in {}", input.display());
            }
            for (i, block) in parsed.iter().enumerate() {
                println!(
                    "Block {} [{} | {} | {}]",
                    i + 1,
                    block.language,
                    block.compiler,
                    block.options
                );
                for line in block.display_source.lines() {
                    println!("  {}", line);
                }
                println!();
            }
        }
    }

    Ok(())
}

/// Read the deck file, failing early with a clear message
fn read_deck(input: &Path) -> Result<String> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))
}

/// Extract and parse every annotated block in the deck
fn parse_deck(text: &str, config: &Config) -> (Vec<DeckBlock>, Vec<ParsedCodeBlock>) {
    let mut reporter = LogReporter;
    let deck_blocks = extract_blocks(text, &mut reporter);
    let parsed = deck_blocks
        .iter()
        .map(|block| parse_block(config, &block.raw, &mut reporter))
        .collect();
    (deck_blocks, parsed)
}

/// Load config from an explicit path or common locations, else defaults
fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Config::from_path(path)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        }
        None => {
            for candidate in ["slidebolt.toml", ".slidebolt.toml"] {
                if Path::new(candidate).exists() {
                    if let Ok(config) = Config::from_path(candidate) {
                        return Ok(config);
                    }
                }
            }
            Ok(Config::default())
        }
    }
}
