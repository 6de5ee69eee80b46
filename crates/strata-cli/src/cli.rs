//! Command-line interface for the strata utility
//!
//! Renders hierarchical data (visualization payloads, or arbitrary JSON and
//! YAML documents) to SVG, and inspects or validates payloads.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::convert::DataConverter;
use strata::core::logging::init_logging;
use strata::model::{GraphModelBuilder, PayloadShape, RenderModel};
use strata::view::{RenderRequest, ViewController};
use strata::{Size, SourceFormat, ThemeKind, ViewKind, VizConfig};

/// Strata - Render hierarchical data as tree, column or force diagrams
#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Render JSON/YAML hierarchies as interactive-style SVG diagrams")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Options shared by every command that reads a document
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Input file (use - for stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// What the input contains
    #[arg(long, value_enum, default_value_t = InputFormat::Payload)]
    pub format: InputFormat,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a document to SVG
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Output file for the SVG (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Visualization to produce
        #[arg(long, value_enum, default_value_t = ViewChoice::Tree)]
        view: ViewChoice,

        /// Color theme
        #[arg(long, value_enum, default_value_t = ThemeChoice::Light)]
        theme: ThemeChoice,

        /// Canvas width in pixels
        #[arg(long, default_value_t = 900.0)]
        width: f64,

        /// Canvas height in pixels
        #[arg(long, default_value_t = 600.0)]
        height: f64,
    },

    /// Print statistics about the normalized model
    Inspect {
        #[command(flatten)]
        input: InputArgs,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Check that a document yields a valid payload
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Input document kinds
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum InputFormat {
    /// A ready `{nodes, links}` or `{name, children}` payload
    Payload,
    /// Any JSON document
    Json,
    /// Any YAML document
    Yaml,
}

impl InputFormat {
    /// Source format for the converter, if the input needs converting
    pub fn source_format(&self) -> Option<SourceFormat> {
        match self {
            InputFormat::Payload => None,
            InputFormat::Json => Some(SourceFormat::Json),
            InputFormat::Yaml => Some(SourceFormat::Yaml),
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum ViewChoice {
    Tree,
    Columns,
    Force,
}

impl From<ViewChoice> for ViewKind {
    fn from(value: ViewChoice) -> Self {
        match value {
            ViewChoice::Tree => ViewKind::Tree,
            ViewChoice::Columns => ViewKind::Columns,
            ViewChoice::Force => ViewKind::Force,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum ThemeChoice {
    Light,
    Dark,
}

impl From<ThemeChoice> for ThemeKind {
    fn from(value: ThemeChoice) -> Self {
        match value {
            ThemeChoice::Light => ThemeKind::Light,
            ThemeChoice::Dark => ThemeKind::Dark,
        }
    }
}

/// Model statistics printed by `inspect`
#[derive(Debug, Serialize, PartialEq)]
pub struct ModelStats {
    pub shape: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub leaf_count: usize,
    pub max_depth: usize,
    pub dropped_edges: usize,
}

impl ModelStats {
    pub fn from_model(model: &RenderModel) -> Self {
        let shape = match model.shape() {
            PayloadShape::Graph => "graph",
            PayloadShape::Tree => "tree",
        };
        Self {
            shape: shape.to_string(),
            node_count: model.node_count(),
            edge_count: model.edge_count(),
            leaf_count: model.leaf_count(),
            max_depth: model.max_depth(),
            dropped_edges: model.dropped_edges(),
        }
    }
}

/// Main CLI application
#[derive(Default)]
pub struct StrataApp;

impl StrataApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over the flags
        let log_level_str = std::env::var("STRATA_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("STRATA_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Strata v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Render {
                input,
                output,
                view,
                theme,
                width,
                height,
            } => {
                let svg = self.render_command(
                    &input,
                    view.into(),
                    theme.into(),
                    Size::new(width, height),
                    cli.verbose,
                )?;
                self.write_output(output, &svg)
            }
            Commands::Inspect { input, json } => self.inspect_command(&input, json, cli.verbose),
            Commands::Validate { input } => self.validate_command(&input, cli.verbose),
        }
    }

    /// Render to an SVG document, running the force view to rest
    pub fn render_command(
        &self,
        input: &InputArgs,
        view: ViewKind,
        theme: ThemeKind,
        size: Size,
        verbose: bool,
    ) -> Result<String> {
        let config = load_config(input)?;
        let max_frames = config.force.max_ticks;
        let content = self.read_input(input.input.clone())?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let mut controller = ViewController::new(config);
        match input.format.source_format() {
            None => controller.render(RenderRequest::new(content, view, theme, size))?,
            Some(format) => {
                let converter = converter_for(view);
                controller.render_source(&content, format, &converter, view, theme, size)?
            }
        }

        if view.is_animated() {
            let mut frames = 0;
            while frames < max_frames && controller.frame() == strata::force::TickOutcome::Ticked {
                frames += 1;
            }
            info!(frames, "Simulation stepped to rest");
        }

        if verbose {
            eprintln!("Rendered {} view", view);
        }
        Ok(controller.scene().to_svg())
    }

    /// Handle the inspect command
    pub fn inspect_command(&self, input: &InputArgs, json: bool, verbose: bool) -> Result<()> {
        let stats = ModelStats::from_model(&self.load_model(input, verbose)?);

        if json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            println!("Shape:         {}", stats.shape);
            println!("Nodes:         {}", stats.node_count);
            println!("Edges:         {}", stats.edge_count);
            println!("Leaves:        {}", stats.leaf_count);
            println!("Max depth:     {}", stats.max_depth);
            println!("Dropped edges: {}", stats.dropped_edges);
        }
        Ok(())
    }

    /// Handle the validate command
    pub fn validate_command(&self, input: &InputArgs, verbose: bool) -> Result<()> {
        match self.load_model(input, verbose) {
            Ok(model) => {
                println!(
                    "✓ Valid {} payload ({} nodes)",
                    ModelStats::from_model(&model).shape,
                    model.node_count()
                );
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid payload: {}", e);
                Err(e)
            }
        }
    }

    /// Read, convert if needed, and build the model
    pub fn load_model(&self, input: &InputArgs, verbose: bool) -> Result<RenderModel> {
        let config = load_config(input)?;
        let content = self.read_input(input.input.clone())?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let payload = match input.format.source_format() {
            None => content,
            Some(format) => {
                use strata::view::Converter as _;
                DataConverter::graph().convert(&content, format)?
            }
        };
        debug!(bytes = payload.len(), "Building model");
        Ok(GraphModelBuilder::with_config(config.builder).build_str(&payload)?)
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout();
                writeln!(stdout, "{}", content)?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

/// The tree view draws nested payloads; the others draw flat graphs
fn converter_for(view: ViewKind) -> DataConverter {
    match view {
        ViewKind::Tree => DataConverter::tree(),
        ViewKind::Columns | ViewKind::Force => DataConverter::graph(),
    }
}

fn load_config(input: &InputArgs) -> Result<VizConfig> {
    match &input.config {
        Some(path) => VizConfig::load(path)
            .map_err(|e| anyhow!("Failed to load config '{}': {}", path.display(), e)),
        None => Ok(VizConfig::default()),
    }
}
