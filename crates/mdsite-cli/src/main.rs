//! mdsite - Build static HTML sites from Markdown directories
//!
//! Usage:
//!   mdsite [OPTIONS] <COMMAND>
//!
//! Commands:
//!   build     Render every page under the content directory
//!   render    Render a single document to stdout
//!   validate  Check documents for errors

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use mdsite_cli::config::DEFAULT_CONFIG_FILE;
use mdsite_cli::site::discover_markdown;
use mdsite_cli::{build_site, Overrides, SiteConfig};
use mdsite_core::{compile_document, extract_title, ErrorKind, HtmlNode, MarkdownError};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "mdsite", version, about = "Static site generator for Markdown directories")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the site into the destination directory
    Build(BuildArgs),

    /// Compile one document and print its HTML
    Render(RenderArgs),

    /// Check that documents compile and have a title
    Validate(ValidateArgs),
}

#[derive(clap::Args)]
struct BuildArgs {
    /// Prefix for root-relative links, e.g. /my-repo/
    base_path: Option<String>,

    /// Config file (missing file means defaults)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory of Markdown pages
    #[arg(long)]
    content: Option<PathBuf>,

    /// Directory of static assets
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// HTML template file
    #[arg(long)]
    template: Option<PathBuf>,

    /// Output directory
    #[arg(long)]
    dest: Option<PathBuf>,
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Markdown file to render
    file: PathBuf,

    /// Print the HTML node tree as JSON instead of HTML
    #[arg(short, long)]
    json: bool,
}

#[derive(clap::Args)]
struct ValidateArgs {
    /// Markdown file, or directory searched recursively
    path: PathBuf,

    /// Output in JSON format
    #[arg(short, long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Build(args) => cmd_build(args),
        Command::Render(args) => cmd_render(&args),
        Command::Validate(args) => cmd_validate(&args),
    }
}

// =============================================================================
// Build Command
// =============================================================================

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let config = SiteConfig::load_or_default(&args.config)?.with_overrides(Overrides {
        content_dir: args.content,
        static_dir: args.static_dir,
        template: args.template,
        dest_dir: args.dest,
        base_path: args.base_path,
    });
    log::debug!("building with {:?}", config);

    let report = build_site(&config).context("site build failed")?;

    println!(
        "Built {} page(s) and copied {} asset(s) into {}",
        report.pages,
        report.assets,
        config.dest_dir.display()
    );
    Ok(())
}

// =============================================================================
// Render Command
// =============================================================================

fn cmd_render(args: &RenderArgs) -> anyhow::Result<()> {
    let input = read_file(&args.file)?;
    let root = compile_document(&input)
        .with_context(|| format!("failed to compile '{}'", args.file.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&convert_node(&root))?);
    } else {
        println!("{}", root.to_html()?);
    }
    Ok(())
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

// =============================================================================
// Validate Command
// =============================================================================

#[derive(Serialize)]
struct JsonError {
    path: String,
    message: String,
    kind: &'static str,
}

fn cmd_validate(args: &ValidateArgs) -> anyhow::Result<()> {
    let documents = if args.path.is_dir() {
        discover_markdown(&args.path)?
            .into_iter()
            .map(|(relative, markdown)| (args.path.join(relative), markdown))
            .collect()
    } else {
        vec![(args.path.clone(), read_file(&args.path)?)]
    };

    let errors: Vec<JsonError> = documents
        .iter()
        .filter_map(|(path, markdown)| {
            validate_document(markdown).err().map(|e| JsonError {
                path: path.display().to_string(),
                message: e.to_string(),
                kind: kind_name(e.kind()),
            })
        })
        .collect();

    if args.json {
        println!(
            "{}",
            serde_json::json!({"valid": errors.is_empty(), "errors": errors})
        );
    } else if errors.is_empty() {
        println!("Valid: {} document(s), no errors found", documents.len());
    } else {
        eprintln!("Invalid: {} error(s) found", errors.len());
        for error in &errors {
            eprintln!("  - {}: {}", error.path, error.message);
        }
    }

    if !errors.is_empty() {
        bail!("{} of {} document(s) failed", errors.len(), documents.len());
    }
    Ok(())
}

fn validate_document(markdown: &str) -> Result<(), MarkdownError> {
    extract_title(markdown)?;
    compile_document(markdown)?.to_html()?;
    Ok(())
}

fn kind_name(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::UnterminatedDelimiter => "unterminated_delimiter",
        ErrorKind::MalformedBlock => "malformed_block",
        ErrorKind::Render => "render",
        ErrorKind::NoTitle => "no_title",
        ErrorKind::Internal => "internal",
    }
}

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Serialize)]
#[serde(tag = "type")]
enum JsonNode<'a> {
    Leaf {
        tag: Option<&'a str>,
        value: Option<&'a str>,
        attrs: Vec<(&'a str, &'a str)>,
    },
    Parent {
        tag: Option<&'a str>,
        attrs: Vec<(&'a str, &'a str)>,
        children: Vec<JsonNode<'a>>,
    },
}

fn convert_node(node: &HtmlNode) -> JsonNode<'_> {
    match node {
        HtmlNode::Leaf(leaf) => JsonNode::Leaf {
            tag: leaf.tag.as_deref(),
            value: leaf.value.as_deref(),
            attrs: leaf.attrs.iter().collect(),
        },
        HtmlNode::Parent(parent) => JsonNode::Parent {
            tag: parent.tag.as_deref(),
            attrs: parent.attrs.iter().collect(),
            children: parent
                .children
                .iter()
                .flatten()
                .map(convert_node)
                .collect(),
        },
    }
}
