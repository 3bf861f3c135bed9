//! `tincture` command-line compiler.
//!
//! ```text
//! tincture compile button.yaml --tokens tokens.yaml --set primary --set size=small
//! ```
//!
//! Prints one `slot: classes` line per slot, a blank line, then the
//! generated stylesheet.

mod logging;

use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use tincture::{
    make_styles, RendererConfig, SelectorState, StyleOptions, StyleSheetFile, StyleSheetRenderer,
    TokenSet,
};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "tincture", version, about = "Compile style sheets to atomic CSS")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a style sheet for one selector state
    Compile(CompileArgs),
}

#[derive(Args, Debug)]
struct CompileArgs {
    /// Style sheet YAML file
    sheet: PathBuf,

    /// Token YAML file
    #[arg(long, value_name = "FILE")]
    tokens: Option<PathBuf>,

    /// Renderer config YAML file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit right-to-left CSS
    #[arg(long)]
    rtl: bool,

    /// Selector assignment, repeatable (`primary`, `size=small`)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// Only compile this slot
    #[arg(long, value_name = "NAME")]
    slot: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    match cli.command {
        Command::Compile(args) => compile(&args),
    }
}

fn compile(args: &CompileArgs) -> Result<String> {
    let sheet = StyleSheetFile::from_file(&args.sheet)
        .with_context(|| format!("loading style sheet {}", args.sheet.display()))?;

    let tokens = match &args.tokens {
        Some(path) => TokenSet::from_file(path)
            .with_context(|| format!("loading tokens {}", path.display()))?,
        None => TokenSet::new(),
    };

    let config = match &args.config {
        Some(path) => RendererConfig::from_file(path)
            .with_context(|| format!("loading renderer config {}", path.display()))?,
        None => RendererConfig::default(),
    };

    let mut state = SelectorState::new();
    for assignment in &args.set {
        state.parse_assignment(assignment)?;
    }
    debug!(?state, rtl = args.rtl, "selector state");

    if let Some(slot) = &args.slot {
        if sheet.get(slot).is_none() {
            let known = sheet.slots().collect::<Vec<_>>().join(", ");
            bail!("unknown slot '{}' (available: {})", slot, known);
        }
    }

    let renderer = StyleSheetRenderer::from_config(&config);
    let options = StyleOptions::new(&renderer, &tokens).with_rtl(args.rtl);

    let mut output = String::new();
    for (name, definitions) in sheet.into_slots() {
        if args.slot.as_deref().is_some_and(|wanted| wanted != name) {
            continue;
        }
        let classes = make_styles(definitions).class_name(&state, &options);
        writeln!(output, "{}: {}", name, classes)?;
    }

    info!(rules = renderer.len(), "compiled style sheet");
    writeln!(output)?;
    if !renderer.is_empty() {
        writeln!(output, "{}", renderer.css_text())?;
    }
    Ok(output)
}
