//! CLI binary for clipfmt.
//!
//! A thin shim over the library crate that maps CLI flags to `FormatConfig`,
//! reads the selection from a file or stdin and prints the result.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clipfmt::{
    format_file, mark_done_file, write_output, ClipFmtError, ClipboardPayload, FormatConfig,
    InputSource, ScriptTarget,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Format the clipboard (macOS)
  pbpaste | clipfmt format | pbcopy

  # Format a file in place of stdin, write to another file
  clipfmt format notes.txt -o notes.md

  # Keep Simplified characters, no CJK spacing
  clipfmt format --script keep --no-spacing notes.txt

  # Rich-text paste: pass the HTML flavour, print the HTML to use
  clipfmt format --html-input sel.html --html sel.txt

  # Full payload as JSON (text, html, kind)
  clipfmt format --json sel.txt

  # Mark every line done
  pbpaste | clipfmt mark-done | pbcopy

SCRIPT TARGETS:
  tw     Traditional, Taiwan phrasing (default)
  hant   Traditional
  hk     Traditional, Hong Kong phrasing
  keep   no conversion

ENVIRONMENT VARIABLES:
  CLIPFMT_SCRIPT             Script target (tw, hant, hk, keep)
  CLIPFMT_NO_SPACING         Disable CJK spacing
  CLIPFMT_NO_PUNCTUATION     Disable full-width punctuation
  CLIPFMT_NO_SOURCE_FOOTER   Keep a trailing URL as is
  CLIPFMT_INDENT             Continuation indent (1-8)
  CLIPFMT_DONE_MARKER        Prefix used by mark-done
  RUST_LOG                   Overrides -v / -q log filtering
"#;

/// Reformat pasted CJK text into clean Markdown.
#[derive(Parser, Debug)]
#[command(
    name = "clipfmt",
    version,
    about = "Reformat pasted CJK text into clean Markdown",
    long_about = "Reformat text copied from chat apps, web pages and PDFs: Simplified to \
Traditional Chinese, CJK/Latin spacing, full-width punctuation, one ordered-list notation, \
paragraph reflow and a source footer for a trailing URL.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    style: StyleArgs,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "CLIPFMT_VERBOSE")]
    verbose: bool,

    /// Suppress notices; only errors are printed.
    #[arg(short, long, global = true, env = "CLIPFMT_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full formatting pipeline.
    Format(FormatArgs),
    /// Prefix every non-empty line with the done marker.
    MarkDone(IoArgs),
}

#[derive(Args, Debug)]
struct IoArgs {
    /// Input text file; `-` or omitted reads stdin.
    input: Option<String>,

    /// Write the result to this file instead of stdout.
    #[arg(short, long, env = "CLIPFMT_OUTPUT")]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FormatArgs {
    #[command(flatten)]
    io: IoArgs,

    /// HTML flavour of the same selection (link text is reformatted in place).
    #[arg(long, value_name = "FILE")]
    html_input: Option<PathBuf>,

    /// Print the HTML flavour instead of the plain text when one is produced.
    #[arg(long, conflicts_with = "json")]
    html: bool,

    /// Print the full payload (text, html, kind) as JSON.
    #[arg(long, env = "CLIPFMT_JSON")]
    json: bool,
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Target script: tw, hant, hk, keep.
    #[arg(long, global = true, env = "CLIPFMT_SCRIPT", default_value = "tw",
          value_parser = parse_script)]
    script: ScriptTarget,

    /// Do not insert spaces between CJK and Latin text.
    #[arg(long, global = true, env = "CLIPFMT_NO_SPACING")]
    no_spacing: bool,

    /// Keep half-width punctuation.
    #[arg(long, global = true, env = "CLIPFMT_NO_PUNCTUATION")]
    no_punctuation: bool,

    /// Leave a trailing URL where it is.
    #[arg(long, global = true, env = "CLIPFMT_NO_SOURCE_FOOTER")]
    no_source_footer: bool,

    /// Spaces before continuation lines of an ordered list (1–8).
    #[arg(long, global = true, env = "CLIPFMT_INDENT", default_value_t = 3,
          value_parser = clap::value_parser!(u8).range(1..=8))]
    indent: u8,

    /// Prefix used by mark-done.
    #[arg(long, global = true, env = "CLIPFMT_DONE_MARKER", default_value = "✅")]
    done_marker: String,
}

fn parse_script(s: &str) -> Result<ScriptTarget, String> {
    ScriptTarget::parse(s).ok_or_else(|| format!("unknown script '{s}' (use tw, hant, hk or keep)"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<ClipFmtError>() {
            Some(ClipFmtError::EmptyInput) => {
                if !cli.quiet {
                    eprintln!("{}", ClipFmtError::EmptyInput);
                }
                ExitCode::SUCCESS
            }
            _ => {
                error!("{e:#}");
                eprintln!("Error: Could not process text");
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = build_config(&cli.style)?;

    match &cli.command {
        Command::Format(args) => {
            let source = InputSource::from_arg(args.io.input.as_deref());
            let payload = format_file(&source, args.html_input.as_deref(), None, &config)
                .await
                .context("Formatting failed")?;

            let rendered = render_payload(&payload, args)?;
            emit(&rendered, args.io.output.as_deref()).await?;
        }
        Command::MarkDone(io_args) => {
            let source = InputSource::from_arg(io_args.input.as_deref());
            let marked = mark_done_file(&source, None, &config)
                .await
                .context("Marking lines done failed")?;
            emit(&marked, io_args.output.as_deref()).await?;
        }
    }

    if !cli.quiet {
        eprintln!("✔ Done");
    }
    Ok(())
}

/// Map CLI args to `FormatConfig`.
fn build_config(style: &StyleArgs) -> Result<FormatConfig> {
    FormatConfig::builder()
        .script(style.script)
        .cjk_spacing(!style.no_spacing)
        .fullwidth_punctuation(!style.no_punctuation)
        .source_footer(!style.no_source_footer)
        .continuation_indent(usize::from(style.indent))
        .done_marker(style.done_marker.clone())
        .build()
        .context("Invalid configuration")
}

fn render_payload(payload: &ClipboardPayload, args: &FormatArgs) -> Result<String> {
    if args.json {
        serde_json::to_string_pretty(payload).context("Failed to serialise payload")
    } else if args.html {
        Ok(payload.preferred().to_string())
    } else {
        Ok(payload.text.clone())
    }
}

async fn emit(contents: &str, output: Option<&std::path::Path>) -> Result<()> {
    if let Some(path) = output {
        return write_output(path, contents)
            .await
            .with_context(|| format!("Failed to write {}", path.display()));
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(contents.as_bytes())
        .context("Failed to write to stdout")?;
    // Ensure a trailing newline on stdout.
    if !contents.ends_with('\n') {
        handle.write_all(b"\n").ok();
    }
    Ok(())
}
