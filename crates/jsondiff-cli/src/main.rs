//! Command-line front end for the `jsondiff` engine.
//!
//! Reads two JSON (or YAML) documents, compares them structurally, and
//! prints either the annotated tree, the derived patch, or the raw diff tree
//! as JSON. Exit status follows `diff(1)`: 0 when the inputs are equal, 1
//! when they differ, 2 on error.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use jsondiff_core::{build_patch, compare, DiffOptions, Node, RenderConfig};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Tolerance used when neither `--epsilon` nor `--opts` is given.
const DEFAULT_EPSILON: f64 = 1e-9;
/// Largest accepted input, in bytes.
const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;
/// Deepest accepted container nesting.
const DEFAULT_MAX_DEPTH: usize = 128;
/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "JSONDIFF_LOG";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    /// One line per node: state and path.
    #[default]
    Tree,
    /// add/remove/replace operations as a JSON array.
    Patch,
    /// The full diff tree as JSON.
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "jsondiff",
    version,
    about = "Compare two JSON or YAML documents structurally.",
    after_help = "Reads FILE2 from STDIN when it is omitted.\n\
                  Exit status is 0 if inputs are equal, 1 if they differ, 2 on error."
)]
struct Cli {
    /// Output format.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Tree)]
    format: OutputFormat,

    /// Maximum absolute difference for numbers to be equal. Negative or
    /// non-numeric values are treated as 0.
    #[arg(long = "epsilon", allow_hyphen_values = true)]
    epsilon: Option<String>,

    /// Visit object keys in code-point order instead of first-seen order.
    #[arg(long = "key-sort", action = ArgAction::SetTrue)]
    key_sort: bool,

    /// Diff options as a JSON object, e.g. '{"epsilon":1e-6,"keySort":true}'.
    /// Explicit flags take precedence.
    #[arg(long = "opts")]
    opts: Option<String>,

    /// Hide equal nodes in tree output.
    #[arg(long = "only-diff", action = ArgAction::SetTrue)]
    only_diff: bool,

    /// Show only nodes whose path contains this text (tree output).
    #[arg(short = 'q', long = "query")]
    query: Option<String>,

    /// Print added/removed/changed counts to STDERR.
    #[arg(long = "summary", action = ArgAction::SetTrue)]
    summary: bool,

    /// Render tree output using ANSI colors.
    #[arg(long = "color", action = ArgAction::SetTrue)]
    color: bool,

    /// Read inputs as YAML instead of JSON.
    #[arg(long = "yaml", action = ArgAction::SetTrue)]
    yaml: bool,

    /// Write output to FILE instead of STDOUT.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Reject inputs larger than this many bytes.
    #[arg(long = "max-bytes", default_value_t = DEFAULT_MAX_BYTES)]
    max_bytes: u64,

    /// Reject inputs nested deeper than this many containers.
    #[arg(long = "max-depth", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Positional inputs (FILE1 \[FILE2]).
    #[arg(value_name = "FILE", required = true, num_args = 1..=2)]
    inputs: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let _ = writeln!(io::stderr(), "jsondiff: {err:#}");
            std::process::exit(2);
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli) -> Result<i32> {
    let (first, second) = match cli.inputs.as_slice() {
        [lhs] => (InputSource::File(lhs.clone()), InputSource::Stdin),
        [lhs, rhs] => (InputSource::File(lhs.clone()), InputSource::File(rhs.clone())),
        _ => bail!("expected one or two input files"),
    };

    let options = build_options(cli)?;
    let lhs = load_node(&first, cli).context("failed to load first input")?;
    let rhs = load_node(&second, cli).context("failed to load second input")?;

    info!(epsilon = options.epsilon(), key_sort = options.key_sort(), "comparing inputs");
    let root = compare(&lhs, &rhs, &options);
    let summary = root.summary();
    debug!(%summary, "comparison finished");

    let mut rendered = match cli.format {
        OutputFormat::Tree => {
            let config = RenderConfig::new()
                .with_color(cli.color)
                .with_only_changes(cli.only_diff)
                .with_query(cli.query.clone().unwrap_or_default());
            root.render(&config)
        }
        OutputFormat::Patch => {
            build_patch(&root).to_json_pretty().context("failed to render patch")?
        }
        OutputFormat::Json => root.to_json_pretty().context("failed to render diff tree")?,
    };
    if !rendered.is_empty() && !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    if let Some(path) = &cli.output {
        fs::write(path, rendered.as_bytes())
            .with_context(|| format!("failed to write output to {}", path.display()))?;
    } else {
        print!("{rendered}");
        io::stdout().flush().ok();
    }

    if cli.summary {
        eprintln!("{summary}");
    }

    Ok(if root.is_equal() { 0 } else { 1 })
}

#[derive(Debug)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Stdin => "<stdin>".to_string(),
        }
    }
}

fn load_node(source: &InputSource, cli: &Cli) -> Result<Node> {
    let text = read_input(source, cli.max_bytes)?;
    debug!(source = %source.describe(), bytes = text.len(), "read input");
    let node = parse_node(&text, cli.yaml)?;
    let depth = node.depth();
    if depth > cli.max_depth {
        bail!(
            "{} is nested {depth} levels deep; the limit is {}",
            source.describe(),
            cli.max_depth
        );
    }
    Ok(node)
}

fn read_input(source: &InputSource, max_bytes: u64) -> Result<String> {
    match source {
        InputSource::File(path) => {
            check_file_size(path, max_bytes)?;
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .take(max_bytes.saturating_add(1))
                .read_to_string(&mut buffer)
                .context("failed to read STDIN")?;
            if buffer.len() as u64 > max_bytes {
                bail!("<stdin> exceeds the {max_bytes} byte limit");
            }
            Ok(buffer)
        }
    }
}

fn check_file_size(path: &Path, max_bytes: u64) -> Result<()> {
    let metadata =
        fs::metadata(path).with_context(|| format!("failed to read {}", path.display()))?;
    if metadata.len() > max_bytes {
        bail!("{} is {} bytes; the limit is {max_bytes}", path.display(), metadata.len());
    }
    Ok(())
}

fn parse_node(input: &str, yaml: bool) -> Result<Node> {
    let node = if yaml { Node::from_yaml_str(input)? } else { Node::from_json_str(input)? };
    Ok(node)
}

fn build_options(cli: &Cli) -> Result<DiffOptions> {
    let mut options = match &cli.opts {
        Some(raw) => parse_opts_json(raw)?,
        None => DiffOptions::default().with_epsilon_clamped(DEFAULT_EPSILON),
    };
    if let Some(raw) = &cli.epsilon {
        options = options.with_epsilon_clamped(parse_epsilon(raw));
    }
    if cli.key_sort {
        options = options.with_key_sort(true);
    }
    Ok(options)
}

fn parse_opts_json(raw: &str) -> Result<DiffOptions> {
    let trimmed = raw.trim();
    let options: DiffOptions = serde_json::from_str(trimmed)
        .with_context(|| format!("failed to parse --opts JSON: {trimmed}"))?;
    if let Err(err) = options.validate() {
        warn!(%err, "treating epsilon from --opts as 0");
        let epsilon = options.epsilon();
        return Ok(options.with_epsilon_clamped(epsilon));
    }
    Ok(options)
}

/// Reads an epsilon the way the tolerance field does: blank means 0, and
/// anything negative, non-finite, or unparseable is clamped to 0.
fn parse_epsilon(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        Ok(value) => {
            warn!(value, "epsilon must be finite and non-negative; using 0");
            0.0
        }
        Err(err) => {
            warn!(input = trimmed, %err, "epsilon is not a number; using 0");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["jsondiff"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("arguments parse")
    }

    #[test]
    fn epsilon_text_is_normalized() {
        assert_eq!(parse_epsilon(""), 0.0);
        assert_eq!(parse_epsilon("  1e-6 "), 1e-6);
        assert_eq!(parse_epsilon("-1"), 0.0);
        assert_eq!(parse_epsilon("inf"), 0.0);
        assert_eq!(parse_epsilon("NaN"), 0.0);
        assert_eq!(parse_epsilon("abc"), 0.0);
    }

    #[test]
    fn default_epsilon_applies_without_flags() {
        let options = build_options(&cli(&["a.json"])).unwrap();
        assert_eq!(options.epsilon(), DEFAULT_EPSILON);
        assert!(!options.key_sort());
    }

    #[test]
    fn flags_override_opts() {
        let parsed = cli(&[
            "--opts",
            r#"{"epsilon":0.5,"keySort":false}"#,
            "--epsilon",
            "0.25",
            "--key-sort",
            "a.json",
        ]);
        let options = build_options(&parsed).unwrap();
        assert_eq!(options.epsilon(), 0.25);
        assert!(options.key_sort());
    }

    #[test]
    fn opts_fill_unspecified_fields_with_library_defaults() {
        let options = build_options(&cli(&["--opts", r#"{"keySort":true}"#, "a.json"])).unwrap();
        assert_eq!(options.epsilon(), 0.0);
        assert!(options.key_sort());
    }

    #[test]
    fn negative_epsilon_in_opts_is_clamped() {
        let options = build_options(&cli(&["--opts", r#"{"epsilon":-2}"#, "a.json"])).unwrap();
        assert_eq!(options.epsilon(), 0.0);
    }

    #[test]
    fn malformed_opts_is_an_error() {
        assert!(build_options(&cli(&["--opts", "[1]", "a.json"])).is_err());
    }

    #[test]
    fn negative_epsilon_flag_is_accepted_by_parser() {
        let parsed = cli(&["--epsilon", "-1", "a.json", "b.json"]);
        assert_eq!(parsed.epsilon.as_deref(), Some("-1"));
        assert_eq!(parsed.inputs.len(), 2);
    }

    #[test]
    fn three_inputs_are_rejected() {
        assert!(Cli::try_parse_from(["jsondiff", "a", "b", "c"]).is_err());
    }

    #[test]
    fn output_format_default_is_tree() {
        assert_eq!(OutputFormat::default(), OutputFormat::Tree);
        assert_eq!(cli(&["a.json"]).format, OutputFormat::Tree);
    }
}
