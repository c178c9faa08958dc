use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use log::LevelFilter;
use mdgraphextract_config::Config;
use mdgraphextract_engine::{
    AutographOptions, Encoding, ExtractOptions, GraphMode, InputSource, MdParser, extract,
    extract_to, graph_path_for, read_file, scan_markdown_files, write_file,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Extract Graphviz graphs from Markdown documents
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Markdown files or directories; standard input when omitted
    inputs: Vec<PathBuf>,

    /// Graph strategy: auto (headlines and links) or dotex (comment directives)
    #[arg(long)]
    mode: Option<GraphMode>,

    /// Input encoding (utf8, latin1)
    #[arg(long)]
    encoding: Option<Encoding>,

    /// Prefix for generated URL attributes, e.g. the rendered HTML file
    #[arg(long)]
    ref_prefix: Option<String>,

    /// Do not generate URL attributes for headline nodes
    #[arg(long, action = ArgAction::SetTrue)]
    no_auto_refs: bool,

    /// Headline level to include as nodes (repeatable)
    #[arg(long = "level", value_name = "LEVEL")]
    levels: Vec<u8>,

    /// Drop edges to headlines outside the selected levels
    #[arg(long, action = ArgAction::SetTrue)]
    strict_level: bool,

    /// Emit selected headlines that have no edges
    #[arg(long, action = ArgAction::SetTrue)]
    isolated_nodes: bool,

    /// Keep edges whose target is not a headline
    #[arg(long, action = ArgAction::SetTrue)]
    implicit_nodes: bool,

    /// Bold level 1 and italic level 2 node labels
    #[arg(long, action = ArgAction::SetTrue)]
    level_format: bool,

    /// Dotex tag group to include (repeatable)
    #[arg(long = "group", value_name = "TAG")]
    groups: Vec<String>,

    /// Directory for generated .gv files
    #[arg(long, short)]
    output_dir: Option<PathBuf>,

    /// Write graphs to standard output instead of .gv files
    #[arg(long, action = ArgAction::SetTrue)]
    stdout: bool,

    /// Print the structural events as JSON lines instead of a graph
    #[arg(long, action = ArgAction::SetTrue)]
    events: bool,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, short, action = ArgAction::SetTrue)]
    verbose: bool,
}

impl Cli {
    /// Flags win over the config file, which wins over built-in defaults.
    fn extract_options(&self, config: &Config) -> Result<ExtractOptions> {
        let mode = match (self.mode, &config.mode) {
            (Some(mode), _) => mode,
            (None, Some(name)) => name
                .parse()
                .with_context(|| format!("Invalid mode in config: {name}"))?,
            (None, None) => GraphMode::default(),
        };
        let encoding = match (self.encoding, &config.encoding) {
            (Some(encoding), _) => encoding,
            (None, Some(label)) => label
                .parse()
                .with_context(|| format!("Invalid encoding in config: {label}"))?,
            (None, None) => Encoding::default(),
        };

        Ok(ExtractOptions {
            mode,
            encoding,
            ref_prefix: self
                .ref_prefix
                .clone()
                .or_else(|| config.ref_prefix.clone())
                .unwrap_or_default(),
            no_auto_refs: self.no_auto_refs || config.no_auto_refs,
            autograph: AutographOptions {
                levels: prefer(&self.levels, &config.autograph_levels),
                level_strict: self.strict_level || config.autograph_level_strict,
                isolated_nodes: self.isolated_nodes || config.autograph_isolated_nodes,
                implicit_nodes: self.implicit_nodes || config.autograph_implicit_nodes,
                level_format: self.level_format || config.level_format,
            },
            groups: prefer(&self.groups, &config.groups),
        })
    }
}

fn prefer<T: Clone>(flags: &[T], configured: &[T]) -> Vec<T> {
    if flags.is_empty() {
        configured.to_vec()
    } else {
        flags.to_vec()
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => match Config::load_from_path(path)? {
            Some(config) => Ok(config),
            None => bail!("Config file not found: {}", path.display()),
        },
        None => Ok(Config::load()?.unwrap_or_default()),
    }
}

/// Expands directory arguments into the markdown files below them.
fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(scan_markdown_files(input)?);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn print_events<W: Write>(source: InputSource, out: &mut W) -> Result<()> {
    for event in MdParser::new(Some(source))? {
        serde_json::to_writer(&mut *out, &event?)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn process_file(
    cli: &Cli,
    opts: &ExtractOptions,
    path: &Path,
    output_dir: Option<&Path>,
) -> Result<()> {
    let source = opts.bytes_source(read_file(path)?);
    let mut stdout = io::stdout().lock();

    if cli.events {
        return print_events(source, &mut stdout)
            .with_context(|| format!("Failed to parse {}", path.display()));
    }
    if cli.stdout {
        return extract_to(Some(source), opts, &mut stdout)
            .with_context(|| format!("Failed to extract graph from {}", path.display()));
    }

    let graph = extract(Some(source), opts)
        .with_context(|| format!("Failed to extract graph from {}", path.display()))?;
    let target = graph_path_for(path, output_dir);
    write_file(&target, &graph)?;
    log::info!("Wrote {}", target.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init();

    let config = load_config(cli.config.as_deref())?;
    let opts = cli.extract_options(&config)?;
    log::debug!("Extracting with {opts:?}");

    if cli.inputs.is_empty() {
        let source = opts.stream_source(io::stdin());
        let mut stdout = io::stdout().lock();
        if cli.events {
            return print_events(source, &mut stdout);
        }
        extract_to(Some(source), &opts, &mut stdout)?;
        return Ok(());
    }

    let output_dir = cli.output_dir.clone().or(config.output_dir);
    for path in collect_inputs(&cli.inputs)? {
        process_file(&cli, &opts, &path, output_dir.as_deref())?;
    }
    Ok(())
}
