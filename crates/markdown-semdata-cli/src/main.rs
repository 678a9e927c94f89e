use anyhow::{Context, Result, bail};
use markdown_semdata_config::Config;
use markdown_semdata_engine::{
    DefaultBuilder, PropertyTagBuilder, SemanticDataOptions, SemanticDataProcessor, to_html,
};
use std::{
    env, io,
    path::{Path, PathBuf},
    process,
};

const USAGE: &str = "[--config PATH] [--namespace NS] [--list] FILE|GLOB...";

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    config: Option<PathBuf>,
    namespace: Option<String>,
    list: bool,
    inputs: Vec<String>,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--namespace" | "-n" => {
                parsed.namespace = Some(args.next().context("--namespace needs a value")?);
            }
            "--list" | "-l" => parsed.list = true,
            flag if flag.starts_with('-') && flag.len() > 1 => bail!("unknown option {flag}"),
            _ => parsed.inputs.push(arg),
        }
    }

    if parsed.inputs.is_empty() {
        bail!("no input files");
    }
    Ok(parsed)
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("config file {} not found", path.display())),
        None => {
            let config = Config::load()?;
            if config.is_none() {
                log::debug!(
                    "no config at {}, using defaults",
                    Config::config_path().display()
                );
            }
            Ok(config.unwrap_or_default())
        }
    }
}

fn build_processor(config: &Config, namespace: Option<&str>) -> Result<SemanticDataProcessor> {
    let (start, end) = config.delimiter_pair()?;
    let namespace = namespace.unwrap_or(&config.default_namespace);
    let options = SemanticDataOptions::default().with_namespace(namespace);
    let options = if config.literal_delimiters {
        options.with_literal_delimiters(start, end)
    } else {
        options.with_delimiters(start, end)
    };

    let builder = config.tags.iter().fold(
        PropertyTagBuilder::new(DefaultBuilder::with_tag(config.tag.as_str())),
        |builder, (property, tag)| builder.with_property_tag(property.as_str(), tag.as_str()),
    );

    Ok(SemanticDataProcessor::with_builder(options, builder)?)
}

/// Where a document comes from.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn name(&self) -> String {
        match self {
            Input::Stdin => "<stdin>".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            Input::Stdin => io::read_to_string(io::stdin()).context("failed to read stdin"),
            Input::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
        }
    }
}

/// Expands each input as a glob; a pattern that matches nothing is an error.
/// `-` stands for standard input.
fn expand_inputs(inputs: &[String]) -> Result<Vec<Input>> {
    let mut files = Vec::new();
    for input in inputs {
        if input == "-" {
            files.push(Input::Stdin);
            continue;
        }
        let before = files.len();
        for entry in glob::glob(input).with_context(|| format!("invalid pattern {input}"))? {
            files.push(Input::File(entry?));
        }
        if files.len() == before {
            bail!("{input}: no such file");
        }
    }
    Ok(files)
}

/// One line per occurrence: `name:start..end`, then tab-separated fields.
fn list_occurrences(name: &str, text: &str, processor: &SemanticDataProcessor) -> String {
    let mut out = String::new();
    for raw in processor.pattern().find_iter(text, 0) {
        let fields = processor.resolve(&raw);
        out.push_str(&format!(
            "{name}:{}\tproperty={}",
            raw.span,
            fields.qualified_property()
        ));
        if let Some(type_qname) = fields.qualified_type() {
            out.push_str(&format!("\ttypeof={type_qname}"));
        }
        out.push_str(&format!("\tcontent={}", fields.content));
        if let Some(label) = &fields.label {
            out.push_str(&format!("\tlabel={label}"));
        }
        out.push('\n');
    }
    out
}

/// Renders one input, or lists its occurrences.
fn convert(input: &Input, processor: &SemanticDataProcessor, list: bool) -> Result<String> {
    let text = input.read()?;
    log::info!("processing {}", input.name());

    if list {
        Ok(list_occurrences(&input.name(), &text, processor))
    } else {
        to_html(&text, processor).with_context(|| format!("failed to render {}", input.name()))
    }
}

fn run(args: CliArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let processor = build_processor(&config, args.namespace.as_deref())?;
    log::debug!("using {processor:?}");

    for input in expand_inputs(&args.inputs)? {
        print!("{}", convert(&input, &processor, args.list)?);
    }
    Ok(())
}

fn logger() -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(log::LevelFilter::Info);
    builder
}

fn main() -> Result<()> {
    logger().init();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "markdown-semdata-cli".to_string());

    let args = match parse_args(args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Usage: {program} {USAGE}");
            eprintln!("Config file: {}", Config::config_path().display());
            process::exit(1);
        }
    };

    run(args)
}
