mod logging;

use appgraph::{IngestClient, IngestConfig, LayoutConfig, RankDir, RawGraph};
use appgraph_core::config::{API_TIMEOUT_VAR, API_URL_VAR, parse_base_url, parse_timeout_secs};
use serde::Serialize;
use std::io::{Read, Write};
use std::time::Duration;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Ingest(appgraph_core::Error),
    Layout(appgraph_render::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Ingest(err) => write!(f, "{err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl CliError {
    fn is_empty_result(&self) -> bool {
        matches!(self, CliError::Ingest(err) if err.is_empty_result())
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<appgraph_core::Error> for CliError {
    fn from(value: appgraph_core::Error) -> Self {
        Self::Ingest(value)
    }
}

impl From<appgraph_render::Error> for CliError {
    fn from(value: appgraph_render::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<appgraph::Error> for CliError {
    fn from(value: appgraph::Error) -> Self {
        match value {
            appgraph::Error::Ingest(err) => Self::Ingest(err),
            appgraph::Error::Layout(err) => Self::Layout(err),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    Fetch,
    Layout,
    #[default]
    Render,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    url: Option<String>,
    timeout: Option<Duration>,
    input: Option<String>,
    layout: LayoutConfig,
    pretty: bool,
    log_level: Option<String>,
}

fn usage() -> &'static str {
    "appgraph-cli\n\
\n\
USAGE:\n\
  appgraph-cli fetch [--url <base>] [--timeout <secs>] [--input <path>|-] [--pretty]\n\
  appgraph-cli layout [OPTIONS]\n\
  appgraph-cli [render] [OPTIONS]\n\
\n\
OPTIONS:\n\
  --url <base>          API base URL (default: $ALPHA_API_URL or http://localhost:8001)\n\
  --timeout <secs>      request timeout (default: $ALPHA_API_TIMEOUT_SECS or 10)\n\
  --input <path>|-      read a /graphs document from a file or stdin instead of HTTP\n\
  --direction <dir>     LR|RL|TB|BT (default: LR)\n\
  --node-width <n>      node size across the flow (default: 180)\n\
  --node-height <n>     node size along the flow (default: 80)\n\
  --lane-sep <n>        gap between nodes of one rank (default: 120)\n\
  --rank-sep <n>        gap between ranks (default: 100)\n\
  --pretty              pretty-print JSON output\n\
  --log-level <filter>  tracing filter for stderr logs (default: $APPGRAPH_LOG or warn)\n\
\n\
NOTES:\n\
  - fetch prints the first raw graph, layout prints positions in the flow's frame,\n\
    render prints the node/edge objects a canvas draws.\n\
  - Exit codes: 1 on failure, 2 on bad usage, 3 when the response holds no graphs.\n\
"
}

fn parse_dimension(value: Option<&String>) -> Result<f64, CliError> {
    let Some(raw) = value else {
        return Err(CliError::Usage(usage()));
    };
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !(v.is_finite() && v >= 0.0) {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "fetch" => args.command = Command::Fetch,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--url" => {
                let Some(url) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                parse_base_url(url).map_err(|_| CliError::Usage(usage()))?;
                args.url = Some(url.clone());
            }
            "--timeout" => {
                let Some(secs) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let timeout = parse_timeout_secs(secs).map_err(|_| CliError::Usage(usage()))?;
                args.timeout = Some(timeout);
            }
            "--input" => {
                let Some(input) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.input = Some(input.clone());
            }
            "--direction" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.layout.direction = dir
                    .parse::<RankDir>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--node-width" => args.layout.node_width = parse_dimension(it.next())?,
            "--node-height" => args.layout.node_height = parse_dimension(it.next())?,
            "--lane-sep" => args.layout.lane_sep = parse_dimension(it.next())?,
            "--rank-sep" => args.layout.rank_sep = parse_dimension(it.next())?,
            "--log-level" => {
                let Some(level) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.log_level = Some(level.clone());
            }
            _ => return Err(CliError::Usage(usage())),
        }
    }
    Ok(args)
}

fn read_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(input)?)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn ingest_config(args: &Args) -> Result<IngestConfig, CliError> {
    resolve_ingest_config(args, |key| std::env::var(key).ok())
}

/// Flags win over `lookup`: a key set on the command line is never read, so a bad value for it
/// in the environment cannot fail the run.
fn resolve_ingest_config(
    args: &Args,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<IngestConfig, CliError> {
    let config = IngestConfig::from_lookup(|key| match key {
        API_URL_VAR if args.url.is_some() => args.url.clone(),
        API_TIMEOUT_VAR if args.timeout.is_some() => None,
        _ => lookup(key),
    })?;
    Ok(match args.timeout {
        Some(timeout) => config.with_timeout(timeout),
        None => config,
    })
}

fn fetch_raw(args: &Args) -> Result<RawGraph, CliError> {
    if let Some(input) = args.input.as_deref() {
        let body = read_input(input)?;
        let source = if input == "-" { "<stdin>" } else { input };
        tracing::info!(source, "reading graphs document");
        return Ok(appgraph::parse_response(&body)?.into_first(source)?);
    }

    let client = IngestClient::new(ingest_config(args)?)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(client.fetch_first())?)
}

fn run(args: Args) -> Result<(), CliError> {
    let raw = fetch_raw(&args)?;
    match args.command {
        Command::Fetch => write_json(&raw, args.pretty),
        Command::Layout => {
            let graph = appgraph::build_graph(raw)?;
            let layout = appgraph::layout_graph(&graph, &args.layout)?;
            write_json(&layout, args.pretty)
        }
        Command::Render => {
            let graph = appgraph::build_graph(raw)?;
            let rendered = appgraph::render_graph(&graph, &args.layout)?;
            write_json(&rendered, args.pretty)
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if !logging::init_logging(args.log_level.as_deref()) {
        eprintln!("{}", usage());
        std::process::exit(2);
    }

    match run(args) {
        Ok(()) => {}
        Err(err) if err.is_empty_result() => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
