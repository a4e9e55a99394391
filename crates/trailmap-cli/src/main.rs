use serde::Serialize;
use std::io::Read;
use trailmap::{
    AnchorPair, DEFAULT_VIEWPORT_BREAKPOINT, DiagramSession, Direction, LayoutOptions, LayoutReport,
};
use trailmap_graph::RoadmapDocument;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Trailmap(trailmap::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Trailmap(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<trailmap::Error> for CliError {
    fn from(value: trailmap::Error) -> Self {
        Self::Trailmap(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Command {
    #[default]
    Layout,
    Anchors,
    Check,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    direction: Option<Direction>,
    viewport_width: Option<f64>,
    config: Option<String>,
}

impl Args {
    /// An explicit `--direction` wins over the viewport breakpoint.
    fn direction(&self) -> Direction {
        match (self.direction, self.viewport_width) {
            (Some(d), _) => d,
            (None, Some(w)) => Direction::for_viewport_width(w, DEFAULT_VIEWPORT_BREAKPOINT),
            (None, None) => Direction::default(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EdgeOut<'a> {
    edge_id: &'a str,
    anchors: Option<AnchorPair>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnchorsOut<'a> {
    direction: Direction,
    width: f64,
    height: f64,
    edges: Vec<EdgeOut<'a>>,
    report: &'a LayoutReport,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckOut<'a> {
    id: &'a str,
    nodes: usize,
    edges: usize,
}

fn usage() -> &'static str {
    "trailmap-cli\n\
\n\
USAGE:\n\
  trailmap-cli [layout] [--direction tb|lr] [--viewport-width <w>] [--config <path>] [--pretty] [<path>|-]\n\
  trailmap-cli anchors [--direction tb|lr] [--viewport-width <w>] [--config <path>] [--pretty] [<path>|-]\n\
  trailmap-cli check [--config <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the roadmap JSON document is read from stdin.\n\
  - Without --direction, --viewport-width picks TB below 768 and LR otherwise; the default is TB.\n\
  - --config reads layout options (nodeSeparation, rankSeparation, orderPasses, rankAlignment, groupPadding).\n\
  - check exits non-zero on duplicate ids, dangling edges or bad parents.\n\
  - Set RUST_LOG (e.g. RUST_LOG=trailmap=debug) to see repairs applied during layout.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "anchors" => args.command = Command::Anchors,
            "check" => args.command = Command::Check,
            "--pretty" => args.pretty = true,
            "--direction" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.direction = Some(
                    dir.parse::<Direction>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--viewport-width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let w = w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(w.is_finite() && w >= 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.viewport_width = Some(w);
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn read_options(path: Option<&str>) -> Result<LayoutOptions, CliError> {
    match path {
        None => Ok(LayoutOptions::default()),
        Some(path) => Ok(LayoutOptions::from_json(&std::fs::read_to_string(path)?)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    std::io::Write::write_all(&mut out, b"\n")?;
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let doc: RoadmapDocument = trailmap::load_document(&text)?;
    let options = read_options(args.config.as_deref())?;
    let direction = args.direction();
    tracing::debug!(
        id = %doc.id,
        nodes = doc.graph.nodes.len(),
        edges = doc.graph.edges.len(),
        ?direction,
        "loaded roadmap"
    );

    match args.command {
        Command::Check => {
            trailmap::validate(&doc.graph)?;
            let out = CheckOut {
                id: &doc.id,
                nodes: doc.graph.nodes.len(),
                edges: doc.graph.edges.len(),
            };
            write_json(&out, args.pretty)
        }
        Command::Layout => {
            let result = trailmap::layout(&doc.graph, direction, &options);
            write_json(&result, args.pretty)
        }
        Command::Anchors => {
            let mut session = DiagramSession::new(doc.graph, direction, options);
            session.ensure_layout();
            let Some(result) = session.layout() else {
                return Ok(());
            };
            let out = AnchorsOut {
                direction,
                width: result.width,
                height: result.height,
                edges: session
                    .anchors()
                    .into_iter()
                    .map(|a| EdgeOut {
                        edge_id: a.edge_id,
                        anchors: a.anchors,
                    })
                    .collect(),
                report: &result.report,
            };
            write_json(&out, args.pretty)
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

    init_tracing();

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
