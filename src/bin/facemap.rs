use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "facemap", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the face defines and `nextFaces` transition table.
    Mapping(MappingArgs),
    /// Write the packed `allFaces` bitmap table.
    Bitmaps(BitmapArgs),
    /// Render both headers, then write them.
    Export(ExportArgs),
    /// Draw a link between two faces of a saved graph document.
    Link(LinkArgs),
    /// Print the transitions encoded in a mapping header.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct MappingArgs {
    /// Project JSON.
    #[arg(long)]
    project: PathBuf,

    /// Output header path (defaults to the project's `mapping_out`).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BitmapArgs {
    /// Project JSON.
    #[arg(long)]
    project: PathBuf,

    /// Output header path (defaults to the project's `bitmap_out`).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Decode faces one at a time.
    #[arg(long, default_value_t = false)]
    serial: bool,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Project JSON.
    #[arg(long)]
    project: PathBuf,

    /// Mapping header path (defaults to the project's `mapping_out`).
    #[arg(long)]
    mapping_out: Option<PathBuf>,

    /// Bitmap header path (defaults to the project's `bitmap_out`).
    #[arg(long)]
    bitmap_out: Option<PathBuf>,

    /// Also write both tables into a single header.
    #[arg(long)]
    combined: Option<PathBuf>,

    /// Decode faces one at a time.
    #[arg(long, default_value_t = false)]
    serial: bool,
}

#[derive(Parser, Debug)]
struct LinkArgs {
    /// Graph document JSON.
    #[arg(long)]
    graph: PathBuf,

    /// Origin face name.
    #[arg(long)]
    from: String,

    /// Destination face name.
    #[arg(long)]
    to: String,

    /// Where to save the updated document (defaults to overwriting `--graph`).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Mapping (or combined) header to read.
    #[arg(long)]
    header: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Mapping(args) => cmd_mapping(args),
        Command::Bitmaps(args) => cmd_bitmaps(args),
        Command::Export(args) => cmd_export(args),
        Command::Link(args) => cmd_link(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_project(path: &Path) -> anyhow::Result<(facemap::Project, facemap::FaceGraph)> {
    let project = facemap::Project::from_path(path)?;
    let graph = project
        .face_graph()
        .with_context(|| format!("load faces for project '{}'", path.display()))?;
    Ok((project, graph))
}

fn pack_opts(project: &facemap::Project, serial: bool) -> facemap::PackOpts {
    let mut opts = project.pack_opts();
    if serial {
        opts.parallel = false;
    }
    opts
}

fn write(path: &Path, text: &str) -> anyhow::Result<()> {
    facemap::write_output(path, text)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_mapping(args: MappingArgs) -> anyhow::Result<()> {
    let (project, graph) = load_project(&args.project)?;
    let out = args
        .out
        .or_else(|| project.mapping_out())
        .context("no output path: pass --out or set mapping_out in the project")?;

    let text = facemap::export_mapping(&graph)?;
    write(&out, &text)
}

fn cmd_bitmaps(args: BitmapArgs) -> anyhow::Result<()> {
    let (project, graph) = load_project(&args.project)?;
    let out = args
        .out
        .or_else(|| project.bitmap_out())
        .context("no output path: pass --out or set bitmap_out in the project")?;

    let text = facemap::export_bitmaps(&graph, project.root(), pack_opts(&project, args.serial))?;
    write(&out, &text)
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let (project, graph) = load_project(&args.project)?;
    let mapping_out = args.mapping_out.or_else(|| project.mapping_out());
    let bitmap_out = args.bitmap_out.or_else(|| project.bitmap_out());
    if mapping_out.is_none() && bitmap_out.is_none() && args.combined.is_none() {
        anyhow::bail!("no output paths: pass --mapping-out, --bitmap-out or --combined");
    }

    // Render everything first, then stage and swap the files in together.
    let output = facemap::export_all(&graph, project.root(), pack_opts(&project, args.serial))?;
    let mut rendered: Vec<(PathBuf, String)> = Vec::new();
    if let Some(path) = mapping_out {
        rendered.push((path, output.mapping_header()));
    }
    if let Some(path) = bitmap_out {
        rendered.push((path, output.bitmap_header()));
    }
    if let Some(path) = args.combined {
        rendered.push((path, output.combined_header()));
    }

    let outputs: Vec<(&Path, &str)> = rendered
        .iter()
        .map(|(path, text)| (path.as_path(), text.as_str()))
        .collect();
    facemap::write_outputs(&outputs)?;
    for (path, _) in &outputs {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_link(args: LinkArgs) -> anyhow::Result<()> {
    let mut doc = facemap::GraphDocument::from_path(&args.graph)?;
    doc.draw_link(&args.from, &args.to)?;

    let out = args.out.unwrap_or(args.graph);
    doc.save(&out)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.header)
        .with_context(|| format!("read header '{}'", args.header.display()))?;
    let table = facemap::parse_mapping_header(&text)?;

    println!(
        "{} faces, {} links per row",
        table.face_count(),
        table.max_links()
    );
    for (index, (symbol, targets)) in table.symbols().iter().zip(table.rows()).enumerate() {
        let targets: Vec<&str> = targets
            .iter()
            .map(String::as_str)
            .filter(|t| *t != facemap::INVALID_FACE)
            .collect();
        if targets.is_empty() {
            println!("{index:>3} {symbol}: (none)");
        } else {
            println!("{index:>3} {symbol}: {}", targets.join(", "));
        }
    }
    Ok(())
}
