//! shelf CLI: browse, filter, and sort the product catalog.

mod logging;
mod shell;

use std::error::Error;
use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use shelf_core::config::{OutputFormat, ShelfConfig};
use shelf_core::query::{QuerySpec, SortField, SortOrder};
use shelf_exec::{Event, Session};
use shelf_io::RenderOptions;
use shelf_planner::{explain, parse_yaml_query, QueryConfig};

use crate::shell::Command;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "Filterable, sortable product catalog in the terminal", long_about = None)]
struct Cli {
    /// Directory with users.json, categories.json, products.json (default: bundled data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Collation for text columns: locale | binary
    #[arg(long, global = true)]
    collation: Option<String>,

    /// Locale used by the locale collation
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the catalog table with optional filters and sort
    List {
        /// Owner name, or "all"
        #[arg(long)]
        owner: Option<String>,

        /// Case-insensitive substring of the product name
        #[arg(long)]
        search: Option<String>,

        /// Category title (repeatable; matches any)
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Sort column: id | product | category | user
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Output format: table | jsonl | csv
        #[arg(long)]
        format: Option<String>,
    },

    /// Run a YAML query document
    Query {
        /// Path to the query YAML file
        #[arg(short, long)]
        file: PathBuf,

        /// Output format (overrides the document)
        #[arg(long)]
        format: Option<String>,
    },

    /// Show the pipeline stages a query document would run (EXPLAIN)
    Explain {
        /// Path to the query YAML file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Interactive session reading commands from stdin
    Session,

    /// Load and join the dataset, reporting integrity errors
    Validate,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::List {
            owner,
            search,
            categories,
            sort,
            desc,
            format,
        } => list(
            &cli,
            owner.as_deref(),
            search.as_deref(),
            categories,
            sort.as_deref(),
            *desc,
            format.as_deref(),
        ),
        Commands::Query { file, format } => run_query(&cli, file, format.as_deref()),
        Commands::Explain { file } => explain_query(&cli, file),
        Commands::Session => run_session(&cli),
        Commands::Validate => validate(&cli),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Defaults, then `SHELF_*` env, then an optional document section, then flags.
fn build_config(cli: &Cli, doc: Option<&QueryConfig>) -> Result<ShelfConfig, Box<dyn Error>> {
    let mut cfg = ShelfConfig::from_env()?;
    if let Some(doc) = doc {
        doc.apply(&mut cfg);
    }
    apply_cli_overrides(&mut cfg, cli)?;
    Ok(cfg)
}

fn apply_cli_overrides(cfg: &mut ShelfConfig, cli: &Cli) -> Result<(), Box<dyn Error>> {
    if let Some(dir) = &cli.data_dir {
        cfg.data_dir = Some(dir.display().to_string());
    }
    if let Some(collation) = &cli.collation {
        cfg.collation = collation.parse()?;
    }
    if let Some(locale) = &cli.locale {
        cfg.locale = locale.clone();
    }
    Ok(())
}

fn render_options(
    cfg: &ShelfConfig,
    spec: &QuerySpec,
    format: Option<&str>,
) -> Result<RenderOptions, Box<dyn Error>> {
    let format: OutputFormat = match format {
        Some(f) => f.parse()?,
        None => cfg.output,
    };
    Ok(RenderOptions {
        format,
        sort: spec.sort_state(),
        no_match_message: cfg.no_match_message.clone(),
        color: format == OutputFormat::Table && io::stdout().is_terminal(),
    })
}

fn print_rows(
    session: &Session,
    spec: &QuerySpec,
    opts: &RenderOptions,
) -> Result<(), Box<dyn Error>> {
    let rows = shelf_operators::prepare_products(
        session.catalog().products(),
        spec,
        session.collation(),
    );
    shelf_io::render(io::stdout().lock(), &rows, opts)?;
    Ok(())
}

fn list(
    cli: &Cli,
    owner: Option<&str>,
    search: Option<&str>,
    categories: &[String],
    sort: Option<&str>,
    desc: bool,
    format: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let cfg = build_config(cli, None)?;
    let session = Session::from_config(&cfg)?;
    let catalog = session.catalog();

    let mut spec = QuerySpec::default().with_search(search.unwrap_or_default());
    if let Some(name) = owner {
        spec = spec.with_owner(catalog.owner_filter(name)?);
    }
    for title in categories {
        spec = spec.with_category(catalog.category_by_title(title)?.clone());
    }
    if let Some(col) = sort {
        let field: SortField = col.parse()?;
        let order = if desc {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        if field != SortField::None {
            spec = spec.with_sort(field, order);
        }
    }

    let opts = render_options(&cfg, &spec, format)?;
    print_rows(&session, &spec, &opts)
}

fn run_query(cli: &Cli, file: &Path, format: Option<&str>) -> Result<(), Box<dyn Error>> {
    let src = fs::read_to_string(file)?;
    let doc = parse_yaml_query(&src)?;
    let cfg = build_config(cli, doc.config.as_ref())?;
    let session = Session::from_config(&cfg)?;
    let spec = doc.resolve(session.catalog())?;

    let opts = render_options(&cfg, &spec, format)?;
    print_rows(&session, &spec, &opts)
}

fn explain_query(cli: &Cli, file: &Path) -> Result<(), Box<dyn Error>> {
    let src = fs::read_to_string(file)?;
    let doc = parse_yaml_query(&src)?;
    let cfg = build_config(cli, doc.config.as_ref())?;
    let session = Session::from_config(&cfg)?;
    let spec = doc.resolve(session.catalog())?;

    println!("Query Plan:");
    println!("  Collation: {:?} ({})", cfg.collation, cfg.locale);
    println!("  Catalog: {} products", session.catalog().products().len());
    let stages = explain(&spec);
    if stages.is_empty() {
        println!("  (no stages: full catalog in file order)");
    }
    for line in stages {
        println!("  {}", line);
    }
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let cfg = build_config(cli, None)?;
    let session = Session::from_config(&cfg)?;
    let catalog = session.catalog();
    println!(
        "✓ Catalog is valid: {} users, {} categories, {} products",
        catalog.users().len(),
        catalog.categories().len(),
        catalog.products().len()
    );
    Ok(())
}

fn draw(session: &Session, cfg: &ShelfConfig, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let view = session.render();
    writeln!(out, "{}", shell::render_panel(&view.panel))?;
    writeln!(out)?;
    let opts = RenderOptions {
        format: OutputFormat::Table,
        sort: view.sort,
        no_match_message: cfg.no_match_message.clone(),
        color: false,
    };
    shelf_io::render(&mut *out, &view.rows, &opts)?;
    writeln!(out)?;
    Ok(())
}

fn run_session(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let cfg = build_config(cli, None)?;
    let mut session = Session::from_config(&cfg)?;
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    draw(&session, &cfg, &mut out)?;
    for line in stdin.lock().lines() {
        let line = line?;
        let cmd = match shell::parse_line(&line, session.catalog()) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "! {}", e)?;
                continue;
            }
        };
        match cmd {
            Command::Event(event) => {
                let reset = event == Event::ResetAll;
                session.dispatch(event)?;
                if reset {
                    tracing::info!("filters reset");
                }
                draw(&session, &cfg, &mut out)?;
            }
            Command::Show => draw(&session, &cfg, &mut out)?,
            Command::Help => writeln!(out, "{}", shell::HELP)?,
            Command::Quit => break,
        }
    }
    out.flush()?;
    Ok(())
}
