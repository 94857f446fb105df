use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use shelfcheck::catalog::ThunderCatalog;
use shelfcheck::config::{find_config_file, load_config};
use shelfcheck::engine::{sort_for_display, AvailabilityEngine};
use shelfcheck::models::{BookQuery, LibraryResult, LibraryStatus, MediaTypeFilter};
use shelfcheck::LibraryDirectory;

#[derive(Parser)]
#[command(name = "shelfcheck")]
#[command(about = "Check book availability across your libraries' digital catalogs")]
#[command(version)]
struct Cli {
    /// Book title to look up
    #[arg(short, long)]
    title: String,

    /// Author name
    #[arg(short, long, default_value = "")]
    author: String,

    /// Cleaned title variant with series/edition noise stripped
    #[arg(long)]
    clean_title: Option<String>,

    /// Library ids to check, comma separated (defaults to the config file)
    #[arg(short, long, value_delimiter = ',')]
    libraries: Vec<String>,

    /// Skip eBook results
    #[arg(long)]
    no_ebooks: bool,

    /// Skip audiobook results
    #[arg(long)]
    no_audiobooks: bool,

    /// Sort results best-first instead of requested order
    #[arg(long)]
    sorted: bool,

    /// Path to a library directory JSON file
    #[arg(long)]
    directory: Option<PathBuf>,

    /// Path to a config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Auto,
    Table,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().or_else(find_config_file);
    let config = load_config(config_path.as_ref()).context("failed to load configuration")?;

    let directory = match cli.directory.as_ref().or(config.libraries.directory_path.as_ref()) {
        Some(path) => LibraryDirectory::load(path)
            .with_context(|| format!("failed to load library directory {}", path.display()))?,
        None => LibraryDirectory::bundled(),
    };

    let library_ids = if cli.libraries.is_empty() {
        config.libraries.selected.clone()
    } else {
        cli.libraries.clone()
    };
    if library_ids.is_empty() {
        anyhow::bail!(
            "no libraries selected; pass --libraries or set libraries.selected in the config file"
        );
    }

    let mut filter = config.media_types.filter();
    if cli.no_ebooks {
        filter -= MediaTypeFilter::EBOOKS;
    }
    if cli.no_audiobooks {
        filter -= MediaTypeFilter::AUDIOBOOKS;
    }

    let mut query = BookQuery::new(cli.title.clone(), cli.author.clone());
    if let Some(clean) = cli.clean_title.clone() {
        query = query.clean_title(clean);
    }

    let catalog = ThunderCatalog::with_base_url(&config.catalog.base_url);
    let engine = AvailabilityEngine::new(Arc::new(catalog), Arc::new(directory))
        .with_stagger(Duration::from_millis(config.catalog.stagger_ms));

    let mut results = engine.resolve(&query, &library_ids, filter).await?;
    if cli.sorted {
        results = sort_for_display(results);
    }

    match cli.output {
        OutputFormat::Json => print_json(&results)?,
        OutputFormat::Table => print_table(&results),
        OutputFormat::Auto => {
            if std::io::stdout().is_terminal() {
                print_table(&results);
            } else {
                print_json(&results)?;
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "shelfcheck=info",
        1 => "shelfcheck=debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json(results: &[LibraryResult]) -> anyhow::Result<()> {
    let payload = serde_json::json!({ "results": results });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn print_table(results: &[LibraryResult]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Library", "Status", "Formats"]);

    for result in results {
        table.add_row(vec![
            Cell::new(&result.library_name),
            Cell::new(colored_status(result)),
            Cell::new(format_media_types(result)),
        ]);
    }

    println!("{table}");
}

fn colored_status(result: &LibraryResult) -> String {
    match result.status {
        LibraryStatus::Available => result.status_text.green().to_string(),
        LibraryStatus::Wait => result.status_text.yellow().to_string(),
        LibraryStatus::Error => result.status_text.red().to_string(),
        LibraryStatus::Unknown | LibraryStatus::Unavailable => {
            result.status_text.dimmed().to_string()
        }
    }
}

fn format_media_types(result: &LibraryResult) -> String {
    if result.media_types.is_empty() {
        return String::new();
    }

    result
        .media_types
        .iter()
        .map(|m| {
            let mut line = format!("{} {}: {}", m.icon, m.display_name, m.status_text);
            if let Some(detail) = &m.wait_detail {
                line.push_str(&format!(" ({})", detail));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
