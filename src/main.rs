use anyhow::{Context, Result};
use beach_directory::{
    logging, render_page, Directory, FileSource, FilterCriteria, Language, LoadOutcome,
};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "beach-directory", version, about = "Browse Okinawa beach facilities")]
struct Cli {
    /// Directory holding beaches.json and beaches_ja.json
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Display language (zh or ja)
    #[arg(long, global = true)]
    lang: Option<Language>,

    /// Page path used to detect the language when --lang is absent
    #[arg(long, global = true, default_value = "/")]
    page: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive terminal browser (default)
    Tui {
        #[arg(long, default_value = "beach-directory.log")]
        log_file: PathBuf,
    },
    /// Write the localized directory page as HTML
    Render(RenderArgs),
}

#[derive(Debug, Args)]
struct RenderArgs {
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value = "")]
    search: String,

    #[arg(long, default_value = "all")]
    lifeguard: String,

    #[arg(long, default_value = "all")]
    shower: String,

    #[arg(long, default_value = "all")]
    fee: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let language = cli.lang.unwrap_or_else(|| Language::from_page_path(&cli.page));

    match cli.command {
        Some(Command::Render(args)) => {
            logging::init_stderr();
            run_render(&cli.data_dir, language, &args)
        }
        Some(Command::Tui { log_file }) => run_ui_mode(&cli.data_dir, language, &log_file),
        None => run_ui_mode(&cli.data_dir, language, Path::new("beach-directory.log")),
    }
}

fn run_render(data_dir: &Path, language: Language, args: &RenderArgs) -> Result<()> {
    let criteria = FilterCriteria::from_controls(
        Some(&args.search),
        Some(&args.lifeguard),
        Some(&args.shower),
        Some(&args.fee),
    )?;

    let mut directory = Directory::new(language);
    if directory.load_from(&FileSource::new(data_dir)) == LoadOutcome::Failed {
        eprintln!("⚠️  Beach data could not be loaded; rendering an empty table");
    }
    directory.set_criteria(criteria);

    let view = directory.render();
    let page = render_page(language, directory.criteria(), &view);
    std::fs::write(&args.out, page)
        .with_context(|| format!("Failed to write page: {:?}", args.out))?;

    println!("✓ Wrote {} beaches ({}) to {:?}", view.count, language, args.out);
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(data_dir: &Path, language: Language, log_file: &Path) -> Result<()> {
    use std::sync::Arc;

    logging::init_file(log_file);
    tracing::info!(data_dir = %data_dir.display(), %language, "starting terminal UI");

    let mut app = beach_directory::ui::App::new(language, Arc::new(FileSource::new(data_dir)));
    beach_directory::ui::run_ui(&mut app)
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_data_dir: &Path, _language: Language, _log_file: &Path) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use web UI: cargo run --bin beach-server --features server");
    std::process::exit(1);
}
