//! Bookshelf command-line entry point.
//!
//! # Responsibility
//! - Seed a catalog with synthetic authors and books.
//! - Run the analytical report and print it as text or JSON.
//! - Stay a thin consumer: all storage and query logic lives in core.

mod output;
mod seed;

use anyhow::{Context, Result};
use bookshelf_core::{
    default_log_level, init_logging, CatalogCounts, CatalogService, Database, DbTarget, LogSink,
    ReportService, SqliteCatalogQueries, SqliteCatalogRepository,
};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use log::info;
use seed::FakeCatalog;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(about = "Seed and query an author/book catalog stored in SQLite")]
#[command(version)]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "BOOKSHELF_DB", default_value = "bookshelf.db")]
    db: PathBuf,

    /// Use a throwaway database instead of a file; overrides --db and BOOKSHELF_DB
    #[arg(long)]
    in_memory: bool,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "BOOKSHELF_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logs go to stderr otherwise
    #[arg(long, env = "BOOKSHELF_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, short = 'J')]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Insert synthetic authors and books
    Seed(SeedArgs),
    /// Run every catalog query and print the results
    Report,
    /// Seed, then report (default)
    Run(SeedArgs),
}

#[derive(Args, Clone)]
struct SeedArgs {
    /// Number of authors to generate
    #[arg(long, default_value_t = 500)]
    authors: usize,

    /// Number of books to generate
    #[arg(long, default_value_t = 1000)]
    books: usize,

    /// RNG seed for a reproducible catalog
    #[arg(long)]
    seed: Option<u64>,
}

impl Default for SeedArgs {
    fn default() -> Self {
        Self {
            authors: 500,
            books: 1000,
            seed: None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    let sink = cli
        .log_dir
        .clone()
        .map_or(LogSink::Stderr, LogSink::Directory);
    init_logging(&level, sink)
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;

    let target = if cli.in_memory {
        DbTarget::unique_memory()
    } else {
        DbTarget::file(&cli.db)
    };
    let db = Database::open(target).context("failed to open catalog database")?;
    db.ensure_schema()
        .context("failed to create catalog schema")?;

    match cli.command.unwrap_or(Command::Run(SeedArgs::default())) {
        Command::Seed(args) => {
            let counts = seed_catalog(&db, &args)?;
            output::print_counts(&counts, cli.json)?;
        }
        Command::Report => run_report(&db, cli.json)?,
        Command::Run(args) => {
            let counts = seed_catalog(&db, &args)?;
            if !cli.json {
                output::print_counts(&counts, false)?;
            }
            run_report(&db, cli.json)?;
        }
    }

    Ok(())
}

fn seed_catalog(db: &Database, args: &SeedArgs) -> Result<CatalogCounts> {
    info!(
        "event=cli_seed module=cli status=start authors={} books={} seeded={}",
        args.authors,
        args.books,
        args.seed.is_some()
    );

    db.with_session(|session| -> Result<CatalogCounts> {
        let mut fake = FakeCatalog::new(args.seed, Local::now().date_naive());
        let mut catalog =
            CatalogService::new(SqliteCatalogRepository::new(session.connection_mut()?));

        let author_ids = catalog
            .import_authors(&fake.authors(args.authors))
            .context("failed to import authors")?;
        catalog
            .import_books(&fake.books(args.books, &author_ids))
            .context("failed to import books")?;

        Ok(catalog.counts()?)
    })
}

fn run_report(db: &Database, json: bool) -> Result<()> {
    let report = db.with_session(|session| -> Result<_> {
        let service = ReportService::new(SqliteCatalogQueries::new(session.connection()?));
        Ok(service.full_report())
    })?;

    output::print_report(&report, json)
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn seed_arguments_parse_with_defaults() {
        let cli = Cli::try_parse_from(["bookshelf", "--in-memory", "seed", "--seed", "9"]).unwrap();
        assert!(cli.in_memory);
        match cli.command {
            Some(Command::Seed(args)) => {
                assert_eq!(args.authors, 500);
                assert_eq!(args.books, 1000);
                assert_eq!(args.seed, Some(9));
            }
            _ => panic!("expected seed command"),
        }
    }

    #[test]
    fn in_memory_overrides_db_path_from_flag_and_environment() {
        let cli =
            Cli::try_parse_from(["bookshelf", "--db", "x.db", "--in-memory", "report"]).unwrap();
        assert!(cli.in_memory);

        std::env::set_var("BOOKSHELF_DB", "from-env.db");
        let parsed = Cli::try_parse_from(["bookshelf", "--in-memory", "report"]);
        std::env::remove_var("BOOKSHELF_DB");

        let cli = parsed.unwrap();
        assert!(cli.in_memory);
        assert_eq!(cli.db, std::path::PathBuf::from("from-env.db"));
        assert!(matches!(cli.command, Some(Command::Report)));
    }
}
