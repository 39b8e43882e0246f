use anyhow::Context;
use clap::Parser;
use titanic_api::adapters::seed::seed_sqlite;
use titanic_api::utils::logger;

#[derive(Parser)]
#[command(name = "titanic-seed")]
#[command(about = "Build the SQLite passengers table from the CSV dataset")]
struct Args {
    /// Source CSV file
    #[arg(long, default_value = "./data/titanic.csv")]
    csv: String,

    /// Target SQLite database (created if missing, table replaced)
    #[arg(long, default_value = "./data/titanic.db")]
    db: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    tracing::info!("Seeding {} from {}", args.db, args.csv);
    let report = seed_sqlite(&args.csv, &args.db)
        .with_context(|| format!("failed to seed '{}' from '{}'", args.db, args.csv))?;

    println!(
        "✅ Database setup complete: {} passengers inserted, {} skipped",
        report.inserted, report.skipped
    );
    Ok(())
}
