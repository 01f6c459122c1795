pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod export;
pub mod matching;
pub mod server;
pub mod skills;
pub mod stats;
pub mod types;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard
    Serve {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
    /// Print headline statistics of the dataset
    Summary {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
    /// Count the postings a skill selection fully matches
    Match {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
        /// Comma separated skills, e.g. python,sql,communication
        #[arg(short, long, value_delimiter = ',')]
        skills: Vec<String>,
    },
    /// Write the dashboard model and job markers to the export directory
    Export {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Serve { config } => {
            let app_config = config::AppConfig::load_from_file(config)?;
            let table = data::load_data(&app_config)?;
            server::start_server(app_config, table).await?;
        }
        Commands::Summary { config } => {
            let app_config = config::AppConfig::load_from_file(config)?;
            let table = data::load_data(&app_config)?;
            print_summary(&table, &app_config);
        }
        Commands::Match { config, skills } => {
            let app_config = config::AppConfig::load_from_file(config)?;
            let table = data::load_data(&app_config)?;

            let selection = matching::SkillSet::new(skills.iter().map(|s| s.trim()));
            for unknown in selection.unknown() {
                tracing::warn!(skill = unknown, "not in the skill vocabulary, ignored");
            }
            let counts = matching::match_jobs(&table, &selection);
            println!("{}: {}", charts::MATCHED_LABEL, counts.matched);
            println!("{}: {}", charts::UNMATCHED_LABEL, counts.unmatched);
        }
        Commands::Export { config } => {
            let app_config = config::AppConfig::load_from_file(config)?;
            let table = data::load_data(&app_config)?;
            for path in export::export(&app_config, &table)? {
                info!(path = ?path, "exported");
            }
        }
    }

    Ok(())
}

fn print_summary(table: &types::JobTable, app_config: &config::AppConfig) {
    println!("{}", dashboard::TITLE);
    println!("jobs: {}", table.len());

    println!("\nwork type");
    for count in stats::work_type_counts(table) {
        println!("  {:<16} {}", count.label, count.value);
    }

    println!("\napplicants");
    for count in stats::applicant_buckets(table) {
        println!("  {:<16} {}", count.label, count.value);
    }

    println!("\nmentioned at least once");
    let groups = [
        ("programming", skills::PROGRAMMING_MENTIONS),
        ("etl software", skills::ETL_SOFTWARE),
        ("data visualization", skills::DATA_VISUALIZATION),
        ("databases", skills::DATABASES),
    ];
    for (name, columns) in groups {
        let share = stats::requirement_share(table, columns);
        println!("  {:<24} {:>5.1}%", name, share.percent());
    }
    let keywords = skills::KEYWORD_COLUMNS.iter().filter(|c| **c != "programming");
    for column in skills::OTHER_SKILLS.iter().chain(keywords) {
        let share = stats::single_skill_share(table, column);
        println!("  {:<24} {:>5.1}%", column, share.percent());
    }

    let matcher = dashboard::match_widget(table, &app_config.matching);
    println!("\ndefault selection");
    for slice in &matcher.chart.slices {
        println!("  {:<24} {}", slice.label, slice.value);
    }
}
