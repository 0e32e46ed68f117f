use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use kindred::config::Config;
use kindred::discovery;
use kindred::ingest::profile::PersonInput;
use kindred::output::{self, csv, gexf, report, terminal};
use kindred::pipeline::{self, Analysis};

/// Kindred: who do your people have in common?
///
/// Reads followers, following and topics exports for several people, builds
/// their relationship graphs, and reports shared accounts, shared interests,
/// similarity and the most central entities.
#[derive(Parser)]
#[command(name = "kindred", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis and write reports, CSVs and the merged graph
    Analyze {
        /// Folder with <person>_<category>.json exports (default: ./data)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Output folder (default: ./out)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Also dump the whole analysis as analysis.json
        #[arg(long)]
        json: bool,
    },

    /// Show topics per person and the topics people share
    Topics {
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Show follower/following counts, mutuals and shared accounts
    Accounts {
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Print the combined Jaccard similarity matrix
    Similarity {
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("kindred=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { data, out, json } => {
            let config = Config::load()?.with_dirs(data, out);
            let Some(analysis) = load_and_analyze(&config)? else {
                return Ok(());
            };

            terminal::display_topics(&analysis, config.list_limit);
            terminal::display_accounts(&analysis, config.list_limit);
            terminal::display_similarity(&analysis.overlaps.similarity);
            terminal::display_top_central(&analysis.merged_centrality, config.list_limit);

            write_outputs(&analysis, &config, json)?;

            println!("\n{}", "=".repeat(70));
            println!("{}", "✓ ANALYSIS COMPLETE".green().bold());
            println!("{}", "=".repeat(70));
        }

        Commands::Topics { data } => {
            let config = Config::load()?.with_dirs(data, None);
            if let Some(analysis) = load_and_analyze(&config)? {
                terminal::display_topics(&analysis, config.list_limit);
            }
        }

        Commands::Accounts { data } => {
            let config = Config::load()?.with_dirs(data, None);
            if let Some(analysis) = load_and_analyze(&config)? {
                terminal::display_accounts(&analysis, config.list_limit);
            }
        }

        Commands::Similarity { data } => {
            let config = Config::load()?.with_dirs(data, None);
            if let Some(analysis) = load_and_analyze(&config)? {
                terminal::display_similarity(&analysis.overlaps.similarity);
            }
        }
    }

    Ok(())
}

/// Discover and load every export, then run the pipeline.
///
/// Returns `None` (after telling the user) when no exports were found.
fn load_and_analyze(config: &Config) -> Result<Option<Analysis>> {
    config.require_data_dir()?;

    println!("Loading data from {}...", config.data_dir.display());
    let groups = discovery::discover(&config.data_dir)?;
    if groups.is_empty() {
        println!(
            "{} No <person>_followers/following/topics.json files found in {}",
            "ERROR:".red().bold(),
            config.data_dir.display()
        );
        return Ok(None);
    }

    let file_count: usize = groups.iter().map(|g| g.files.len()).sum();
    let pb = ProgressBar::new(file_count as u64);
    pb.set_style(ProgressStyle::default_bar().template("  Loading [{bar:30}] {pos}/{len} files")?);

    let mut inputs: Vec<PersonInput> = Vec::with_capacity(groups.len());
    for group in &groups {
        let records = group
            .files
            .iter()
            .filter_map(|file| {
                pb.inc(1);
                discovery::load_file(file)
            })
            .collect::<Vec<_>>();
        if records.len() < group.files.len() {
            warn!(
                person = %group.person_key,
                skipped = group.files.len() - records.len(),
                "Some export files could not be loaded"
            );
        }
        inputs.push(PersonInput::new(group.person_key.clone(), records));
    }
    pb.finish_and_clear();

    let analysis = pipeline::analyze(&inputs, &config.pagerank)?;
    terminal::display_load_summary(&analysis);
    Ok(Some(analysis))
}

fn write_outputs(analysis: &Analysis, config: &Config, json: bool) -> Result<()> {
    let out_dir = &config.out_dir;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output folder {}", out_dir.display()))?;

    let report_path = out_dir.join("report.txt");
    report::write_report(analysis, &report_path)?;

    csv::write_csv(
        &out_dir.join("similarity_matrix.csv"),
        &csv::similarity_csv(&analysis.overlaps.similarity),
    )?;
    csv::write_csv(
        &out_dir.join("shared_entities.csv"),
        &csv::shared_entities_csv(&analysis.overlaps.shared_entities),
    )?;
    for ego in &analysis.egos {
        let name = format!("centrality_{}.csv", output::file_stem(&ego.person_key));
        csv::write_csv(&out_dir.join(name), &csv::centrality_csv(&ego.centrality))?;
    }
    csv::write_csv(
        &out_dir.join("centrality_merged.csv"),
        &csv::centrality_csv(&analysis.merged_centrality),
    )?;

    gexf::write_gexf(&analysis.merged, &out_dir.join("merged_graph.gexf"))?;

    if json {
        let path = out_dir.join("analysis.json");
        let body = serde_json::to_string_pretty(analysis)?;
        fs::write(&path, body).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    info!(out_dir = %out_dir.display(), "Outputs written");
    println!("\n{} Report saved to: {}", "✓".green(), report_path.display());
    println!("{} CSV and GEXF exports saved to: {}", "✓".green(), out_dir.display());
    Ok(())
}
