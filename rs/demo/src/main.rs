use anyhow::Result;
use clap::Parser;
use clustering::kmeans::kmeans::KMeans;
use config::cluster_votes::ClusterVotesConfig;
use config::kmeans::KMeansConfig;
use demo::report::{cluster_senators, render};
use demo::votes::load_vote_record;
use log::{info, LevelFilter};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Directory of roll-call CSV files
    #[arg(long, required = true)]
    input_dir: String,

    #[arg(long, default_value_t = 3)]
    num_clusters: usize,

    #[arg(long, default_value_t = 50)]
    num_iterations: usize,

    /// Seed for the initial centroid sampling
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// YAML config. When given, it replaces the clustering flags above.
    #[arg(long)]
    config: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_millis()
        .init();

    let arg = Args::parse();
    let config = match &arg.config {
        Some(path) => ClusterVotesConfig::load_yaml(path)?,
        None => ClusterVotesConfig {
            kmeans: KMeansConfig {
                num_clusters: arg.num_clusters,
                num_iterations: arg.num_iterations,
                seed: arg.seed,
                parallel_assignment: arg.parallel,
                ..KMeansConfig::default()
            },
            ..ClusterVotesConfig::default()
        },
    };
    info!("Config: {:?}", config);

    let record = load_vote_record(&arg.input_dir, &config.vote_values)?;
    let kmeans = KMeans::from_config(&config.kmeans);
    let clusters = cluster_senators(&record, &kmeans)?;

    print!("{}", render(&clusters));
    Ok(())
}
