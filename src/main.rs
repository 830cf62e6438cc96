use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use playstyle_cluster::KMedoidsConfig;
use playstyle_dtw::Dtw;
use playstyle_io::{AssignmentReader, ExperimentName, MedoidReader, ResultWriter, TrajectoryReader};
use playstyle_stability::StabilityConfig;

#[derive(Parser)]
#[command(name = "playstyle")]
#[command(about = "DTW trajectory clustering and split-half playing style stability")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// RNG seed for reproducibility
    #[arg(long, default_value_t = 42, global = true)]
    seed: u64,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel computation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the pairwise DTW distance matrix of every trajectory
    Matrix {
        /// Path to the input trajectory JSON file
        #[arg(long)]
        data: PathBuf,

        /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Select k medoid trajectories with k-medoids over DTW distances
    Select {
        /// Path to the input trajectory JSON file
        #[arg(long)]
        data: PathBuf,

        /// Number of medoids
        #[arg(long)]
        k: usize,

        /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Maximum assign/update rounds per restart
        #[arg(long, default_value_t = 50)]
        max_iter: usize,

        /// Number of independent restarts (lowest cost kept)
        #[arg(long, default_value_t = 4)]
        n_init: usize,
    },

    /// Label every trajectory with its nearest medoid
    Assign {
        /// Path to the input trajectory JSON file
        #[arg(long)]
        data: PathBuf,

        /// Path to the medoid JSON file (indices + trajectories)
        #[arg(long)]
        medoids: PathBuf,

        /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Score how well each owner's label profile re-identifies them
    Stability {
        /// Path to the assignment JSON file
        #[arg(long)]
        assignments: PathBuf,

        /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Number of random splits to average over
        #[arg(long, default_value_t = 1)]
        trials: usize,

        /// Compare raw label counts instead of frequencies
        #[arg(long, default_value_t = false)]
        raw_counts: bool,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct MatrixOutput {
    experiment: String,
    n_trajectories: usize,
    n_pairs: usize,
    output: PathBuf,
}

#[derive(Serialize)]
struct SelectOutput {
    experiment: String,
    k: usize,
    n_trajectories: usize,
    cost: f64,
    converged: bool,
    medoids: Vec<usize>,
    cluster_sizes: Vec<usize>,
    output: PathBuf,
}

#[derive(Serialize)]
struct AssignOutput {
    experiment: String,
    k: usize,
    n_sessions: usize,
    n_trajectories: usize,
    output: PathBuf,
}

#[derive(Serialize)]
struct StabilityOutput {
    experiment: String,
    n_owners: usize,
    trials: usize,
    normalize: bool,
    top1_rate: f64,
    top3_rate: f64,
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(threads) = cli.threads {
        if threads == 0 {
            anyhow::bail!("--threads must be at least 1");
        }
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Matrix {
            data,
            experiment,
            output_dir,
        } => {
            let experiment_name = ExperimentName::new(experiment.clone())?;

            let dataset = TrajectoryReader::new(&data)
                .read()
                .context("failed to read input trajectories")?;
            let trajectories = dataset.trajectories();

            let matrix = Dtw::new().pairwise(&trajectories);

            let writer = ResultWriter::new(&output_dir, experiment_name)?;
            let output = writer
                .write_matrix(&dataset, &matrix)
                .context("failed to write distance matrix")?;

            let n = matrix.len();
            let summary = MatrixOutput {
                experiment,
                n_trajectories: n,
                n_pairs: n * n.saturating_sub(1) / 2,
                output,
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Command::Select {
            data,
            k,
            experiment,
            output_dir,
            max_iter,
            n_init,
        } => {
            if n_init == 0 {
                anyhow::bail!("--n-init must be at least 1");
            }
            let experiment_name = ExperimentName::new(experiment.clone())?;

            let dataset = TrajectoryReader::new(&data)
                .read()
                .context("failed to read input trajectories")?;
            let trajectories = dataset.trajectories();

            let matrix = Dtw::new().pairwise(&trajectories);

            let config = KMedoidsConfig::new(k)?
                .with_n_init(n_init)
                .with_max_iter(max_iter)
                .with_seed(cli.seed);
            let result = config.fit(&matrix).context("medoid selection failed")?;

            let writer = ResultWriter::new(&output_dir, experiment_name)?;
            let output = writer
                .write_medoids(&dataset, &result)
                .context("failed to write medoids")?;

            let summary = SelectOutput {
                experiment,
                k,
                n_trajectories: trajectories.len(),
                cost: result.cost,
                converged: result.converged,
                cluster_sizes: result.cluster_sizes(),
                medoids: result.medoids,
                output,
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Command::Assign {
            data,
            medoids,
            experiment,
            output_dir,
        } => {
            let experiment_name = ExperimentName::new(experiment.clone())?;

            let dataset = TrajectoryReader::new(&data)
                .read()
                .context("failed to read input trajectories")?;
            let medoid_set = MedoidReader::new(&medoids)
                .read()
                .context("failed to read medoids")?;

            let assignments = medoid_set.assign(dataset.sessions());

            let writer = ResultWriter::new(&output_dir, experiment_name)?;
            let output = writer
                .write_assignments(&assignments)
                .context("failed to write assignments")?;

            let summary = AssignOutput {
                experiment,
                k: medoid_set.len(),
                n_sessions: dataset.n_sessions(),
                n_trajectories: dataset.n_trajectories(),
                output,
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Command::Stability {
            assignments,
            experiment,
            output_dir,
            trials,
            raw_counts,
        } => {
            if trials == 0 {
                anyhow::bail!("--trials must be at least 1");
            }
            let experiment_name = ExperimentName::new(experiment.clone())?;

            let labels = AssignmentReader::new(&assignments)
                .read()
                .context("failed to read assignments")?;

            let report = StabilityConfig::new()
                .with_normalize(!raw_counts)
                .with_n_trials(trials)
                .with_seed(cli.seed)
                .evaluate(&labels);

            let writer = ResultWriter::new(&output_dir, experiment_name)?;
            let output = writer
                .write_stability(&report)
                .context("failed to write stability report")?;

            let summary = StabilityOutput {
                experiment,
                n_owners: report.n_owners,
                trials,
                normalize: report.normalize,
                top1_rate: report.mean_top1_rate,
                top3_rate: report.mean_top3_rate,
                output,
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
