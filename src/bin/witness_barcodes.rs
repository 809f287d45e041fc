//! Witness Barcodes CLI
//!
//! Reads a point cloud, runs the landmark-witness persistence pipeline and
//! writes the barcodes.
//!
//! ## Usage
//!
//! ```bash
//! # Defaults: rational coefficients, 100 landmarks, max dimension 2,
//! # ratio 0.4, 20 divisions, strict witnesses
//! witness_barcodes data/in/iris.in data/out/iris.out
//!
//! # Lazy witnesses over Z/2, simple output
//! witness_barcodes points.txt barcodes.txt \
//!     --characteristic 2 --mode lazy --format simple
//!
//! # Start from a JSON config; flags override its values
//! witness_barcodes points.txt barcodes.json --config run.json --format json -vv
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use tda_witness_homology::{
    read_point_cloud,
    write_barcodes,
    BarcodeFormat,
    LandmarkStrategy,
    Metric,
    PipelineConfig,
    TdaError,
    WitnessMode,
    WitnessPipeline,
};

/// Persistent homology of a point cloud via a landmark witness complex.
#[derive(Parser, Debug)]
#[command(name = "witness_barcodes")]
#[command(about = "Compute persistence barcodes of a point cloud via witness complexes")]
struct Args {
    /// Point cloud file: one point per line, delimited by whitespace, `,` or `;`.
    input: PathBuf,

    /// Barcode output file (overwritten).
    output: PathBuf,

    /// JSON configuration file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Coefficient field characteristic: 0 (rationals) or a prime.
    #[arg(short, long)]
    characteristic: Option<u64>,

    /// Number of landmark points.
    #[arg(short = 'l', long)]
    landmarks: Option<usize>,

    /// Largest simplex dimension built.
    #[arg(short = 'd', long)]
    max_dimension: Option<usize>,

    /// Scale ceiling as a fraction of the landmark cover radius.
    #[arg(short = 'r', long)]
    ratio: Option<f64>,

    /// Number of grid steps over the scale range.
    #[arg(short = 'n', long)]
    divisions: Option<usize>,

    /// Absolute scale ceiling, overriding --ratio.
    #[arg(long)]
    max_filtration_value: Option<f64>,

    /// Witness rule: strict or lazy.
    #[arg(long)]
    mode: Option<WitnessMode>,

    /// Nearest-landmark offset for lazy edges.
    #[arg(long)]
    lazy_nu: Option<usize>,

    /// Distance: euclidean, manhattan or chebyshev.
    #[arg(long)]
    metric: Option<Metric>,

    /// Choose landmarks at random with this seed instead of maxmin.
    #[arg(long, conflicts_with = "maxmin_start")]
    random_seed: Option<u64>,

    /// Index of the first maxmin landmark.
    #[arg(long)]
    maxmin_start: Option<usize>,

    /// Output format: javaplex, simple or json.
    #[arg(short, long, default_value = "javaplex")]
    format: BarcodeFormat,

    /// Report intervals with birth == death.
    #[arg(long)]
    keep_zero_length: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn pipeline_config(&self) -> Result<PipelineConfig, TdaError> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(v) = self.characteristic {
            config.characteristic = v;
        }
        if let Some(v) = self.landmarks {
            config.num_landmarks = v;
        }
        if let Some(v) = self.max_dimension {
            config.max_dimension = v;
        }
        if let Some(v) = self.ratio {
            config.filtration_ratio = v;
        }
        if let Some(v) = self.divisions {
            config.num_divisions = v;
        }
        if let Some(v) = self.max_filtration_value {
            config.max_filtration_value = Some(v);
        }
        if let Some(v) = self.mode {
            config.mode = v;
        }
        if let Some(v) = self.lazy_nu {
            config.lazy_nu = v;
        }
        if let Some(v) = self.metric {
            config.metric = v;
        }
        if let Some(seed) = self.random_seed {
            config.landmarks = LandmarkStrategy::Random { seed };
        }
        if let Some(seed_index) = self.maxmin_start {
            config.landmarks = LandmarkStrategy::MaxMin { seed_index };
        }
        if self.keep_zero_length {
            config.keep_zero_length = true;
        }
        Ok(config)
    }
}

fn run(args: &Args) -> Result<(), TdaError> {
    let config = args.pipeline_config()?;
    let pipeline = WitnessPipeline::new(config)?;

    let cloud = read_point_cloud(&args.input)?;
    let output = pipeline.run(&cloud)?;
    write_barcodes(&args.output, &output.barcodes, args.format)?;

    println!(
        "Run successful: {} points, {} landmarks, {} simplices, {} intervals",
        cloud.len(),
        output.landmarks.len(),
        output.filtration.len(),
        output.barcodes.len()
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: a global tracing subscriber was already installed");
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error [{}]: {err}", err.kind());
            ExitCode::FAILURE
        }
    }
}
