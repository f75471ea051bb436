//! Offline trainer: fits a revenue regressor on the coffee-shop dataset and
//! writes an artifact the server can load.

use anyhow::{Context, Result};
use clap::Parser;
use coffee_revenue::application::training::{Algorithm, RegressionReport, TrainingSet, train};
use coffee_revenue::config::DEFAULT_MODEL_PATH;
use coffee_revenue::infrastructure::decoders::{ArtifactFormat, write_artifact};
use coffee_revenue::infrastructure::models::ForestParams;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to training data CSV
    #[arg(long, default_value = "data/coffee_shop_revenue.csv")]
    input: PathBuf,

    /// Path to output model file
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    output: PathBuf,

    /// linear or forest
    #[arg(long, default_value = "linear")]
    algorithm: Algorithm,

    /// Artifact encoding: bincode or json
    #[arg(long, default_value = "bincode")]
    format: ArtifactFormat,

    /// Number of trees in the random forest
    #[arg(long, default_value_t = 100)]
    n_trees: usize,

    /// Maximum depth of trees
    #[arg(long, default_value_t = 10)]
    max_depth: u16,

    /// Minimum samples required to split an internal node
    #[arg(long, default_value_t = 5)]
    min_split: usize,

    /// Disable train/test split (train on 100% of data). Use after validation.
    #[arg(long)]
    no_split: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Loading training data from {:?}", args.input);
    let file = File::open(&args.input)
        .with_context(|| format!("Training data not found at {:?}", args.input))?;
    let data = TrainingSet::from_csv(BufReader::new(file))?;
    println!("Loaded {} rows", data.len());

    let (train_set, test_set) = if args.no_split {
        (data, TrainingSet::default())
    } else {
        data.split(0.2)
    };

    let params = ForestParams {
        n_trees: args.n_trees,
        max_depth: args.max_depth,
        min_split: args.min_split,
    };
    match args.algorithm {
        Algorithm::Linear => {
            println!("Training Linear Regression on {} samples...", train_set.len())
        }
        Algorithm::Forest => println!(
            "Training Random Forest Regressor on {} samples \
             (Trees: {}, Depth: {}, MinSplit: {})...",
            train_set.len(),
            params.n_trees,
            params.max_depth,
            params.min_split
        ),
    }
    let model = train(&train_set, args.algorithm, params)?;

    if !test_set.is_empty() {
        let predictions = model
            .predict_rows(&test_set.x)
            .map_err(anyhow::Error::msg)?;
        if let Some(report) = RegressionReport::evaluate(&predictions, &test_set.y) {
            println!(
                "OOS Test (n={}): RMSE={:.4}, MAE={:.4}, R²={:.4}",
                report.n, report.rmse, report.mae, report.r2
            );
        }
    }

    println!("Saving model to {:?} ({:?})", args.output, args.format);
    write_artifact(&args.output, &model, args.format)
        .with_context(|| format!("Failed to write {:?}", args.output))?;

    println!("Done. Model saved successfully.");
    Ok(())
}
