//! Offline training from the coffee-shop CSV dataset.

use crate::domain::features::{FEATURE_COUNT, FEATURE_NAMES};
use crate::infrastructure::models::{ForestParams, SmartCoreRegressor};
use anyhow::{Context, Result, bail};
use std::io::Read;
use std::str::FromStr;

pub const TARGET_COLUMN: &str = "Daily_Revenue";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Linear,
    Forest,
}

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(Algorithm::Linear),
            "forest" | "random_forest" => Ok(Algorithm::Forest),
            _ => bail!("Invalid algorithm: {}. Must be 'linear' or 'forest'", s),
        }
    }
}

/// Feature rows (in `FEATURE_NAMES` order) and their revenue targets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingSet {
    pub x: Vec<Vec<f64>>,
    pub y: Vec<f64>,
}

impl TrainingSet {
    /// Reads a headed CSV. Columns are matched by name, extra columns are ignored.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers = rdr.headers().context("Failed to read CSV header")?.clone();

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .with_context(|| format!("Missing column {}", name))
        };
        let feature_idx = FEATURE_NAMES
            .iter()
            .map(|name| column(*name))
            .collect::<Result<Vec<_>>>()?;
        let target_idx = column(TARGET_COLUMN)?;

        let mut set = TrainingSet::default();
        for (line, record) in rdr.records().enumerate() {
            let record = record.with_context(|| format!("Failed to read CSV row {}", line + 1))?;
            let field = |idx: usize| -> Result<f64> {
                let raw = record.get(idx).unwrap_or_default().trim();
                raw.parse::<f64>()
                    .with_context(|| format!("Row {}: invalid number '{}'", line + 1, raw))
            };

            let row = feature_idx
                .iter()
                .map(|&idx| field(idx))
                .collect::<Result<Vec<_>>>()?;
            set.x.push(row);
            set.y.push(field(target_idx)?);
        }

        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Splits off the trailing `test_fraction` of rows for evaluation.
    pub fn split(&self, test_fraction: f64) -> (TrainingSet, TrainingSet) {
        let keep = ((self.len() as f64) * (1.0 - test_fraction)).floor() as usize;
        let split = keep.min(self.len());
        (
            TrainingSet {
                x: self.x[..split].to_vec(),
                y: self.y[..split].to_vec(),
            },
            TrainingSet {
                x: self.x[split..].to_vec(),
                y: self.y[split..].to_vec(),
            },
        )
    }
}

pub fn train(
    set: &TrainingSet,
    algorithm: Algorithm,
    params: ForestParams,
) -> Result<SmartCoreRegressor> {
    // Linear least squares needs more rows than unknowns (features + intercept)
    let min_rows = match algorithm {
        Algorithm::Linear => FEATURE_COUNT + 1,
        Algorithm::Forest => 2,
    };
    if set.len() < min_rows {
        bail!("Need at least {} rows to train, got {}", min_rows, set.len());
    }

    let model = match algorithm {
        Algorithm::Linear => SmartCoreRegressor::fit_linear(&set.x, &set.y),
        Algorithm::Forest => SmartCoreRegressor::fit_forest(&set.x, &set.y, params),
    };
    model.map_err(anyhow::Error::msg)
}

/// Out-of-sample error summary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionReport {
    pub n: usize,
    pub rmse: f64,
    pub mae: f64,
    pub r2: f64,
}

impl RegressionReport {
    pub fn evaluate(predictions: &[f64], actuals: &[f64]) -> Option<Self> {
        let n = predictions.len().min(actuals.len());
        if n == 0 {
            return None;
        }

        let pairs = || predictions.iter().zip(actuals.iter());
        let sq_err: f64 = pairs().map(|(p, t)| (p - t).powi(2)).sum();
        let mae = pairs().map(|(p, t)| (p - t).abs()).sum::<f64>() / n as f64;
        let mean_y = actuals[..n].iter().sum::<f64>() / n as f64;
        let var_y = actuals[..n].iter().map(|t| (t - mean_y).powi(2)).sum::<f64>() / n as f64;
        let r2 = if var_y > 0.0 {
            1.0 - (sq_err / n as f64) / var_y
        } else {
            0.0
        };

        Some(Self {
            n,
            rmse: (sq_err / n as f64).sqrt(),
            mae,
            r2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::features::FeatureVector;
    use crate::domain::ports::RevenueModel;
    use crate::infrastructure::mock::{synthetic_revenue, synthetic_training_data};

    fn csv_from(x: &[Vec<f64>], y: &[f64]) -> String {
        let mut out = format!("Shop_ID,{},{}\n", FEATURE_NAMES.join(","), TARGET_COLUMN);
        for (i, (row, target)) in x.iter().zip(y).enumerate() {
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            out.push_str(&format!("{},{},{}\n", i, cells.join(","), target));
        }
        out
    }

    #[test]
    fn test_reads_dataset_by_column_name() {
        let (x, y) = synthetic_training_data();
        let set = TrainingSet::from_csv(csv_from(&x, &y).as_bytes()).unwrap();
        assert_eq!(set.len(), x.len());
        assert_eq!(set.x[3], x[3]);
        assert_eq!(set.y[3], y[3]);
    }

    #[test]
    fn test_missing_target_column() {
        let csv = format!("{}\n1,2,3,4,5,6\n", FEATURE_NAMES.join(","));
        let err = TrainingSet::from_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains(TARGET_COLUMN));
    }

    #[test]
    fn test_invalid_number_reports_row() {
        let csv = format!(
            "{},{}\n1,2,3,4,5,six,7\n",
            FEATURE_NAMES.join(","),
            TARGET_COLUMN
        );
        let err = TrainingSet::from_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Row 1"));
    }

    #[test]
    fn test_split_keeps_order() {
        let (x, y) = synthetic_training_data();
        let set = TrainingSet { x, y };
        let (train_set, test_set) = set.split(0.25);
        assert_eq!(train_set.len(), 12);
        assert_eq!(test_set.len(), 4);
        assert_eq!(test_set.y[0], set.y[12]);
    }

    #[test]
    fn test_train_linear_and_evaluate() {
        let (x, y) = synthetic_training_data();
        let set = TrainingSet { x, y };
        let model = train(&set, Algorithm::Linear, ForestParams::default()).unwrap();

        let preds = model.predict_rows(&set.x).unwrap();
        let report = RegressionReport::evaluate(&preds, &set.y).unwrap();
        assert!(report.rmse < 1e-3);
        assert!(report.r2 > 0.999);

        let fv = FeatureVector::new([120.0, 4.5, 10.0, 4.0, 25.0, 300.0]);
        assert!((model.predict(&fv).unwrap() - synthetic_revenue(fv.values())).abs() < 1e-3);
    }

    #[test]
    fn test_train_rejects_tiny_dataset() {
        let (x, y) = synthetic_training_data();
        let set = TrainingSet {
            x: x[..3].to_vec(),
            y: y[..3].to_vec(),
        };
        assert!(train(&set, Algorithm::Linear, ForestParams::default()).is_err());
    }

    #[test]
    fn test_report_on_perfect_predictions() {
        let actual = [1.0, 2.0, 3.0];
        let report = RegressionReport::evaluate(&actual, &actual).unwrap();
        assert_eq!(report.rmse, 0.0);
        assert_eq!(report.mae, 0.0);
        assert_eq!(report.r2, 1.0);
        assert!(RegressionReport::evaluate(&[], &[]).is_none());
    }

    #[test]
    fn test_algorithm_parsing() {
        assert_eq!("Linear".parse::<Algorithm>().unwrap(), Algorithm::Linear);
        assert_eq!("forest".parse::<Algorithm>().unwrap(), Algorithm::Forest);
        assert!("xgboost".parse::<Algorithm>().is_err());
    }
}
