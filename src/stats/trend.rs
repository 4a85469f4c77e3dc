//! Trend Estimator Module
//! Ordinary least-squares line through (unemployment, inflation) pairs.

use statrs::statistics::Statistics;

/// Number of evenly spaced points sampled along a fitted line.
pub const TREND_SAMPLES: usize = 100;

/// Fitted degree-1 polynomial `y = slope * x + intercept` with overlay points.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    pub sample_points: Vec<(f64, f64)>,
}

impl TrendLine {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

pub struct TrendEstimator;

impl TrendEstimator {
    /// Fit a line through `(x, y)` pairs.
    ///
    /// Returns `None` with fewer than two points or when every x is identical.
    pub fn fit(pairs: &[(f64, f64)]) -> Option<TrendLine> {
        if pairs.len() < 2 {
            return None;
        }

        let xs: Vec<f64> = pairs.iter().map(|&(x, _)| x).collect();
        let ys: Vec<f64> = pairs.iter().map(|&(_, y)| y).collect();

        let var_x = xs.iter().variance();
        if !var_x.is_finite() || var_x == 0.0 {
            return None;
        }

        let cov_xy = xs.iter().covariance(ys.iter());
        let slope = cov_xy / var_x;
        let intercept = ys.iter().mean() - slope * xs.iter().mean();

        let x_min = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let x_max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut line = TrendLine {
            slope,
            intercept,
            sample_points: Vec::with_capacity(TREND_SAMPLES),
        };
        line.sample_points = linspace(x_min, x_max, TREND_SAMPLES)
            .into_iter()
            .map(|x| (x, line.predict(x)))
            .collect();
        Some(line)
    }

    /// Pearson correlation coefficient, `None` when either side has no spread.
    pub fn correlation(pairs: &[(f64, f64)]) -> Option<f64> {
        if pairs.len() < 2 {
            return None;
        }
        let xs: Vec<f64> = pairs.iter().map(|&(x, _)| x).collect();
        let ys: Vec<f64> = pairs.iter().map(|&(_, y)| y).collect();

        let sx = xs.iter().std_dev();
        let sy = ys.iter().std_dev();
        if sx == 0.0 || sy == 0.0 || !sx.is_finite() || !sy.is_finite() {
            return None;
        }
        Some(xs.iter().covariance(ys.iter()) / (sx * sy))
    }
}

/// `n` evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = end;
            values
        }
    }
}
