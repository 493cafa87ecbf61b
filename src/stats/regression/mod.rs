// 回帰分析モジュール

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::{Error, Result};
use crate::stats::SimpleRegressionFit;

/// t検定に必要な最小観測数（残差の自由度が1以上）
pub const MIN_FIT_OBSERVATIONS: usize = 3;

/// 単回帰分析を実行する内部実装
///
/// 和は常に先頭から順に計算するため、同じ入力からは同じ結果が得られる。
pub fn fit_simple_ols(y: &[f64], x: &[f64]) -> Result<SimpleRegressionFit> {
    if y.len() != x.len() {
        return Err(Error::LengthMismatch {
            expected: y.len(),
            actual: x.len(),
        });
    }

    let n = y.len();
    if n < MIN_FIT_OBSERVATIONS {
        return Err(Error::InsufficientData(format!(
            "回帰分析には少なくとも{}個の観測値が必要です（観測数: {}）",
            MIN_FIT_OBSERVATIONS, n
        )));
    }

    // 定数列のチェック（分散が0だと標準誤差・決定係数が定義できない）
    if is_constant(x) {
        return Err(Error::DegeneratePredictor { n_obs: n });
    }
    if is_constant(y) {
        return Err(Error::DegenerateResponse { n_obs: n });
    }

    let n_f64 = n as f64;
    let x_mean = x.iter().sum::<f64>() / n_f64;
    let y_mean = y.iter().sum::<f64>() / n_f64;

    // 中心化した平方和・積和
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx == 0.0 {
        return Err(Error::DegeneratePredictor { n_obs: n });
    }
    if syy == 0.0 {
        return Err(Error::DegenerateResponse { n_obs: n });
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    // 残差平方和
    let ss_residual = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (yi - (intercept + slope * xi)).powi(2))
        .sum::<f64>();

    let df_residual = n - 2;
    let df_f64 = df_residual as f64;

    // 決定係数（R²）と調整済み決定係数
    let r_squared = 1.0 - ss_residual / syy;
    let adj_r_squared = 1.0 - (1.0 - r_squared) * (n_f64 - 1.0) / df_f64;

    // 係数の標準誤差
    let sigma2 = ss_residual / df_f64;
    let slope_std_error = (sigma2 / sxx).sqrt();
    let intercept_std_error = (sigma2 * (1.0 / n_f64 + x_mean * x_mean / sxx)).sqrt();

    let slope_t_value = t_statistic(slope, slope_std_error);
    let intercept_t_value = t_statistic(intercept, intercept_std_error);

    let slope_p_value = two_sided_p_value(slope_t_value, df_residual)?;
    let intercept_p_value = two_sided_p_value(intercept_t_value, df_residual)?;

    let checks = [
        ("intercept", intercept),
        ("slope", slope),
        ("intercept_std_error", intercept_std_error),
        ("slope_std_error", slope_std_error),
        ("intercept_p_value", intercept_p_value),
        ("slope_p_value", slope_p_value),
        ("r_squared", r_squared),
        ("adj_r_squared", adj_r_squared),
    ];
    if let Some((name, value)) = checks.iter().find(|(_, v)| !v.is_finite()) {
        return Err(Error::NumericInstability(format!(
            "{} が有限値ではありません: {}（観測数 {}）",
            name, value, n
        )));
    }

    Ok(SimpleRegressionFit {
        n_obs: n,
        intercept,
        slope,
        intercept_std_error,
        slope_std_error,
        slope_t_value,
        intercept_p_value,
        slope_p_value,
        r_squared,
        adj_r_squared,
        df_residual,
    })
}

fn is_constant(values: &[f64]) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first),
        None => true,
    }
}

/// 係数のt値（標準誤差が0の場合は完全な当てはまりとして扱う）
fn t_statistic(coefficient: f64, std_error: f64) -> f64 {
    if std_error == 0.0 {
        if coefficient == 0.0 {
            0.0
        } else {
            coefficient.signum() * f64::INFINITY
        }
    } else {
        coefficient / std_error
    }
}

/// t分布による両側検定のp値
fn two_sided_p_value(t_value: f64, df: usize) -> Result<f64> {
    if t_value.is_nan() {
        return Err(Error::NumericInstability("t値がNaNです".into()));
    }
    if t_value.is_infinite() {
        return Ok(0.0);
    }

    let t_dist = StudentsT::new(0.0, 1.0, df as f64).map_err(|e| {
        Error::NumericInstability(format!("t分布を作成できません（自由度 {}）: {}", df, e))
    })?;

    Ok((2.0 * t_dist.sf(t_value.abs())).min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_regression() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 4.0, 6.0, 8.0, 10.0];

        let result = fit_simple_ols(&y, &x).unwrap();

        // y = 2x なので、切片は0, 係数は2になるはず
        assert!((result.intercept - 0.0).abs() < 1e-10);
        assert!((result.slope - 2.0).abs() < 1e-10);
        assert!((result.r_squared - 1.0).abs() < 1e-10);
        assert!(result.slope_p_value < 1e-6);
    }

    #[test]
    fn test_known_statistics() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 4.0, 5.0, 4.0, 5.0];

        let result = fit_simple_ols(&y, &x).unwrap();

        assert_eq!(result.n_obs, 5);
        assert_eq!(result.df_residual, 3);
        assert!((result.slope - 0.6).abs() < 1e-12);
        assert!((result.intercept - 2.2).abs() < 1e-12);
        assert!((result.r_squared - 0.6).abs() < 1e-12);
        assert!((result.adj_r_squared - (1.0 - 0.4 * 4.0 / 3.0)).abs() < 1e-12);
        assert!((result.slope_std_error - 0.08_f64.sqrt()).abs() < 1e-12);
        assert!((result.slope_t_value - 2.121_320_343_559_642).abs() < 1e-9);
        // t = 2.1213, 自由度3 の両側p値
        assert!((result.slope_p_value - 0.124_027).abs() < 1e-5);
    }

    #[test]
    fn test_negative_slope_p_value_is_symmetric() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 4.0, 5.0, 4.0, 5.0];
        let y_neg: Vec<f64> = y.iter().map(|v| -v).collect();

        let pos = fit_simple_ols(&y, &x).unwrap();
        let neg = fit_simple_ols(&y_neg, &x).unwrap();

        assert!((pos.slope + neg.slope).abs() < 1e-12);
        assert!((pos.slope_p_value - neg.slope_p_value).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        let x = vec![3.0; 6];
        let y = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert!(matches!(
            fit_simple_ols(&y, &x),
            Err(Error::DegeneratePredictor { n_obs: 6 })
        ));
        assert!(matches!(
            fit_simple_ols(&x, &y),
            Err(Error::DegenerateResponse { n_obs: 6 })
        ));
    }

    #[test]
    fn test_insufficient_and_mismatched_inputs() {
        assert!(matches!(
            fit_simple_ols(&[1.0, 2.0], &[1.0, 2.0]),
            Err(Error::InsufficientData(_))
        ));
        assert!(matches!(
            fit_simple_ols(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(Error::LengthMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_non_finite_input_is_reported() {
        let x = vec![1.0, 2.0, f64::INFINITY, 4.0];
        let y = vec![1.0, 2.0, 3.0, 4.0];
        assert!(matches!(
            fit_simple_ols(&y, &x),
            Err(Error::NumericInstability(_))
        ));
    }

    #[test]
    fn test_deterministic() {
        let x: Vec<f64> = (0..50).map(|i| (i as f64 * 0.37).sin()).collect();
        let y: Vec<f64> = (0..50).map(|i| (i as f64 * 0.11).cos() + 0.3 * x[i]).collect();
        assert_eq!(fit_simple_ols(&y, &x).unwrap(), fit_simple_ols(&y, &x).unwrap());
    }
}
