// 統計モジュール
//
// このモジュールは、時系列ペアの回帰分析に使用する統計機能を提供します。

pub mod regression;

use serde::Serialize;

use crate::error::Result;

/// 単回帰モデル（切片＋説明変数1つ）の結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimpleRegressionFit {
    /// 観測数
    pub n_obs: usize,
    /// 切片（β₀）
    pub intercept: f64,
    /// 傾き（β₁）
    pub slope: f64,
    /// 切片の標準誤差
    pub intercept_std_error: f64,
    /// 傾きの標準誤差
    pub slope_std_error: f64,
    /// 傾きのt値
    pub slope_t_value: f64,
    /// 切片のp値（両側）
    pub intercept_p_value: f64,
    /// 傾きのp値（両側、帰無仮説 β₁ = 0）
    pub slope_p_value: f64,
    /// 決定係数（R²）
    pub r_squared: f64,
    /// 調整済み決定係数
    pub adj_r_squared: f64,
    /// 残差の自由度（n - 2）
    pub df_residual: usize,
}

/// 最小二乗法による単回帰分析を実行
///
/// # 説明
/// `Y = β0 + β1·X + ε` を最小二乗法で推定し、傾きのt検定
/// （自由度 n - 2 のt分布による両側検定）と決定係数を計算します。
///
/// # 例
/// ```rust
/// use lagreg::stats;
///
/// let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = vec![2.1, 3.9, 6.2, 7.8, 10.1];
/// let fit = stats::simple_linear_regression(&y, &x).unwrap();
/// println!("傾き: {}", fit.slope);
/// println!("決定係数: {}", fit.r_squared);
/// ```
pub fn simple_linear_regression<T: AsRef<[f64]>, U: AsRef<[f64]>>(
    y: T,
    x: U,
) -> Result<SimpleRegressionFit> {
    regression::fit_simple_ols(y.as_ref(), x.as_ref())
}
