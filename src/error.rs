use thiserror::Error;

/// エラー型の定義
#[derive(Error, Debug)]
pub enum Error {
    #[error("入出力エラー")]
    Io(#[source] std::io::Error),

    #[error("CSVエラー")]
    Csv(#[source] csv::Error),

    #[error("JSONエラー")]
    Json(#[source] serde_json::Error),

    #[error("YAMLエラー")]
    Yaml(#[source] serde_yaml::Error),

    #[error("TOMLエラー")]
    Toml(#[source] toml::de::Error),

    #[error("系列が見つかりません: {0}")]
    ColumnNotFound(String),

    #[error("系列名が重複しています: {0}")]
    DuplicateColumnName(String),

    #[error("行数が一致しません: 期待値 {expected}, 実際 {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("長さが一致しません: 期待値 {expected}, 実際 {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("インデックスエラー: {0}")]
    Index(String),

    #[error("型変換エラー: {0}")]
    Cast(String),

    #[error("データ形式エラー: {0}")]
    Format(String),

    #[error("データがありません: {0}")]
    EmptyData(String),

    // 設定エラー（バッチ全体を中止する）
    #[error("テーブルに存在しない系列が指定されています: {}", .0.join(", "))]
    UnknownSeries(Vec<String>),

    #[error("シフト値が指定されていない系列があります: {}", .0.join(", "))]
    MissingShift(Vec<String>),

    #[error("系列が重複して選択されています: {0}")]
    DuplicateSelection(String),

    #[error("回帰分析には少なくとも2つの系列が必要です（選択数: {0}）")]
    InsufficientSelection(usize),

    #[error("無効な設定です: {0}")]
    InvalidConfig(String),

    // ペア単位のエラー（結果のバリアントに変換される）
    #[error("データ不足エラー: {0}")]
    InsufficientData(String),

    #[error("説明変数が定数です（観測数 {n_obs}）")]
    DegeneratePredictor { n_obs: usize },

    #[error("目的変数が定数です（観測数 {n_obs}）")]
    DegenerateResponse { n_obs: usize },

    #[error("数値計算が不安定です: {0}")]
    NumericInstability(String),
}

impl Error {
    /// バッチ実行前に検出される設定エラーかどうか
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnknownSeries(_)
                | Error::MissingShift(_)
                | Error::DuplicateSelection(_)
                | Error::InsufficientSelection(_)
                | Error::InvalidConfig(_)
        )
    }
}

/// Resultの型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
