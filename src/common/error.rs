//! エラー型

/// ライブラリ全体で使うエラー
#[derive(thiserror::Error, Debug)]
pub enum AttractorError {
    #[error("パラメータ {name} が有限値ではありません: {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },

    #[error("反復回数は1以上が必要です")]
    ZeroIterations,

    #[error("ビン数は1以上が必要です: {bins_x}x{bins_y}")]
    ZeroBins { bins_x: usize, bins_y: usize },

    #[error("探索範囲が不正です: min={min}, max={max}, step={step}")]
    InvalidRange { min: f64, max: f64, step: f64 },

    #[error("被覆率のしきい値は0〜1の範囲で指定してください: {0}")]
    InvalidCoverage(f64),

    #[error("{attempts}回試行しても条件を満たすアトラクタが見つかりませんでした")]
    SearchExhausted { attempts: u64 },

    #[error("画像エラー: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/Oエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSONエラー: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AttractorError>;
