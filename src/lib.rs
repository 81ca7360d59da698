//! クリフォード・アトラクタの計算と描画
//!
//!   x' = sin(a*y) + c*cos(a*x)
//!   y' = sin(b*x) + d*cos(b*y)
//!
//! 軌道をそのまま返す `trajectory` と、軌道を保持せずに密度を集計する
//! `histogram` が計算の中心。`AttractorSearch` はランダムなパラメータから
//! 見栄えのするアトラクタを探す。

pub mod common;

pub use common::attractor::{histogram, trajectory, Bounds, Histogram, Params, Trajectory};
pub use common::colors::ColorMap;
pub use common::error::{AttractorError, Result};
pub use common::render::{log_contrast, render_histogram, save_png};
pub use common::search::{Accepted, AttractorSearch, ParamRange, SearchConfig};
