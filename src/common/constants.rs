//! 共通定数

/// 描画用ヒストグラムの既定の幅（ビン数）
pub const DEFAULT_BINS_X: usize = 500;
/// 描画用ヒストグラムの既定の高さ（ビン数）
pub const DEFAULT_BINS_Y: usize = 500;

/// 描画時の既定の反復回数
pub const DEFAULT_ITERATIONS: usize = 1_000_000;

/// 探索時の既定の反復回数
pub const SEARCH_ITERATIONS: usize = 1_000_000;

/// 探索で採用するアトラクタの既定の個数
pub const SEARCH_COUNT: usize = 20;

/// 非ゼロビンの割合がこれ未満なら「空っぽ」として棄却
pub const MIN_COVERAGE: f64 = 0.10;

/// パラメータ探索範囲（離散化）
pub const PARAM_MIN: f64 = -2.0;
pub const PARAM_MAX: f64 = 2.0;
pub const PARAM_STEP: f64 = 0.01;

/// 探索の既定の試行回数上限
pub const MAX_ATTEMPTS: u64 = 10_000;

/// 近傍ビンへの加算量（ブラシ効果）
pub const NEIGHBOR_WEIGHT: f32 = 0.25;

/// サイドパネルの設定
pub const PANEL_WIDTH: usize = 80;
pub const PANEL_MARGIN: usize = 12;
pub const PANEL_BAR_WIDTH: usize = 16;
pub const PANEL_BACKGROUND: u32 = 0x404040;
pub const PANEL_TEXT: u32 = 0xCCCCCC;

/// ビューアの表示サイズ（ヒストグラム部分）
pub const VIEW_WIDTH: usize = 600;
pub const VIEW_HEIGHT: usize = 600;

/// ビューア全体のウィンドウサイズ
pub const WINDOW_WIDTH: usize = VIEW_WIDTH + PANEL_WIDTH;
pub const WINDOW_HEIGHT: usize = VIEW_HEIGHT;

/// ビューアで使う反復回数（操作の応答性優先）
pub const VIEW_ITERATIONS: usize = 2_000_000;
