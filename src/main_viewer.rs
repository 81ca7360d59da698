//! クリフォード・アトラクタ インタラクティブビューア
//!
//! ランダム探索で採用されたアトラクタを次々に表示する。
//!
//! 操作方法:
//!   - N キー: 次のアトラクタ
//!   - C キー: カラーマップ切替
//!   - S キー: 現在の表示を画像として保存
//!   - Q / Escape キー: 終了

use anyhow::{anyhow, Context, Result};
use clifford::common::{
    colors::ColorMap,
    constants::*,
    panel::draw_panel,
    render::{buffer_to_image, render_buffer, save_png},
    search::{Accepted, AttractorSearch, SearchConfig},
};
use log::{info, warn};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::time::Instant;

/// ビューアの状態
struct ViewerState {
    search: AttractorSearch,
    current: Option<Accepted>,
    colormap: ColorMap,
    buffer: Vec<u32>, // ウィンドウ全体のバッファ
    needs_redraw: bool,
    save_counter: u32,
}

impl ViewerState {
    fn new(seed: u64) -> Result<Self> {
        let config = SearchConfig {
            iterations: VIEW_ITERATIONS,
            bins_x: VIEW_WIDTH,
            bins_y: VIEW_HEIGHT,
            ..SearchConfig::default()
        };
        Ok(Self {
            search: AttractorSearch::new(config, seed)?,
            current: None,
            colormap: ColorMap::Inferno,
            buffer: vec![0; WINDOW_WIDTH * WINDOW_HEIGHT],
            needs_redraw: true,
            save_counter: 0,
        })
    }

    /// 探索を進めて次のアトラクタに切り替える
    fn advance(&mut self) -> Result<()> {
        let start = Instant::now();
        let accepted = self
            .search
            .next()
            .ok_or_else(|| anyhow!("探索が終了しています"))??;
        println!(
            "次のアトラクタ: {:.2?} | {} | 被覆率 {:.1}% | 試行 #{}",
            start.elapsed(),
            accepted.params,
            accepted.coverage * 100.0,
            accepted.attempt
        );
        self.current = Some(accepted);
        self.needs_redraw = true;
        Ok(())
    }

    fn cycle_colormap(&mut self) {
        self.colormap = self.colormap.next();
        println!("カラーマップ: {}", self.colormap);
        self.needs_redraw = true;
    }

    /// アトラクタ画像とパネルを合成
    fn compose_buffer(&mut self) {
        let Some(current) = &self.current else {
            return;
        };
        let image = render_buffer(&current.histogram, self.colormap);
        for y in 0..VIEW_HEIGHT {
            let src = &image[y * VIEW_WIDTH..(y + 1) * VIEW_WIDTH];
            self.buffer[y * WINDOW_WIDTH..y * WINDOW_WIDTH + VIEW_WIDTH].copy_from_slice(src);
        }
        draw_panel(
            &mut self.buffer,
            WINDOW_WIDTH,
            WINDOW_HEIGHT,
            VIEW_WIDTH,
            self.colormap,
            &current.params,
        );
        self.needs_redraw = false;
    }

    fn title(&self) -> String {
        match &self.current {
            Some(current) => format!("クリフォード・アトラクタ [{}] {}", self.colormap, current.params),
            None => "クリフォード・アトラクタ".to_string(),
        }
    }

    fn save_image(&mut self) -> Result<()> {
        self.save_counter += 1;
        let filename = format!("clifford_view_{:03}.png", self.save_counter);
        let image = buffer_to_image(&self.buffer, WINDOW_WIDTH, WINDOW_HEIGHT);
        save_png(&image, &filename).context("画像の保存に失敗しました")?;
        println!("画像を保存しました: {}", filename);
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║  クリフォード・アトラクタ ビューア                           ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("操作方法:");
    println!("  - N キー: 次のアトラクタ");
    println!("  - C キー: カラーマップ切替");
    println!("  - S キー: 現在の表示を画像として保存");
    println!("  - Q / Escape キー: 終了");
    println!();

    let seed = std::env::args()
        .nth(1)
        .map(|s| s.parse::<u64>())
        .transpose()
        .context("シードは整数で指定してください")?
        .unwrap_or_else(rand::random);
    info!("シード: {}", seed);

    let mut state = ViewerState::new(seed)?;
    state.advance()?;

    let mut window = Window::new(
        "クリフォード・アトラクタ",
        WINDOW_WIDTH,
        WINDOW_HEIGHT,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )
    .context("ウィンドウの作成に失敗しました")?;

    window.set_target_fps(60);

    while window.is_open() && !window.is_key_down(Key::Escape) && !window.is_key_down(Key::Q) {
        if window.is_key_pressed(Key::N, KeyRepeat::No) {
            if let Err(e) = state.advance() {
                warn!("{:#}", e);
            }
        }

        if window.is_key_pressed(Key::C, KeyRepeat::No) {
            state.cycle_colormap();
        }

        if window.is_key_pressed(Key::S, KeyRepeat::No) {
            if let Err(e) = state.save_image() {
                warn!("{:#}", e);
            }
        }

        if state.needs_redraw {
            state.compose_buffer();
            window.set_title(&state.title());
        }

        window
            .update_with_buffer(&state.buffer, WINDOW_WIDTH, WINDOW_HEIGHT)
            .context("バッファの更新に失敗しました")?;
    }

    println!("終了しました");
    Ok(())
}
