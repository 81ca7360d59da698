//! サイドパネル（カラーバー + パラメータ表示）

use super::attractor::Params;
use super::colors::ColorMap;
use super::constants::*;
use super::font::draw_text;

/// `x0` から幅 `PANEL_WIDTH` の領域にパネルを描画
pub fn draw_panel(
    buffer: &mut [u32],
    buffer_width: usize,
    buffer_height: usize,
    x0: usize,
    colormap: ColorMap,
    params: &Params,
) {
    let x_end = (x0 + PANEL_WIDTH).min(buffer_width);

    // 背景をグレーに
    for y in 0..buffer_height {
        for x in x0..x_end {
            buffer[y * buffer_width + x] = PANEL_BACKGROUND;
        }
    }

    let bar_x_start = x0 + PANEL_MARGIN;
    let bar_x_end = bar_x_start + PANEL_BAR_WIDTH;
    let margin = (buffer_height / 10).min(40).max(1);
    let bar_y_start = margin;
    let bar_y_end = buffer_height.saturating_sub(margin);

    if bar_y_end > bar_y_start && bar_x_end < x_end {
        let bar_height = bar_y_end - bar_y_start;

        // カラーバー本体（上が最大）
        for y in bar_y_start..bar_y_end {
            let t = 1.0 - (y - bar_y_start) as f64 / bar_height as f64;
            let color = colormap.sample_u32(t);
            for x in bar_x_start..bar_x_end {
                buffer[y * buffer_width + x] = color;
            }
        }

        // 枠線
        let border_color = 0xFFFFFF;
        for x in bar_x_start..bar_x_end {
            buffer[(bar_y_start - 1) * buffer_width + x] = border_color;
            buffer[bar_y_end * buffer_width + x] = border_color;
        }
        for y in (bar_y_start - 1)..=bar_y_end {
            buffer[y * buffer_width + bar_x_start - 1] = border_color;
            buffer[y * buffer_width + bar_x_end] = border_color;
        }
    }

    // パラメータ値
    let label_x = bar_x_end + 6;
    let labels = [
        ('a', params.a()),
        ('b', params.b()),
        ('c', params.c()),
        ('d', params.d()),
    ];
    for (i, (name, value)) in labels.into_iter().enumerate() {
        let label = format!("{}={:.2}", name, value);
        draw_text(
            buffer,
            buffer_width,
            buffer_height,
            label_x,
            bar_y_start + i * 12,
            &label,
            PANEL_TEXT,
        );
    }
}

/// 画像バッファの右側にパネルを付けた新しいバッファを返す
///
/// 戻り値の幅は `width + PANEL_WIDTH`。
pub fn compose_with_panel(
    image: &[u32],
    width: usize,
    height: usize,
    colormap: ColorMap,
    params: &Params,
) -> Vec<u32> {
    let total_width = width + PANEL_WIDTH;
    let mut buffer = vec![0u32; total_width * height];
    for (dst, src) in buffer.chunks_mut(total_width).zip(image.chunks(width)) {
        dst[..width].copy_from_slice(src);
    }
    draw_panel(&mut buffer, total_width, height, width, colormap, params);
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composed_buffer_keeps_image_and_adds_panel() {
        let params = Params::new(-1.4, 1.6, 1.0, 0.7).unwrap();
        let image = vec![0x123456u32; 10 * 200];
        let out = compose_with_panel(&image, 10, 200, ColorMap::Hot, &params);
        assert_eq!(out.len(), (10 + PANEL_WIDTH) * 200);
        let w = 10 + PANEL_WIDTH;
        for y in 0..200 {
            assert!(out[y * w..y * w + 10].iter().all(|&p| p == 0x123456));
        }
        // 左上は背景、カラーバー上端は最大色
        assert_eq!(out[10], PANEL_BACKGROUND);
        let bar_top = 20 * w + 10 + PANEL_MARGIN;
        assert_eq!(out[bar_top], ColorMap::Hot.sample_u32(1.0));
        assert!(out.iter().any(|&p| p == PANEL_TEXT));
    }

    #[test]
    fn tiny_height_does_not_panic() {
        let params = Params::new(0.0, 0.0, 0.0, 0.0).unwrap();
        for h in 1..6 {
            let image = vec![0u32; 3 * h];
            let out = compose_with_panel(&image, 3, h, ColorMap::Gray, &params);
            assert_eq!(out.len(), (3 + PANEL_WIDTH) * h);
        }
    }
}
