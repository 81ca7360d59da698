//! ヒストグラムから画像への変換

use super::attractor::Histogram;
use super::colors::{u32_to_rgb, ColorMap};
use super::error::Result;
use image::{ImageBuffer, Rgb, RgbImage};
use rayon::prelude::*;
use std::path::Path;

/// 対数コントラスト変換 log10(1+v)
#[inline]
pub fn log_contrast(value: f32) -> f64 {
    (1.0 + value as f64).log10()
}

/// ヒストグラムを 0xRRGGBB のバッファに変換
///
/// 幅 = bins_x、高さ = bins_y。y は上向き（先頭行が max_y）。
/// 全ビンが0なら全画素がカラーマップの t=0 の色になる。
pub fn render_buffer(hist: &Histogram, colormap: ColorMap) -> Vec<u32> {
    let width = hist.bins_x();
    let height = hist.bins_y();
    let peak = log_contrast(hist.max());
    let scale = if peak > 0.0 { 1.0 / peak } else { 0.0 };

    let mut buffer = vec![0u32; width * height];

    // 並列計算 (行単位で並列化)
    buffer
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, row_data)| {
            let idy = height - 1 - row;
            for (idx, pixel) in row_data.iter_mut().enumerate() {
                let t = log_contrast(hist.get(idx, idy)) * scale;
                *pixel = colormap.sample_u32(t);
            }
        });

    buffer
}

/// 0xRRGGBB のバッファを RGB 画像に変換
pub fn buffer_to_image(buffer: &[u32], width: usize, height: usize) -> RgbImage {
    ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        Rgb(u32_to_rgb(buffer[(y as usize) * width + (x as usize)]))
    })
}

pub fn render_histogram(hist: &Histogram, colormap: ColorMap) -> RgbImage {
    let buffer = render_buffer(hist, colormap);
    buffer_to_image(&buffer, hist.bins_x(), hist.bins_y())
}

pub fn save_png(image: &RgbImage, path: impl AsRef<Path>) -> Result<()> {
    image.save(path.as_ref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::attractor::{histogram, Params};

    #[test]
    fn log_contrast_is_strictly_monotonic() {
        let samples = [0.0f32, 0.25, 0.5, 1.0, 1.25, 10.0, 1e3, 1e6, 1e8];
        assert_eq!(log_contrast(0.0), 0.0);
        assert!((log_contrast(9.0) - 1.0).abs() < 1e-12);
        for pair in samples.windows(2) {
            assert!(log_contrast(pair[0]) < log_contrast(pair[1]));
        }
    }

    #[test]
    fn empty_histogram_renders_background() {
        let p = Params::new(1.7, 1.7, 0.6, 1.2).unwrap();
        let h = histogram(1, 4, 3, &p).unwrap();
        let buffer = render_buffer(&h, ColorMap::Viridis);
        assert_eq!(buffer.len(), 12);
        let background = ColorMap::Viridis.sample_u32(0.0);
        assert!(buffer.iter().all(|&px| px == background));
    }

    #[test]
    fn hot_cell_is_brightest_and_y_points_up() {
        let p = Params::new(0.0, 0.0, 0.0, 0.0).unwrap();
        let h = histogram(100, 4, 4, &p).unwrap();
        let image = render_histogram(&h, ColorMap::Gray);
        assert_eq!(image.dimensions(), (4, 4));
        // (0,0) はビン (2,2)、画像では行 4-1-2 = 1
        assert_eq!(image.get_pixel(2, 1).0, [255, 255, 255]);
        assert_eq!(image.get_pixel(0, 3).0, [0, 0, 0]);
        let neighbour = image.get_pixel(2, 0).0[0];
        assert!(neighbour > 0 && neighbour < 255);
    }
}
