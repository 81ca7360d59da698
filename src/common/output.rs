//! 画像ファイルの書き出し

use super::attractor::{Histogram, Params};
use super::colors::ColorMap;
use super::constants::PANEL_WIDTH;
use super::error::Result;
use super::panel::compose_with_panel;
use super::render::{buffer_to_image, render_buffer, save_png};
use rayon::prelude::*;
use std::path::Path;

/// `clifford_{index:03}_{colormap}.png`
pub fn output_filename(index: usize, colormap: ColorMap) -> String {
    format!("clifford_{:03}_{}.png", index, colormap)
}

/// 1つのヒストグラムを全カラーマップで並列に描画して `dir` に保存
///
/// 戻り値は `dir` からの相対ファイル名（`colormaps` と同じ順）。
pub fn render_to_files(
    hist: &Histogram,
    params: &Params,
    index: usize,
    colormaps: &[ColorMap],
    dir: &Path,
    legend: bool,
) -> Result<Vec<String>> {
    colormaps
        .par_iter()
        .map(|&colormap| {
            let mut buffer = render_buffer(hist, colormap);
            let mut width = hist.bins_x();
            if legend {
                buffer = compose_with_panel(&buffer, width, hist.bins_y(), colormap, params);
                width += PANEL_WIDTH;
            }
            let image = buffer_to_image(&buffer, width, hist.bins_y());
            let filename = output_filename(index, colormap);
            save_png(&image, dir.join(&filename))?;
            Ok(filename)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::attractor::histogram;
    use crate::common::manifest::{Manifest, ManifestEntry};

    #[test]
    fn filenames_are_zero_padded() {
        assert_eq!(output_filename(0, ColorMap::Viridis), "clifford_000_viridis.png");
        assert_eq!(output_filename(42, ColorMap::Hot), "clifford_042_hot.png");
        assert_eq!(output_filename(1234, ColorMap::Gray), "clifford_1234_gray.png");
    }

    #[test]
    fn writes_one_file_per_colormap_and_manifest_points_to_them() {
        let dir = tempfile::tempdir().unwrap();
        let params = Params::new(-1.4, 1.6, 1.0, 0.7).unwrap();
        let hist = histogram(5_000, 30, 20, &params).unwrap();
        let colormaps = [ColorMap::Magma, ColorMap::Bone];

        let files = render_to_files(&hist, &params, 7, &colormaps, dir.path(), false).unwrap();
        assert_eq!(files, vec!["clifford_007_magma.png", "clifford_007_bone.png"]);
        for file in &files {
            let loaded = image::open(dir.path().join(file)).unwrap();
            assert_eq!((loaded.width(), loaded.height()), (30, 20));
        }

        let manifest = Manifest {
            seed: 0,
            iterations: 5_000,
            bins_x: 30,
            bins_y: 20,
            min_coverage: 0.1,
            attempts: 1,
            attractors: vec![ManifestEntry {
                index: 7,
                params,
                coverage: hist.coverage(),
                attempt: 1,
                files,
            }],
        };
        let manifest_path = dir.path().join("manifest.json");
        manifest.write(&manifest_path).unwrap();

        let text = std::fs::read_to_string(&manifest_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let listed = value["attractors"][0]["files"].as_array().unwrap();
        assert_eq!(listed.len(), 2);
        for name in listed {
            assert!(dir.path().join(name.as_str().unwrap()).is_file());
        }
    }

    #[test]
    fn legend_widens_image_by_panel() {
        let dir = tempfile::tempdir().unwrap();
        let params = Params::new(1.7, 1.7, 0.6, 1.2).unwrap();
        let hist = histogram(2_000, 40, 120, &params).unwrap();

        let files =
            render_to_files(&hist, &params, 0, &[ColorMap::Classic], dir.path(), true).unwrap();
        let loaded = image::open(dir.path().join(&files[0])).unwrap();
        assert_eq!(
            (loaded.width(), loaded.height()),
            (40 + PANEL_WIDTH as u32, 120)
        );
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let params = Params::new(0.0, 0.0, 0.0, 0.0).unwrap();
        let hist = histogram(10, 4, 4, &params).unwrap();
        assert!(render_to_files(&hist, &params, 0, &[ColorMap::Gray], &missing, false).is_err());
    }
}
