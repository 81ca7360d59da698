//! 探索結果の一覧（manifest.json）

use super::attractor::Params;
use super::error::Result;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct ManifestEntry {
    pub index: usize,
    pub params: Params,
    pub coverage: f64,
    pub attempt: u64,
    pub files: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Manifest {
    pub seed: u64,
    pub iterations: usize,
    pub bins_x: usize,
    pub bins_y: usize,
    pub min_coverage: f64,
    pub attempts: u64,
    pub attractors: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
