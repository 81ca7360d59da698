//! クリフォード・アトラクタの計算関数
//!
//! 漸化式:
//!   x' = sin(a*y) + c*cos(a*x)
//!   y' = sin(b*x) + d*cos(b*y)

use super::constants::NEIGHBOR_WEIGHT;
use super::error::{AttractorError, Result};
use serde::Serialize;

/// アトラクタを決める4つのパラメータ（生成後は不変）
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Params {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Params {
    /// NaN や無限大を含む場合はエラー
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        for (name, value) in [("a", a), ("b", b), ("c", c), ("d", d)] {
            if !value.is_finite() {
                return Err(AttractorError::NonFiniteParameter { name, value });
            }
        }
        Ok(Self { a, b, c, d })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn d(&self) -> f64 {
        self.d
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// 1ステップ進める
    #[inline]
    pub fn step(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (self.a * y).sin() + self.c * (self.a * x).cos(),
            (self.b * x).sin() + self.d * (self.b * y).cos(),
        )
    }

    /// 漸化式の値域を解析的に求めた範囲
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min_x: -1.0 - self.c.abs(),
            max_x: 1.0 + self.c.abs(),
            min_y: -1.0 - self.d.abs(),
            max_y: 1.0 + self.d.abs(),
        }
    }
}

impl std::fmt::Display for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "a={:.2} b={:.2} c={:.2} d={:.2}",
            self.a, self.b, self.c, self.d
        )
    }
}

/// 軸に平行な描画範囲
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// 座標をビン番号に変換
    ///
    /// 範囲は閉区間なので `max` ちょうどの点は最後のビンに入れる
    /// （例: c=0 で sin(a*y) が丁度 1.0 に丸められた場合）。
    #[inline]
    pub fn bin_index(&self, x: f64, y: f64, bins_x: usize, bins_y: usize) -> (usize, usize) {
        (
            to_bin(x, self.min_x, self.max_x, bins_x),
            to_bin(y, self.min_y, self.max_y, bins_y),
        )
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

#[inline]
fn to_bin(v: f64, min: f64, max: f64, bins: usize) -> usize {
    let scaled = (bins as f64 * (v - min) / (max - min)).floor();
    // 負値の `as usize` は 0 に飽和する
    (scaled as usize).min(bins - 1)
}

/// 軌道（x, y の列）
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

/// 原点から n 点の軌道を生成
pub fn trajectory(n: usize, params: &Params) -> Result<Trajectory> {
    if n == 0 {
        return Err(AttractorError::ZeroIterations);
    }

    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    let (mut x, mut y) = (0.0, 0.0);
    xs.push(x);
    ys.push(y);

    for _ in 1..n {
        (x, y) = params.step(x, y);
        xs.push(x);
        ys.push(y);
    }

    Ok(Trajectory { xs, ys })
}

/// 密度ヒストグラム（bins_x × bins_y、x方向が外側の添字）
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    bins_x: usize,
    bins_y: usize,
    counts: Vec<f32>,
}

impl Histogram {
    fn zeros(bins_x: usize, bins_y: usize) -> Self {
        Self {
            bins_x,
            bins_y,
            counts: vec![0.0; bins_x * bins_y],
        }
    }

    pub fn bins_x(&self) -> usize {
        self.bins_x
    }

    pub fn bins_y(&self) -> usize {
        self.bins_y
    }

    pub fn get(&self, idx: usize, idy: usize) -> f32 {
        self.counts[idx * self.bins_y + idy]
    }

    /// x方向優先の生データ
    pub fn as_slice(&self) -> &[f32] {
        &self.counts
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.counts
    }

    pub fn total(&self) -> f64 {
        self.counts.iter().map(|&v| v as f64).sum()
    }

    pub fn max(&self) -> f32 {
        self.counts.iter().copied().fold(0.0, f32::max)
    }

    pub fn nonzero_count(&self) -> usize {
        self.counts.iter().filter(|&&v| v > 0.0).count()
    }

    /// 非ゼロビンの割合
    pub fn coverage(&self) -> f64 {
        self.nonzero_count() as f64 / self.counts.len() as f64
    }

    #[inline]
    fn add(&mut self, idx: usize, idy: usize, weight: f32) {
        self.counts[idx * self.bins_y + idy] += weight;
    }

    /// 中心に1、範囲内の上下左右に0.25を加算（はみ出す近傍は無視）
    #[inline]
    fn stamp(&mut self, idx: usize, idy: usize) {
        self.add(idx, idy, 1.0);
        if idx > 0 {
            self.add(idx - 1, idy, NEIGHBOR_WEIGHT);
        }
        if idx + 1 < self.bins_x {
            self.add(idx + 1, idy, NEIGHBOR_WEIGHT);
        }
        if idy > 0 {
            self.add(idx, idy - 1, NEIGHBOR_WEIGHT);
        }
        if idy + 1 < self.bins_y {
            self.add(idx, idy + 1, NEIGHBOR_WEIGHT);
        }
    }
}

/// 軌道を保持せずに n-1 ステップ分の密度を直接集計
pub fn histogram(n: usize, bins_x: usize, bins_y: usize, params: &Params) -> Result<Histogram> {
    if n == 0 {
        return Err(AttractorError::ZeroIterations);
    }
    if bins_x == 0 || bins_y == 0 {
        return Err(AttractorError::ZeroBins { bins_x, bins_y });
    }

    let bounds = params.bounds();
    let mut hist = Histogram::zeros(bins_x, bins_y);
    let (mut x, mut y) = (0.0, 0.0);

    for _ in 1..n {
        (x, y) = params.step(x, y);
        let (idx, idy) = bounds.bin_index(x, y, bins_x, bins_y);
        hist.stamp(idx, idy);
    }

    Ok(hist)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(a: f64, b: f64, c: f64, d: f64) -> Params {
        Params::new(a, b, c, d).unwrap()
    }

    #[test]
    fn rejects_non_finite_parameters() {
        let err = Params::new(1.0, f64::NAN, 0.0, 0.0).unwrap_err();
        assert!(matches!(
            err,
            AttractorError::NonFiniteParameter { name: "b", .. }
        ));
        assert!(Params::new(f64::INFINITY, 0.0, 0.0, 0.0).is_err());
        assert!(Params::new(0.0, 0.0, 0.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn single_point_trajectory_is_origin() {
        let t = trajectory(1, &params(1.7, 1.7, 0.6, 1.2)).unwrap();
        assert_eq!(t.xs, vec![0.0]);
        assert_eq!(t.ys, vec![0.0]);
    }

    #[test]
    fn trajectory_follows_recurrence() {
        let p = params(-1.4, 1.6, 1.0, 0.7);
        assert_eq!(p.as_array(), [p.a(), p.b(), p.c(), p.d()]);
        let t = trajectory(4, &p).unwrap();
        assert_eq!(t.len(), 4);
        // x[1] = sin(0) + c*cos(0) = c, y[1] = sin(0) + d*cos(0) = d
        assert_eq!(t.xs[1], 1.0);
        assert_eq!(t.ys[1], 0.7);
        for i in 1..t.len() {
            let (x, y) = p.step(t.xs[i - 1], t.ys[i - 1]);
            assert_eq!((t.xs[i], t.ys[i]), (x, y));
        }
    }

    #[test]
    fn zero_iterations_rejected() {
        let p = params(1.0, 1.0, 1.0, 1.0);
        assert!(matches!(
            trajectory(0, &p),
            Err(AttractorError::ZeroIterations)
        ));
        assert!(matches!(
            histogram(0, 8, 8, &p),
            Err(AttractorError::ZeroIterations)
        ));
    }

    #[test]
    fn zero_bins_rejected() {
        let p = params(1.0, 1.0, 1.0, 1.0);
        assert!(matches!(
            histogram(10, 0, 8, &p),
            Err(AttractorError::ZeroBins { bins_x: 0, bins_y: 8 })
        ));
    }

    #[test]
    fn single_iteration_histogram_is_empty() {
        let h = histogram(1, 16, 16, &params(1.7, 1.7, 0.6, 1.2)).unwrap();
        assert_eq!(h.total(), 0.0);
        assert_eq!(h.nonzero_count(), 0);
    }

    #[test]
    fn max_edge_lands_in_last_bin() {
        let b = params(0.0, 0.0, 0.0, 0.0).bounds();
        assert_eq!(b.bin_index(1.0, 1.0, 10, 20), (9, 19));
        assert_eq!(b.bin_index(-1.0, -1.0, 10, 20), (0, 0));
        assert_eq!(b.bin_index(0.0, 0.0, 10, 20), (5, 10));
    }

    #[test]
    fn stamp_skips_out_of_range_neighbours() {
        let mut h = Histogram::zeros(3, 3);
        h.stamp(0, 0);
        assert_eq!(h.get(0, 0), 1.0);
        assert_eq!(h.get(1, 0), 0.25);
        assert_eq!(h.get(0, 1), 0.25);
        assert_eq!(h.total(), 1.5);

        h.stamp(1, 1);
        assert_eq!(h.get(1, 1), 1.0);
        assert_eq!(h.get(1, 0), 0.5);
        assert_eq!(h.total(), 3.5);
    }

    #[test]
    fn coverage_counts_nonzero_fraction() {
        let mut h = Histogram::zeros(4, 5);
        assert_eq!(h.coverage(), 0.0);
        h.stamp(2, 2);
        assert_eq!(h.nonzero_count(), 5);
        assert!((h.coverage() - 0.25).abs() < 1e-12);
    }
}
