//! ランダム探索
//!
//! 離散化した範囲からパラメータを一様に選び、ヒストグラムを計算して
//! 非ゼロビンの割合が小さい（ほぼ空っぽの）ものを棄却する。
//! 採用されたアトラクタを遅延的に返すイテレータとして提供する。

use super::attractor::{histogram, Histogram, Params};
use super::constants::*;
use super::error::{AttractorError, Result};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::VecDeque;
use std::iter::FusedIterator;

/// パラメータの離散化範囲 `min, min+step, ..., max`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamRange {
    min: f64,
    max: f64,
    step: f64,
    count: usize,
}

impl ParamRange {
    /// 値の個数が usize に収まらない範囲（刻みが細かすぎる・幅が大きすぎる）も拒否する
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self> {
        let invalid = AttractorError::InvalidRange { min, max, step };
        let valid = min.is_finite() && max.is_finite() && step.is_finite();
        if !valid || step <= 0.0 || max < min {
            return Err(invalid);
        }

        // 端点が浮動小数の誤差で落ちないよう少しだけ余裕を持たせる
        let count = ((max - min) / step + 1e-9).floor() + 1.0;
        if !count.is_finite() || count >= usize::MAX as f64 {
            return Err(invalid);
        }

        Ok(Self {
            min,
            max,
            step,
            count: count as usize,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// 取りうる値の個数
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn value(&self, i: usize) -> f64 {
        self.min + i as f64 * self.step
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.value(rng.gen_range(0..self.len()))
    }
}

impl Default for ParamRange {
    fn default() -> Self {
        Self {
            min: PARAM_MIN,
            max: PARAM_MAX,
            step: PARAM_STEP,
            count: ((PARAM_MAX - PARAM_MIN) / PARAM_STEP + 1e-9).floor() as usize + 1,
        }
    }
}

/// 探索設定
#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub iterations: usize,
    pub bins_x: usize,
    pub bins_y: usize,
    pub min_coverage: f64,
    pub range: ParamRange,
    /// None なら上限なし（採用されるまで無限に試行しうる）
    pub max_attempts: Option<u64>,
    /// 並列に評価する候補の数
    pub batch_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: SEARCH_ITERATIONS,
            bins_x: DEFAULT_BINS_X,
            bins_y: DEFAULT_BINS_Y,
            min_coverage: MIN_COVERAGE,
            range: ParamRange::default(),
            max_attempts: Some(MAX_ATTEMPTS),
            batch_size: rayon::current_num_threads(),
        }
    }
}

impl SearchConfig {
    fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(AttractorError::ZeroIterations);
        }
        if self.bins_x == 0 || self.bins_y == 0 {
            return Err(AttractorError::ZeroBins {
                bins_x: self.bins_x,
                bins_y: self.bins_y,
            });
        }
        if !(0.0..=1.0).contains(&self.min_coverage) {
            return Err(AttractorError::InvalidCoverage(self.min_coverage));
        }
        Ok(())
    }
}

/// 採用されたアトラクタ
#[derive(Clone, Debug)]
pub struct Accepted {
    /// 採用順の通し番号（0始まり）
    pub index: usize,
    pub params: Params,
    pub histogram: Histogram,
    pub coverage: f64,
    /// 何回目の試行で採用されたか（1始まり）
    pub attempt: u64,
}

/// 評価済みで、まだ採否を確定していない候補
struct Evaluated {
    params: Params,
    /// 棄却が決まった候補のヒストグラムは保持しない
    histogram: Option<Histogram>,
    coverage: f64,
}

/// 採用されたアトラクタを順に返すイテレータ
///
/// 試行回数の上限に達すると `SearchExhausted` を一度だけ返して終了する。
/// 候補はバッチ単位で並列に評価するが、乱数の消費順と採否の判定順は
/// 逐次ループと同じなので、同じシードなら結果も同じになる。
/// 試行回数は候補を取り出した時点で数えるため、バッチの大きさにも依存しない。
pub struct AttractorSearch<R: Rng = StdRng> {
    config: SearchConfig,
    rng: R,
    attempts: u64,
    accepted: usize,
    queue: VecDeque<Evaluated>,
    done: bool,
}

impl AttractorSearch<StdRng> {
    pub fn new(config: SearchConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> AttractorSearch<R> {
    pub fn with_rng(config: SearchConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            attempts: 0,
            accepted: 0,
            queue: VecDeque::new(),
            done: false,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// 採否を確定させた候補の数（最後に返した結果の試行番号、上限到達時は上限値）
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    fn draw(&mut self) -> Result<Params> {
        let range = self.config.range;
        let [a, b, c, d] = [(); 4].map(|_| range.sample(&mut self.rng));
        Params::new(a, b, c, d)
    }

    fn remaining_attempts(&self) -> Option<u64> {
        self.config
            .max_attempts
            .map(|max| max.saturating_sub(self.attempts))
    }

    /// 次のバッチを並列に評価して `queue` に積む（キューが空のときだけ呼ぶ）
    fn run_batch(&mut self) -> Result<()> {
        let mut batch = self.config.batch_size.max(1);
        if let Some(remaining) = self.remaining_attempts() {
            batch = batch.min(remaining as usize);
        }

        let candidates = (0..batch)
            .map(|_| self.draw())
            .collect::<Result<Vec<_>>>()?;

        let SearchConfig {
            iterations,
            bins_x,
            bins_y,
            min_coverage,
            ..
        } = self.config;
        let evaluated = candidates
            .into_par_iter()
            .map(|params| {
                let hist = histogram(iterations, bins_x, bins_y, &params)?;
                let coverage = hist.coverage();
                Ok(Evaluated {
                    params,
                    histogram: (coverage >= min_coverage).then_some(hist),
                    coverage,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.queue.extend(evaluated);
        Ok(())
    }

    /// キューの先頭の採否を確定させる
    fn decide(&mut self, candidate: Evaluated) -> Option<Accepted> {
        self.attempts += 1;
        let Evaluated {
            params,
            histogram,
            coverage,
        } = candidate;

        let Some(histogram) = histogram else {
            debug!(
                "棄却 #{}: {} (被覆率 {:.1}%)",
                self.attempts,
                params,
                coverage * 100.0
            );
            return None;
        };

        info!(
            "採用 {} (試行 #{}): {} (被覆率 {:.1}%)",
            self.accepted + 1,
            self.attempts,
            params,
            coverage * 100.0
        );
        let accepted = Accepted {
            index: self.accepted,
            params,
            histogram,
            coverage,
            attempt: self.attempts,
        };
        self.accepted += 1;
        Some(accepted)
    }
}

impl<R: Rng> Iterator for AttractorSearch<R> {
    type Item = Result<Accepted>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }
            if let Some(candidate) = self.queue.pop_front() {
                if let Some(accepted) = self.decide(candidate) {
                    return Some(Ok(accepted));
                }
                continue;
            }
            if self.remaining_attempts() == Some(0) {
                self.done = true;
                warn!("試行回数の上限 {} に達しました", self.attempts);
                return Some(Err(AttractorError::SearchExhausted {
                    attempts: self.attempts,
                }));
            }
            if let Err(e) = self.run_batch() {
                self.done = true;
                return Some(Err(e));
            }
        }
    }
}

impl<R: Rng> FusedIterator for AttractorSearch<R> {}
