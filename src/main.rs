//! クリフォード・アトラクタ描画ツール（バッチ版）
//!
//! サブコマンド:
//!   - render:     指定パラメータのアトラクタを各カラーマップで描画
//!   - search:     ランダム探索で見栄えのするアトラクタを集めて描画
//!   - trajectory: 軌道を CSV で標準出力に書き出す
//!
//! ログは RUST_LOG=debug などで詳細表示

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clifford::common::{
    attractor::{histogram, trajectory, Histogram, Params},
    colors::ColorMap,
    constants::*,
    error::AttractorError,
    manifest::{Manifest, ManifestEntry},
    output,
    search::{AttractorSearch, ParamRange, SearchConfig},
};
use log::{info, warn};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(version, about = "クリフォード・アトラクタの探索と描画")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 指定パラメータのアトラクタを描画
    Render(RenderArgs),
    /// ランダム探索して採用されたアトラクタを描画
    Search(SearchArgs),
    /// 軌道を CSV (x,y) で出力
    Trajectory(TrajectoryArgs),
}

#[derive(Args)]
struct ParamArgs {
    #[arg(long, allow_negative_numbers = true)]
    a: f64,
    #[arg(long, allow_negative_numbers = true)]
    b: f64,
    #[arg(long, allow_negative_numbers = true)]
    c: f64,
    #[arg(long, allow_negative_numbers = true)]
    d: f64,
}

impl ParamArgs {
    fn to_params(&self) -> Result<Params> {
        Ok(Params::new(self.a, self.b, self.c, self.d)?)
    }
}

#[derive(Args)]
struct OutputArgs {
    /// ヒストグラムの幅（= 画像の幅）
    #[arg(long, default_value_t = DEFAULT_BINS_X)]
    width: usize,
    /// ヒストグラムの高さ（= 画像の高さ）
    #[arg(long, default_value_t = DEFAULT_BINS_Y)]
    height: usize,
    /// カラーマップ（カンマ区切りで複数指定可）
    #[arg(long, value_delimiter = ',', default_values_t = [ColorMap::Viridis, ColorMap::Inferno, ColorMap::Hot])]
    colormap: Vec<ColorMap>,
    /// 出力ディレクトリ
    #[arg(short, long, default_value = "output")]
    output: PathBuf,
    /// カラーバーとパラメータ値のパネルを付ける
    #[arg(long)]
    legend: bool,
}

#[derive(Args)]
struct RenderArgs {
    #[command(flatten)]
    params: ParamArgs,
    #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct SearchArgs {
    /// 採用するアトラクタの数
    #[arg(long, default_value_t = SEARCH_COUNT)]
    count: usize,
    /// 乱数シード（省略時はランダム）
    #[arg(long)]
    seed: Option<u64>,
    #[arg(short = 'n', long, default_value_t = SEARCH_ITERATIONS)]
    iterations: usize,
    /// 非ゼロビンの割合の下限
    #[arg(long, default_value_t = MIN_COVERAGE)]
    min_coverage: f64,
    #[arg(long, default_value_t = PARAM_MIN, allow_negative_numbers = true)]
    param_min: f64,
    #[arg(long, default_value_t = PARAM_MAX, allow_negative_numbers = true)]
    param_max: f64,
    #[arg(long, default_value_t = PARAM_STEP)]
    param_step: f64,
    /// 試行回数の上限
    #[arg(long, default_value_t = MAX_ATTEMPTS, conflicts_with = "unbounded")]
    max_attempts: u64,
    /// 試行回数の上限を設けない
    #[arg(long)]
    unbounded: bool,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct TrajectoryArgs {
    #[command(flatten)]
    params: ParamArgs,
    #[arg(short = 'n', long, default_value_t = 10_000)]
    iterations: usize,
}

/// 1つのヒストグラムを全カラーマップで描画して保存
fn render_to_files(
    hist: &Histogram,
    params: &Params,
    index: usize,
    args: &OutputArgs,
) -> Result<Vec<String>> {
    output::render_to_files(hist, params, index, &args.colormap, &args.output, args.legend)
        .with_context(|| format!("画像の保存に失敗しました: {}", args.output.display()))
}

/// 上限到達で目標数に届かなかったときの表示（ログ設定に関係なく画面に出す）
fn shortfall_message(attempts: u64, found: usize, wanted: usize) -> String {
    format!(
        "{}回の試行で {}/{} 個しか見つかりませんでした",
        attempts, found, wanted
    )
}

fn prepare_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("出力ディレクトリを作成できません: {}", dir.display()))
}

fn run_render(args: RenderArgs) -> Result<()> {
    let params = args.params.to_params()?;
    prepare_output_dir(&args.output.output)?;

    let start = Instant::now();
    let hist = histogram(
        args.iterations,
        args.output.width,
        args.output.height,
        &params,
    )?;
    println!(
        "計算完了: {:.2?} | {} | 被覆率 {:.1}%",
        start.elapsed(),
        params,
        hist.coverage() * 100.0
    );

    let files = render_to_files(&hist, &params, 0, &args.output)?;
    for file in &files {
        println!("画像を保存しました: {}", args.output.output.join(file).display());
    }
    Ok(())
}

fn run_search(args: SearchArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = SearchConfig {
        iterations: args.iterations,
        bins_x: args.output.width,
        bins_y: args.output.height,
        min_coverage: args.min_coverage,
        range: ParamRange::new(args.param_min, args.param_max, args.param_step)?,
        max_attempts: (!args.unbounded).then_some(args.max_attempts),
        ..SearchConfig::default()
    };
    prepare_output_dir(&args.output.output)?;

    let start = Instant::now();
    let mut search = AttractorSearch::new(config, seed)?;

    let range = search.config().range;
    println!(
        "🔍 探索開始: シード {} / 目標 {}個 / 範囲 [{}, {}] 刻み {}",
        seed,
        args.count,
        range.min(),
        range.max(),
        range.step()
    );
    info!("探索設定: {:?}", search.config());
    let mut entries = Vec::with_capacity(args.count);

    for item in search.by_ref().take(args.count) {
        let accepted = match item {
            Ok(accepted) => accepted,
            Err(AttractorError::SearchExhausted { attempts }) => {
                let message = shortfall_message(attempts, entries.len(), args.count);
                warn!("{}", message);
                println!("⚠️  {}", message);
                break;
            }
            Err(e) => return Err(e.into()),
        };

        let files = render_to_files(
            &accepted.histogram,
            &accepted.params,
            accepted.index,
            &args.output,
        )?;
        println!(
            "✅ {:>3}: {} | 被覆率 {:>5.1}% | 試行 #{}",
            accepted.index,
            accepted.params,
            accepted.coverage * 100.0,
            accepted.attempt
        );
        entries.push(ManifestEntry {
            index: accepted.index,
            params: accepted.params,
            coverage: accepted.coverage,
            attempt: accepted.attempt,
            files,
        });
    }

    let config = search.config();
    let manifest = Manifest {
        seed,
        iterations: config.iterations,
        bins_x: config.bins_x,
        bins_y: config.bins_y,
        min_coverage: config.min_coverage,
        attempts: search.attempts(),
        attractors: entries,
    };
    let manifest_path = args.output.output.join("manifest.json");
    manifest
        .write(&manifest_path)
        .with_context(|| format!("manifest の書き込みに失敗しました: {}", manifest_path.display()))?;

    println!(
        "探索完了: {:.2?} | 採用 {}個 / 試行 {}回 | {}",
        start.elapsed(),
        manifest.attractors.len(),
        manifest.attempts,
        manifest_path.display()
    );
    Ok(())
}

fn run_trajectory(args: TrajectoryArgs) -> Result<()> {
    let params = args.params.to_params()?;
    let traj = trajectory(args.iterations, &params)?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(out, "x,y")?;
    for (x, y) in traj.points() {
        writeln!(out, "{},{}", x, y)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Render(args) => run_render(args),
        Command::Search(args) => run_search(args),
        Command::Trajectory(args) => run_trajectory(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortfall_message_reports_counts() {
        assert_eq!(
            shortfall_message(10_000, 3, 20),
            "10000回の試行で 3/20 個しか見つかりませんでした"
        );
    }

    #[test]
    fn search_args_parse_defaults() {
        let cli = Cli::try_parse_from(["clifford", "search", "--seed", "7"]).unwrap();
        let Command::Search(args) = cli.command else {
            panic!("search サブコマンドではありません");
        };
        assert_eq!(args.count, SEARCH_COUNT);
        assert_eq!(args.seed, Some(7));
        assert!(!args.unbounded);
        assert_eq!(
            args.output.colormap,
            vec![ColorMap::Viridis, ColorMap::Inferno, ColorMap::Hot]
        );
    }

    #[test]
    fn negative_parameters_and_colormap_list_parse() {
        let cli = Cli::try_parse_from([
            "clifford", "render", "--a", "-1.4", "--b", "1.6", "--c", "1.0", "--d", "0.7",
            "--colormap", "magma,bone", "--legend",
        ])
        .unwrap();
        let Command::Render(args) = cli.command else {
            panic!("render サブコマンドではありません");
        };
        assert_eq!(args.params.to_params().unwrap().a(), -1.4);
        assert_eq!(args.output.colormap, vec![ColorMap::Magma, ColorMap::Bone]);
        assert!(args.output.legend);
    }

    #[test]
    fn tiny_param_step_is_rejected_as_invalid_range() {
        let result = ParamRange::new(PARAM_MIN, PARAM_MAX, 1e-300);
        assert!(matches!(result, Err(AttractorError::InvalidRange { .. })));
    }
}
