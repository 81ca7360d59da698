//! クリフォード・アトラクタ計算のPython拡張
//!
//! PyO3を使用してノートブックから呼び出せるモジュールとして提供

use clifford::{AttractorError, Histogram, Params};
use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray1, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rayon::prelude::*;

fn to_py_err(e: AttractorError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn to_array<'py>(py: Python<'py>, hist: Histogram) -> PyResult<Bound<'py, PyArray2<f32>>> {
    let shape = (hist.bins_x(), hist.bins_y());
    let array = Array2::from_shape_vec(shape, hist.into_vec())
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(array.into_pyarray(py))
}

/// 軌道を計算する
///
/// # Returns
/// (x, y) の1次元配列のタプル（長さ n）
#[pyfunction]
fn trajectory<'py>(
    py: Python<'py>,
    n: usize,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>)> {
    let params = Params::new(a, b, c, d).map_err(to_py_err)?;
    let traj = py
        .allow_threads(|| clifford::trajectory(n, &params))
        .map_err(to_py_err)?;
    Ok((traj.xs.into_pyarray(py), traj.ys.into_pyarray(py)))
}

/// 密度ヒストグラムを計算する
///
/// # Returns
/// 形状 (bins_x, bins_y) の float32 配列
#[pyfunction]
fn histogram<'py>(
    py: Python<'py>,
    n: usize,
    bins_x: usize,
    bins_y: usize,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
) -> PyResult<Bound<'py, PyArray2<f32>>> {
    let params = Params::new(a, b, c, d).map_err(to_py_err)?;
    let hist = py
        .allow_threads(|| clifford::histogram(n, bins_x, bins_y, &params))
        .map_err(to_py_err)?;
    to_array(py, hist)
}

/// 複数のパラメータのヒストグラムをまとめて計算する
///
/// rayonによる並列計算で高速化
#[pyfunction]
fn histograms_batch<'py>(
    py: Python<'py>,
    n: usize,
    bins_x: usize,
    bins_y: usize,
    params_list: Vec<(f64, f64, f64, f64)>,
) -> PyResult<Vec<Bound<'py, PyArray2<f32>>>> {
    let params = params_list
        .into_iter()
        .map(|(a, b, c, d)| Params::new(a, b, c, d))
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_py_err)?;

    let hists = py
        .allow_threads(|| {
            params
                .par_iter()
                .map(|p| clifford::histogram(n, bins_x, bins_y, p))
                .collect::<Result<Vec<_>, _>>()
        })
        .map_err(to_py_err)?;

    hists.into_iter().map(|h| to_array(py, h)).collect()
}

/// Python モジュール定義
#[pymodule]
fn clifford_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(trajectory, m)?)?;
    m.add_function(wrap_pyfunction!(histogram, m)?)?;
    m.add_function(wrap_pyfunction!(histograms_batch, m)?)?;
    Ok(())
}
