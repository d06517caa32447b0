use episcan_core::core::reference;
use episcan_core::core::scoring::{self, DEFAULT_THRESHOLD, DEFAULT_WINDOW};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

/// Returns every window of `seq` whose hydrophilic fraction is at least
/// `threshold`, as dicts with `peptide`, `start`, `end` and `score` keys.
#[pyfunction]
#[pyo3(signature = (seq, window = DEFAULT_WINDOW, threshold = DEFAULT_THRESHOLD))]
fn predict_epitopes<'py>(
    py: Python<'py>,
    seq: &str,
    window: usize,
    threshold: f64,
) -> PyResult<Vec<Bound<'py, PyDict>>> {
    let candidates = scoring::predict_epitopes(seq, window, threshold)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    candidates
        .into_iter()
        .map(|candidate| {
            let dict = PyDict::new(py);
            dict.set_item("peptide", candidate.peptide)?;
            dict.set_item("start", candidate.start)?;
            dict.set_item("end", candidate.end)?;
            dict.set_item("score", candidate.score)?;
            Ok(dict)
        })
        .collect()
}

#[pyfunction]
fn known_epitopes(py: Python<'_>) -> PyResult<Vec<Bound<'_, PyDict>>> {
    reference::known_epitopes()
        .iter()
        .map(|epitope| {
            let dict = PyDict::new(py);
            dict.set_item("name", epitope.name)?;
            dict.set_item("sequence", epitope.sequence)?;
            dict.set_item("antibody", epitope.antibody)?;
            dict.set_item("location", epitope.location)?;
            dict.set_item("significance", epitope.significance)?;
            Ok(dict)
        })
        .collect()
}

#[pymodule]
fn episcan(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(predict_epitopes, m)?)?;
    m.add_function(wrap_pyfunction!(known_epitopes, m)?)?;
    m.add("DEFAULT_WINDOW", DEFAULT_WINDOW)?;
    m.add("DEFAULT_THRESHOLD", DEFAULT_THRESHOLD)?;
    Ok(())
}
