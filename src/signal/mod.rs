pub mod reference_wave;

#[cfg(feature = "python")]
use crate::utils::register_submodule;
#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
pub fn make_module(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    let m = PyModule::new(py, "signal")?;
    register_submodule(
        py,
        &m,
        &reference_wave::make_module(py)?,
        "hymod_rs.signal",
    )?;
    Ok(m)
}
