pub mod hymod;

#[cfg(feature = "python")]
use crate::utils::register_submodule;
#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
pub fn make_module(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    let m = PyModule::new(py, "climate")?;
    register_submodule(py, &m, &hymod::make_module(py)?, "hymod_rs.climate")?;
    Ok(m)
}
