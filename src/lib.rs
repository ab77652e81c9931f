pub mod climate;
pub mod model;
pub mod signal;
#[cfg(feature = "python")]
mod utils;

#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use utils::register_submodule;

#[cfg(feature = "python")]
#[pymodule]
fn hymod_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();

    register_submodule(py, m, &climate::make_module(py)?, "hymod_rs")?;
    register_submodule(py, m, &signal::make_module(py)?, "hymod_rs")?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}

#[cfg(feature = "python")]
pyo3_stub_gen::define_stub_info_gatherer!(stub_info);
