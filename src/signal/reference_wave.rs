use ndarray::Array1;
use std::f64::consts::PI;

pub const AMPLITUDE: f64 = 2.7;
pub const PHASE: f64 = 0.6;
pub const FREQUENCY: f64 = 4.2;
pub const N_SAMPLES: usize = 500;

/// Fixed sinusoid sampled on `[0, 1)` with step `1 / N_SAMPLES`.
pub fn generate() -> (Array1<f64>, Array1<f64>) {
    let step = 1. / N_SAMPLES as f64;
    let x = Array1::from_shape_fn(N_SAMPLES, |i| i as f64 * step);
    let y = x.mapv(|x| AMPLITUDE * (2. * PI * (FREQUENCY * x + PHASE)).sin());
    (x, y)
}

#[cfg(feature = "python")]
mod bindings {
    use numpy::{PyArray1, ToPyArray};
    use pyo3::prelude::*;
    use pyo3_stub_gen::derive::gen_stub_pyfunction;

    #[gen_stub_pyfunction(module = "hymod_rs.signal.reference_wave")]
    #[pyfunction]
    #[pyo3(name = "generate")]
    pub fn py_generate<'py>(
        py: Python<'py>,
    ) -> (Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>) {
        let (x, y) = super::generate();
        (x.to_pyarray(py), y.to_pyarray(py))
    }

    pub fn make_module(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
        let m = PyModule::new(py, "reference_wave")?;
        m.add_function(wrap_pyfunction!(py_generate, &m)?)?;
        Ok(m)
    }
}

#[cfg(feature = "python")]
pub use bindings::make_module;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sample_count() {
        let (x, y) = generate();
        assert_eq!(x.len(), 500);
        assert_eq!(y.len(), 500);
    }

    #[test]
    fn domain_is_half_open_unit_interval() {
        let (x, _) = generate();
        assert_eq!(x[0], 0.0);
        assert_relative_eq!(x[1], 0.002);
        assert_relative_eq!(x[499], 0.998, epsilon = 1e-12);
        assert!(x.iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn first_sample() {
        let (_, y) = generate();
        assert_relative_eq!(y[0], 2.7 * (2. * PI * 0.6).sin(), epsilon = 1e-12);
    }

    #[test]
    fn peaks_reach_amplitude() {
        let (_, y) = generate();
        let peak = y.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        assert!(peak <= AMPLITUDE);
        assert!(peak > 2.69);
    }

    #[test]
    fn crosses_zero_twice_per_period() {
        // phase runs from 0.6 to ~4.8 cycles over the domain
        let (_, y) = generate();
        let crossings = y
            .windows(2)
            .into_iter()
            .filter(|w| w[0].signum() != w[1].signum())
            .count();
        assert_eq!(crossings, 8);
    }
}
