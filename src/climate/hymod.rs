use ndarray::{array, Array1, Array2};
use tracing::{debug, warn};

use crate::model::{Error, Forcing};

pub const PARAM_NAMES: [&str; 5] =
    ["sm_max", "ratio_evap", "ratio_inf", "t_sup", "t_sub"];

pub fn init() -> (Array1<f64>, Array2<f64>) {
    // corresponds to sm_max, ratio_evap, ratio_inf, t_sup, t_sub
    let default_values = Parameters::default().to_array();
    let bounds = array![
        [10.0, 90.0],
        [0.0, 1.0],
        [0.0, 1.0],
        [0.8, 2.0],
        [2.0, 10.0]
    ];
    (default_values, bounds)
}

/// HyMOD-style parameters.
///
/// - `sm_max`: maximum soil moisture storage [mm]
/// - `ratio_evap`: evapotranspiration efficiency [-]
/// - `ratio_inf`: share of saturation excess sent to the slow reservoir [-]
/// - `t_sup`: surface reservoir residence time [steps]
/// - `t_sub`: subsurface reservoir residence time [steps]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub sm_max: f64,
    pub ratio_evap: f64,
    pub ratio_inf: f64,
    pub t_sup: f64,
    pub t_sub: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            sm_max: 40.0,
            ratio_evap: 0.5,
            ratio_inf: 0.75,
            t_sup: 2.0,
            t_sub: 8.0,
        }
    }
}

impl Parameters {
    pub fn from_array(params: &Array1<f64>) -> Result<Self, Error> {
        let [sm_max, ratio_evap, ratio_inf, t_sup, t_sub]: [f64; 5] = params
            .as_slice()
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| Error::ParamsMismatch(5, params.len()))?;
        Ok(Parameters {
            sm_max,
            ratio_evap,
            ratio_inf,
            t_sup,
            t_sub,
        })
    }

    pub fn to_array(&self) -> Array1<f64> {
        array![
            self.sm_max,
            self.ratio_evap,
            self.ratio_inf,
            self.t_sup,
            self.t_sub
        ]
    }

    fn check_divisors(&self) -> Result<(), Error> {
        for (name, value) in [
            ("sm_max", self.sm_max),
            ("t_sup", self.t_sup),
            ("t_sub", self.t_sub),
        ] {
            if value == 0.0 {
                return Err(Error::ZeroDivisor(name));
            }
        }
        Ok(())
    }
}

/// Every state and flux series of a run.
///
/// Stores are sampled at step boundaries (`n_timesteps + 1` values, the
/// first one being the dry initial condition); fluxes hold one value per step.
#[derive(Debug, Clone, PartialEq)]
pub struct Outputs {
    pub soil_moisture: Vec<f64>,
    pub fast_store: Vec<f64>,
    pub slow_store: Vec<f64>,
    pub infiltration: Vec<f64>,
    pub surface_excess: Vec<f64>,
    pub evapotranspiration: Vec<f64>,
    pub surface_flow: Vec<f64>,
    pub subsurface_flow: Vec<f64>,
    pub discharge: Vec<f64>,
}

impl Outputs {
    fn with_capacity(n_timesteps: usize) -> Self {
        let stores = || {
            let mut v = Vec::with_capacity(n_timesteps + 1);
            v.push(0.0);
            v
        };
        Outputs {
            soil_moisture: stores(),
            fast_store: stores(),
            slow_store: stores(),
            infiltration: Vec::with_capacity(n_timesteps),
            surface_excess: Vec::with_capacity(n_timesteps),
            evapotranspiration: Vec::with_capacity(n_timesteps),
            surface_flow: Vec::with_capacity(n_timesteps),
            subsurface_flow: Vec::with_capacity(n_timesteps),
            discharge: Vec::with_capacity(n_timesteps),
        }
    }

    pub fn named_series(&self) -> [(&'static str, &[f64]); 9] {
        [
            ("soil_moisture", self.soil_moisture.as_slice()),
            ("fast_store", self.fast_store.as_slice()),
            ("slow_store", self.slow_store.as_slice()),
            ("infiltration", self.infiltration.as_slice()),
            ("surface_excess", self.surface_excess.as_slice()),
            ("evapotranspiration", self.evapotranspiration.as_slice()),
            ("surface_flow", self.surface_flow.as_slice()),
            ("subsurface_flow", self.subsurface_flow.as_slice()),
            ("discharge", self.discharge.as_slice()),
        ]
    }
}

pub fn simulate(
    params: &Array1<f64>,
    forcing: &Forcing,
    n_timesteps: usize,
) -> Result<Array1<f64>, Error> {
    let params = Parameters::from_array(params)?;
    let outputs = run(&params, forcing, n_timesteps)?;
    Ok(Array1::from_vec(outputs.discharge))
}

pub fn run(
    params: &Parameters,
    forcing: &Forcing,
    n_timesteps: usize,
) -> Result<Outputs, Error> {
    forcing.check_horizon(n_timesteps)?;
    params.check_divisors()?;

    if params.t_sup < 1. || params.t_sub < 1. {
        warn!(
            t_sup = params.t_sup,
            t_sub = params.t_sub,
            "residence time below one step can overdraw a reservoir"
        );
    }
    debug!(n_timesteps, ?params, "running hymod");

    let precipitation = &forcing.precipitation;
    let pet = &forcing.pet;

    let mut outputs = Outputs::with_capacity(n_timesteps);

    let mut soil_moisture = 0.;
    let mut fast_store = 0.;
    let mut slow_store = 0.;
    let mut infiltration: f64;
    let mut surface_excess: f64;
    let mut evapotranspiration: f64;
    let mut surface_flow: f64;
    let mut subsurface_flow: f64;

    for t in 0..n_timesteps {
        (
            soil_moisture,
            infiltration,
            surface_excess,
            evapotranspiration,
        ) = update_soil(soil_moisture, precipitation[t], pet[t], params);
        // both reservoirs drain from their level at the start of the step
        (slow_store, subsurface_flow) =
            update_reservoir(slow_store, infiltration, params.t_sub);
        (fast_store, surface_flow) =
            update_reservoir(fast_store, surface_excess, params.t_sup);

        outputs.soil_moisture.push(soil_moisture);
        outputs.fast_store.push(fast_store);
        outputs.slow_store.push(slow_store);
        outputs.infiltration.push(infiltration);
        outputs.surface_excess.push(surface_excess);
        outputs.evapotranspiration.push(evapotranspiration);
        outputs.surface_flow.push(surface_flow);
        outputs.subsurface_flow.push(subsurface_flow);
        outputs.discharge.push(surface_flow + subsurface_flow);
    }

    debug!(
        total_discharge = outputs.discharge.iter().sum::<f64>(),
        "hymod run finished"
    );

    Ok(outputs)
}

/// Returns (store, infiltration, surface excess, evapotranspiration).
fn update_soil(
    store: f64,
    precipitation: f64,
    pet: f64,
    params: &Parameters,
) -> (f64, f64, f64, f64) {
    let wetted = store + precipitation;
    let filled = wetted.min(params.sm_max).max(0.);

    let excess = (wetted - params.sm_max).max(0.);
    let infiltration = excess * params.ratio_inf;
    let surface_excess = excess * (1. - params.ratio_inf);

    // evaporation efficiency uses the store before this step's rain
    let efficiency =
        ((store / params.sm_max).abs() * params.ratio_evap).min(1.);
    let evapotranspiration = efficiency * pet;

    let store = (filled - evapotranspiration).min(params.sm_max).max(0.);

    (store, infiltration, surface_excess, evapotranspiration)
}

/// Linear reservoir, explicit unit step. Outflow is not capped by the
/// stored volume.
fn update_reservoir(store: f64, inflow: f64, residence_time: f64) -> (f64, f64) {
    let outflow = 1. / residence_time * store;
    (store + inflow - outflow, outflow)
}

#[cfg(feature = "python")]
mod bindings {
    use ndarray::Array1;
    use numpy::{PyArray1, PyArray2, PyReadonlyArray1, ToPyArray};
    use pyo3::prelude::*;
    use pyo3::types::PyDict;
    use pyo3_stub_gen::derive::gen_stub_pyfunction;

    use super::{init, run, simulate, Parameters};
    use crate::model::PyForcing;

    fn params_or_default(params: Option<PyReadonlyArray1<f64>>) -> Array1<f64> {
        match params {
            Some(params) => params.as_array().to_owned(),
            None => Parameters::default().to_array(),
        }
    }

    #[gen_stub_pyfunction(module = "hymod_rs.climate.hymod")]
    #[pyfunction]
    #[pyo3(name = "init")]
    pub fn py_init<'py>(
        py: Python<'py>,
    ) -> (Bound<'py, PyArray1<f64>>, Bound<'py, PyArray2<f64>>) {
        let (default_values, bounds) = init();
        (default_values.to_pyarray(py), bounds.to_pyarray(py))
    }

    #[pyfunction]
    #[pyo3(name = "simulate", signature = (data, params=None, n_timesteps=None))]
    pub fn py_simulate<'py>(
        py: Python<'py>,
        data: PyForcing,
        params: Option<PyReadonlyArray1<f64>>,
        n_timesteps: Option<usize>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let forcing = data.into_forcing();
        let n_timesteps =
            n_timesteps.unwrap_or(forcing.precipitation.len());
        let simulation =
            simulate(&params_or_default(params), &forcing, n_timesteps)?;
        Ok(simulation.to_pyarray(py))
    }

    #[pyfunction]
    #[pyo3(name = "run", signature = (data, params=None, n_timesteps=None))]
    pub fn py_run<'py>(
        py: Python<'py>,
        data: PyForcing,
        params: Option<PyReadonlyArray1<f64>>,
        n_timesteps: Option<usize>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let forcing = data.into_forcing();
        let n_timesteps =
            n_timesteps.unwrap_or(forcing.precipitation.len());
        let params = Parameters::from_array(&params_or_default(params))?;
        let outputs = run(&params, &forcing, n_timesteps)?;

        let dict = PyDict::new(py);
        for (name, values) in outputs.named_series() {
            dict.set_item(name, values.to_pyarray(py))?;
        }
        Ok(dict)
    }

    pub fn make_module(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
        let m = PyModule::new(py, "hymod")?;
        m.add_function(wrap_pyfunction!(py_init, &m)?)?;
        m.add_function(wrap_pyfunction!(py_simulate, &m)?)?;
        m.add_function(wrap_pyfunction!(py_run, &m)?)?;
        Ok(m)
    }
}

#[cfg(feature = "python")]
pub use bindings::make_module;
