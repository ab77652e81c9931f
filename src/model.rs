#[cfg(feature = "python")]
use numpy::PyReadonlyArray1;
#[cfg(feature = "python")]
use pyo3::exceptions::PyValueError;
#[cfg(feature = "python")]
use pyo3::prelude::*;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("{series} must have at least {expected} values (got {got})")]
    SeriesTooShort {
        series: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("expected {0} params, got {1}")]
    ParamsMismatch(usize, usize),
    #[error("{0} must be non-zero")]
    ZeroDivisor(&'static str),
}

#[cfg(feature = "python")]
impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Meteorological forcing for a lumped model run.
#[derive(Clone, Debug, Default)]
pub struct Forcing {
    pub precipitation: Vec<f64>,
    pub pet: Vec<f64>,
}

impl Forcing {
    pub fn new(precipitation: Vec<f64>, pet: Vec<f64>) -> Self {
        Forcing { precipitation, pet }
    }

    /// Longest horizon both series can cover.
    pub fn len(&self) -> usize {
        self.precipitation.len().min(self.pet.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that both series hold at least `n_timesteps` values.
    pub fn check_horizon(&self, n_timesteps: usize) -> Result<(), Error> {
        for (series, values) in
            [("precipitation", &self.precipitation), ("pet", &self.pet)]
        {
            if values.len() < n_timesteps {
                return Err(Error::SeriesTooShort {
                    series,
                    expected: n_timesteps,
                    got: values.len(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(feature = "python")]
#[derive(FromPyObject)]
pub struct PyForcing<'py> {
    pub precipitation: PyReadonlyArray1<'py, f64>,
    pub pet: PyReadonlyArray1<'py, f64>,
}

#[cfg(feature = "python")]
impl PyForcing<'_> {
    pub fn into_forcing(self) -> Forcing {
        Forcing::new(
            self.precipitation.as_array().to_vec(),
            self.pet.as_array().to_vec(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizon_within_both_series() {
        let forcing = Forcing::new(vec![1.0; 5], vec![0.5; 4]);
        assert_eq!(forcing.len(), 4);
        assert!(forcing.check_horizon(4).is_ok());
        assert!(forcing.check_horizon(0).is_ok());
    }

    #[test]
    fn short_pet_is_reported() {
        let forcing = Forcing::new(vec![1.0; 5], vec![0.5; 4]);
        assert_eq!(
            forcing.check_horizon(5),
            Err(Error::SeriesTooShort {
                series: "pet",
                expected: 5,
                got: 4,
            })
        );
    }

    #[test]
    fn short_precipitation_is_reported_first() {
        let forcing = Forcing::new(vec![], vec![]);
        assert!(forcing.is_empty());
        let err = forcing.check_horizon(2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "precipitation must have at least 2 values (got 0)"
        );
    }
}
