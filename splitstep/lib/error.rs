//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use std::path::PathBuf;
use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned from [`Propagator`][crate::propagator::Propagator] construction
/// and stepping.
///
/// Apart from [`ShapeMismatch`][Self::ShapeMismatch], every variant marks an
/// invalid argument.
#[derive(Debug, Error, PartialEq)]
pub enum PropError {
    /// [`LengthError`] between the grid and either the wavefunction or the
    /// potential.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(#[from] LengthError),

    /// Returned when the grid has fewer than two points, leaving the spacing
    /// undefined.
    #[error("grid must have at least 2 points; got {0}")]
    GridTooShort(usize),

    /// Returned when the grid spacing is non-positive or non-finite.
    #[error("grid spacing must be positive and finite; got {0}")]
    BadSpacing(f64),

    /// Returned when the grid is not evenly spaced.
    #[error("grid must be evenly spaced; spacing {found} at index {index} differs from {dx}")]
    NonUniformGrid { index: usize, found: f64, dx: f64 },

    /// Returned when a non-positive or non-finite `ħ` is encountered.
    #[error("hbar must be positive and finite; got {0}")]
    BadHbar(f64),

    /// Returned when a non-positive or non-finite mass is encountered.
    #[error("mass must be positive and finite; got {0}")]
    BadMass(f64),

    /// Returned when the minimum momentum is non-finite.
    #[error("minimum momentum must be finite; got {0}")]
    BadMomentumOffset(f64),

    /// Returned when the start time is non-finite.
    #[error("start time must be finite; got {0}")]
    BadTime(f64),

    /// Returned when a non-finite time step is encountered.
    #[error("time step must be finite; got {0}")]
    BadTimestep(f64),
}

impl PropError {
    pub(crate) fn check_hbar(hbar: f64) -> Result<(), Self> {
        (hbar.is_finite() && hbar > 0.0).then_some(()).ok_or(Self::BadHbar(hbar))
    }

    pub(crate) fn check_mass(mass: f64) -> Result<(), Self> {
        (mass.is_finite() && mass > 0.0).then_some(()).ok_or(Self::BadMass(mass))
    }

    pub(crate) fn check_k0(k0: f64) -> Result<(), Self> {
        k0.is_finite().then_some(()).ok_or(Self::BadMomentumOffset(k0))
    }

    pub(crate) fn check_time(t: f64) -> Result<(), Self> {
        t.is_finite().then_some(()).ok_or(Self::BadTime(t))
    }

    pub(crate) fn check_dt(dt: f64) -> Result<(), Self> {
        dt.is_finite().then_some(()).ok_or(Self::BadTimestep(dt))
    }

    // grid must be at least two points long, with positive spacing that
    // doesn't drift by more than a small fraction of `dx`
    pub(crate) fn check_grid<S>(x: &nd::ArrayBase<S, nd::Ix1>)
        -> Result<f64, Self>
    where S: nd::Data<Elem = f64>
    {
        const SPACING_RTOL: f64 = 1e-6;

        let n = x.len();
        if n < 2 { return Err(Self::GridTooShort(n)); }
        let dx = x[1] - x[0];
        if !(dx.is_finite() && dx > 0.0) { return Err(Self::BadSpacing(dx)); }
        x.iter().zip(x.iter().skip(1)).enumerate()
            .map(|(i, (xi, xip1))| (i, xip1 - xi))
            .find(|(_, d)| !((d - dx).abs() <= SPACING_RTOL * dx))
            .map_or(Ok(dx), |(index, found)| {
                Err(Self::NonUniformGrid { index, found, dx })
            })
    }
}

/// Returned when loading a [`TunnelingConfig`][crate::config::TunnelingConfig]
/// or building a propagator from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when a configuration file can't be read.
    #[error("couldn't read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Returned when a configuration can't be parsed.
    #[error("malformed config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Returned when a configuration value is out of range.
    #[error("invalid value for `{field}`: {value} ({reason})")]
    Invalid { field: &'static str, value: f64, reason: &'static str },

    /// [`PropError`]
    #[error("propagator error: {0}")]
    Prop(#[from] PropError),
}

impl ConfigError {
    pub(crate) fn check_positive(field: &'static str, value: f64)
        -> Result<(), Self>
    {
        (value.is_finite() && value > 0.0).then_some(())
            .ok_or(Self::Invalid { field, value, reason: "must be positive and finite" })
    }

    pub(crate) fn check_nonnegative(field: &'static str, value: f64)
        -> Result<(), Self>
    {
        (value.is_finite() && value >= 0.0).then_some(())
            .ok_or(Self::Invalid { field, value, reason: "must be non-negative and finite" })
    }

    pub(crate) fn check_finite(field: &'static str, value: f64)
        -> Result<(), Self>
    {
        value.is_finite().then_some(())
            .ok_or(Self::Invalid { field, value, reason: "must be finite" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_check() {
        let a = nd::Array1::<f64>::zeros(4);
        let b = nd::Array1::<f64>::zeros(5);
        assert_eq!(LengthError::check(&a, &a), Ok(()));
        assert_eq!(LengthError::check(&a, &b), Err(LengthError(4, 5)));
    }

    #[test]
    fn grid_checks() {
        let x: nd::Array1<f64> = nd::Array1::linspace(-1.0, 1.0, 11);
        let dx = PropError::check_grid(&x).unwrap();
        assert!((dx - 0.2).abs() < 1e-12);

        let short = nd::array![0.0];
        assert_eq!(PropError::check_grid(&short), Err(PropError::GridTooShort(1)));

        let reversed = nd::array![1.0, 0.0, -1.0];
        assert_eq!(PropError::check_grid(&reversed), Err(PropError::BadSpacing(-1.0)));

        let uneven = nd::array![0.0, 1.0, 2.0, 3.5];
        assert!(matches!(
            PropError::check_grid(&uneven),
            Err(PropError::NonUniformGrid { index: 2, .. })
        ));
    }

    #[test]
    fn config_value_checks() {
        assert!(ConfigError::check_positive("dt", 0.01).is_ok());
        assert!(matches!(
            ConfigError::check_positive("dt", 0.0),
            Err(ConfigError::Invalid { field: "dt", .. }),
        ));
        assert!(ConfigError::check_nonnegative("barrier_width", 0.0).is_ok());
        assert!(ConfigError::check_nonnegative("barrier_width", -1.0).is_err());
        assert!(ConfigError::check_finite("k0", -28.0).is_ok());
        assert!(ConfigError::check_finite("k0", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn scalar_checks() {
        assert!(PropError::check_hbar(1.0).is_ok());
        assert_eq!(PropError::check_hbar(0.0), Err(PropError::BadHbar(0.0)));
        assert!(PropError::check_mass(f64::NAN).is_err());
        assert!(PropError::check_k0(-28.0).is_ok());
        assert!(PropError::check_k0(f64::INFINITY).is_err());
        assert!(PropError::check_dt(-0.01).is_ok());
        assert!(PropError::check_dt(f64::NAN).is_err());
    }
}
