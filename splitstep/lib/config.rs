//! Physical constants and run parameters.
//!
//! Everything here can be deserialized from TOML; keys left out of a file
//! take their default values.

use std::path::Path;
use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::{ Deserialize, Serialize };
use crate::{
    error::ConfigError,
    packet::{ gauss_x, hard_walls, square_barrier },
    propagator::Propagator,
};

/// Options passed to [`Propagator::new`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagatorConfig {
    /// Reduced Planck constant.
    pub hbar: f64,
    /// Particle mass.
    pub mass: f64,
    /// Minimum momentum of the momentum grid. If `None`, the grid is centered
    /// on zero.
    pub k0: Option<f64>,
    /// Initial time.
    pub t0: f64,
}

impl Default for PropagatorConfig {
    fn default() -> Self {
        Self { hbar: 1.0, mass: 1.0, k0: None, t0: 0.0 }
    }
}

/// A Gaussian packet incident on a rectangular barrier centered near the
/// origin, confined by hard walls at both ends of the domain.
///
/// All lengths are derived from the barrier:
/// `L = ħ / √(2 m V0)` sets the barrier width and the packet's starting
/// position, and the packet's momentum is fixed by its kinetic energy as a
/// fraction of `V0`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunnelingConfig {
    /// Number of grid points.
    pub n: usize,
    /// Grid spacing.
    pub dx: f64,
    /// Reduced Planck constant.
    pub hbar: f64,
    /// Particle mass.
    pub mass: f64,
    /// Barrier height.
    pub v0: f64,
    /// Barrier width in units of `L`.
    pub barrier_width: f64,
    /// Initial packet center in units of `L`.
    pub packet_center: f64,
    /// Packet kinetic energy as a fraction of `v0`.
    pub energy_fraction: f64,
    /// Ratio `p0² / δp²` fixing the packet's momentum spread.
    pub momentum_spread: f64,
    /// Hard walls cover `|x| > wall_position`.
    pub wall_position: f64,
    /// Potential inside the hard walls.
    pub wall_height: f64,
    /// Minimum momentum of the propagator's momentum grid.
    pub k0: f64,
    /// Time step per sub-step.
    pub dt: f64,
    /// Sub-steps per frame.
    pub n_substeps: usize,
    /// Total simulated time.
    pub t_max: f64,
}

impl Default for TunnelingConfig {
    fn default() -> Self {
        Self {
            n: 1 << 11,
            dx: 0.1,
            hbar: 1.0,
            mass: 1.9,
            v0: 1.5,
            barrier_width: 1.0,
            packet_center: -100.0,
            energy_fraction: 0.2,
            momentum_spread: 80.0,
            wall_position: 98.0,
            wall_height: 1e6,
            k0: -28.0,
            dt: 0.01,
            n_substeps: 50,
            t_max: 120.0,
        }
    }
}

impl TunnelingConfig {
    /// Parse from a TOML string, rejecting out-of-range values.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that all run parameters are in range.
    ///
    /// Grid size, spacing, `ħ`, and mass are checked by
    /// [`Propagator::new`] when the configuration is [built][Self::build].
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("v0", self.v0)?;
        ConfigError::check_nonnegative("barrier_width", self.barrier_width)?;
        ConfigError::check_finite("packet_center", self.packet_center)?;
        ConfigError::check_positive("energy_fraction", self.energy_fraction)?;
        ConfigError::check_positive("momentum_spread", self.momentum_spread)?;
        ConfigError::check_positive("wall_position", self.wall_position)?;
        ConfigError::check_finite("wall_height", self.wall_height)?;
        ConfigError::check_finite("k0", self.k0)?;
        ConfigError::check_positive("dt", self.dt)?;
        ConfigError::check_positive("n_substeps", self.n_substeps as f64)?;
        ConfigError::check_positive("t_max", self.t_max)?;
        Ok(())
    }

    /// Read and parse a TOML file.
    pub fn load<P>(path: P) -> Result<Self, ConfigError>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&s)
    }

    /// Characteristic length `ħ / √(2 m V0)`.
    pub fn length_scale(&self) -> f64 {
        self.hbar / (2.0 * self.mass * self.v0).sqrt()
    }

    /// Initial packet center.
    pub fn x0(&self) -> f64 { self.packet_center * self.length_scale() }

    /// Initial packet momentum.
    pub fn p0(&self) -> f64 {
        (2.0 * self.mass * self.energy_fraction * self.v0).sqrt()
    }

    /// Initial packet wavenumber.
    pub fn packet_k0(&self) -> f64 { self.p0() / self.hbar }

    /// Group velocity of the initial packet.
    pub fn group_velocity(&self) -> f64 { self.p0() / self.mass }

    /// Width of the initial packet.
    pub fn packet_width(&self) -> f64 {
        let dp2 = self.p0().powi(2) / self.momentum_spread;
        self.hbar / (2.0 * dp2).sqrt()
    }

    /// Position of a classical particle launched with the packet at time `t`.
    pub fn classical_center(&self, t: f64) -> f64 {
        self.x0() + t * self.group_velocity()
    }

    /// Number of frames covering `t_max`, each advancing `n_substeps * dt`.
    pub fn frames(&self) -> usize {
        (self.t_max / (self.n_substeps as f64 * self.dt)).floor() as usize
    }

    /// Spatial grid `x[i] = dx (i - N/2)`.
    pub fn grid(&self) -> nd::Array1<f64> {
        let half = 0.5 * self.n as f64;
        (0..self.n).map(|i| self.dx * (i as f64 - half)).collect()
    }

    /// Barrier plus hard walls, sampled over [`grid`][Self::grid].
    pub fn potential(&self) -> nd::Array1<f64> {
        let x = self.grid();
        let width = self.barrier_width * self.length_scale();
        let mut v = square_barrier(&x, width, self.v0);
        hard_walls(
            &x, &mut v, -self.wall_position, self.wall_position, self.wall_height);
        v
    }

    /// Initial Gaussian packet, sampled over [`grid`][Self::grid].
    pub fn initial_wavefunction(&self) -> nd::Array1<C64> {
        gauss_x(&self.grid(), self.packet_width(), self.x0(), self.packet_k0())
    }

    /// Options for the propagator.
    pub fn propagator_config(&self) -> PropagatorConfig {
        PropagatorConfig {
            hbar: self.hbar,
            mass: self.mass,
            k0: Some(self.k0),
            t0: 0.0,
        }
    }

    /// Construct a propagator holding the initial state.
    pub fn build(&self) -> Result<Propagator, ConfigError> {
        self.validate()?;
        let x = self.grid();
        let q0 = self.initial_wavefunction();
        let v = self.potential();
        Ok(Propagator::new(&x, &q0, &v, self.propagator_config())?)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use super::*;

    fn momentum_span(n: usize, dx: f64, k0: f64) -> (f64, f64) {
        let dk = 2.0 * PI / (n as f64 * dx);
        (k0, k0 + dk * (n - 1) as f64)
    }

    #[test]
    fn reference_values() {
        let cfg = TunnelingConfig::default();
        let l = 1.0 / (2.0_f64 * 1.9 * 1.5).sqrt();
        assert!((cfg.length_scale() - l).abs() < 1e-15);
        assert!((cfg.x0() + 100.0 * l).abs() < 1e-12);
        assert!((cfg.p0() - (2.0_f64 * 1.9 * 0.3).sqrt()).abs() < 1e-12);
        assert_eq!(cfg.frames(), 240);
        let x = cfg.grid();
        assert_eq!(x.len(), 2048);
        assert_eq!(x[0], -102.4);
        assert_eq!(x[1024], 0.0);
        // the momentum grid has to reach the packet's wavenumber
        let (kmin, kmax) = momentum_span(cfg.n, cfg.dx, -28.0);
        assert!(kmin < cfg.packet_k0() && cfg.packet_k0() < kmax);
    }

    #[test]
    fn reference_potential() {
        let cfg = TunnelingConfig::default();
        let x = cfg.grid();
        let v = cfg.potential();
        // barrier covers 0 <= x < L, i.e. x = 0.0, ..., 0.4
        let barrier: Vec<f64>
            = x.iter().zip(&v)
            .filter(|(_, vk)| **vk == cfg.v0)
            .map(|(xk, _)| *xk)
            .collect();
        assert_eq!(barrier.len(), 5);
        assert_eq!(barrier[0], 0.0);
        assert_eq!(v[0], 1e6);
        assert_eq!(v[2047], 1e6);
        assert_eq!(v[1000], 0.0);
    }

    #[test]
    fn toml_with_defaults() {
        let cfg = TunnelingConfig::from_toml_str(
            "n = 1024\nmass = 2.0\nk0 = -10.0\n").unwrap();
        assert_eq!(cfg.n, 1024);
        assert_eq!(cfg.mass, 2.0);
        assert_eq!(cfg.k0, -10.0);
        assert_eq!(cfg.propagator_config().k0, Some(-10.0));
        assert_eq!(cfg.dx, 0.1);
        assert_eq!(cfg.n_substeps, 50);

        let empty = TunnelingConfig::from_toml_str("").unwrap();
        assert_eq!(empty, TunnelingConfig::default());

        let prop: PropagatorConfig = toml::from_str("hbar = 0.5").unwrap();
        assert_eq!(prop, PropagatorConfig { hbar: 0.5, ..Default::default() });
    }

    #[test]
    fn bad_toml() {
        assert!(matches!(
            TunnelingConfig::from_toml_str("n = \"many\""),
            Err(ConfigError::Toml(_)),
        ));
        assert!(matches!(
            TunnelingConfig::load("/nonexistent/tunneling.toml"),
            Err(ConfigError::Io { .. }),
        ));
    }

    #[test]
    fn build_rejects_bad_mass() {
        let cfg = TunnelingConfig { n: 64, mass: -1.0, ..Default::default() };
        assert!(matches!(cfg.build(), Err(ConfigError::Prop(_))));
    }

    #[test]
    fn rejects_zero_substeps() {
        let res = TunnelingConfig::from_toml_str("n_substeps = 0");
        assert!(matches!(
            res, Err(ConfigError::Invalid { field: "n_substeps", .. })));
        let cfg = TunnelingConfig { n_substeps: 0, ..Default::default() };
        assert!(matches!(
            cfg.build(), Err(ConfigError::Invalid { field: "n_substeps", .. })));
    }

    #[test]
    fn rejects_zero_energy() {
        let res = TunnelingConfig::from_toml_str("energy_fraction = 0.0");
        assert!(matches!(
            res, Err(ConfigError::Invalid { field: "energy_fraction", .. })));
        let cfg = TunnelingConfig { energy_fraction: 0.0, ..Default::default() };
        assert!(cfg.build().is_err());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let cases: &[(&str, &str)] = &[
            ("dt = 0.0", "dt"),
            ("dt = -0.01", "dt"),
            ("t_max = 0.0", "t_max"),
            ("v0 = -1.5", "v0"),
            ("v0 = 0.0", "v0"),
            ("energy_fraction = -0.2", "energy_fraction"),
            ("momentum_spread = 0.0", "momentum_spread"),
            ("barrier_width = -1.0", "barrier_width"),
            ("wall_position = 0.0", "wall_position"),
        ];
        for (src, expected) in cases {
            match TunnelingConfig::from_toml_str(src) {
                Err(ConfigError::Invalid { field, .. }) => {
                    assert_eq!(field, *expected, "{}", src);
                },
                other => panic!("{}: expected invalid {}, got {:?}", src, expected, other),
            }
        }
        assert!(TunnelingConfig::default().validate().is_ok());

        let non_finite = [
            ("dt", TunnelingConfig { dt: f64::NAN, ..Default::default() }),
            ("t_max", TunnelingConfig { t_max: f64::INFINITY, ..Default::default() }),
            ("packet_center", TunnelingConfig { packet_center: f64::INFINITY, ..Default::default() }),
            ("wall_height", TunnelingConfig { wall_height: f64::NAN, ..Default::default() }),
            ("k0", TunnelingConfig { k0: f64::NAN, ..Default::default() }),
        ];
        for (expected, cfg) in non_finite {
            match cfg.validate() {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected invalid {}, got {:?}", expected, other),
            }
        }
    }
}
