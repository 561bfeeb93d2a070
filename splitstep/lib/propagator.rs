//! Split-operator propagation of the one-dimensional TDSE for a static
//! potential.
//!
//! The state is held in both position and momentum representations, each
//! scaled and phase-shifted so that a plain DFT between them approximates the
//! continuous Fourier transform over the physical domain:
//! ```text
//! ψ_x = ψ_mod_x exp(i k[0] x) √(2π) / δx
//! ψ_k = ψ_mod_k exp(-i x[0] δk j)
//! ψ_mod_k = DFT(ψ_mod_x)
//! ```
//! Only one of the two is authoritative after a mutation; the other is
//! recomputed through [`Propagator::compute_k_from_x`] or
//! [`Propagator::compute_x_from_k`] before it's read.
//!
//! See [`docs`][crate::docs] for the stepping scheme.

use std::f64::consts::{ PI, TAU };
use ndarray::{ self as nd, Ix1 };
use num_complex::Complex64 as C64;
use crate::{
    config::PropagatorConfig,
    dft::Dft,
    error::{ LengthError, PropError },
    utils::{ mean_position, wf_prob_sum },
};

pub type PResult<T> = Result<T, PropError>;

// which representation is out of date
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Stale {
    Neither,
    X,
    K,
}

/// Phase factors advancing the state by one time step `dt`.
///
/// ```text
/// x_evolve_half[j] = exp(-i V[j] dt / 2ħ)
/// x_evolve[j]      = x_evolve_half[j]²
/// k_evolve[j]      = exp(-i ħ k[j]² dt / 2m)
/// ```
#[derive(Clone, Debug)]
pub struct Evolution {
    dt: f64,
    x_evolve_half: nd::Array1<C64>,
    x_evolve: nd::Array1<C64>,
    k_evolve: nd::Array1<C64>,
}

impl Evolution {
    fn new(hbar: f64, mass: f64, v: &nd::Array1<f64>, k: &nd::Array1<f64>, dt: f64)
        -> Self
    {
        let x_evolve_half: nd::Array1<C64>
            = v.mapv(|vj| C64::cis(-0.5 * vj / hbar * dt));
        let x_evolve: nd::Array1<C64> = x_evolve_half.mapv(|h| h * h);
        let k_evolve: nd::Array1<C64>
            = k.mapv(|kj| C64::cis(-0.5 * hbar / mass * kj * kj * dt));
        Self { dt, x_evolve_half, x_evolve, k_evolve }
    }

    /// Time step these factors were computed for.
    pub fn dt(&self) -> f64 { self.dt }

    /// Half-step potential phase.
    pub fn x_evolve_half(&self) -> &nd::Array1<C64> { &self.x_evolve_half }

    /// Full-step potential phase.
    pub fn x_evolve(&self) -> &nd::Array1<C64> { &self.x_evolve }

    /// Full-step kinetic phase.
    pub fn k_evolve(&self) -> &nd::Array1<C64> { &self.k_evolve }
}

// multiply a state elementwise by a phase array
fn apply_phase<S>(q: &mut nd::ArrayBase<S, Ix1>, phase: &nd::Array1<C64>)
where S: nd::DataMut<Elem = C64>
{
    nd::Zip::from(q).and(phase).for_each(|qj, pj| { *qj *= pj; });
}

// take the position state to momentum space, apply the kinetic phase, and
// bring it back
fn apply_kinetic(
    dft: &mut Dft,
    q_x: &mut nd::Array1<C64>,
    q_k: &mut nd::Array1<C64>,
    k_evolve: &nd::Array1<C64>,
) {
    q_k.assign(q_x);
    dft.forward(q_k);
    apply_phase(q_k, k_evolve);
    q_x.assign(q_k);
    dft.inverse(q_x);
}

// Strang-split stepping with interior half-steps merged:
//   V/2 (T V)^(n - 1) T V/2
// followed by a final forward transform to resync the momentum state
fn split_step(
    dft: &mut Dft,
    q_x: &mut nd::Array1<C64>,
    q_k: &mut nd::Array1<C64>,
    ev: &Evolution,
    n_substeps: usize,
) {
    apply_phase(q_x, &ev.x_evolve_half);
    for _ in 1..n_substeps {
        apply_kinetic(dft, q_x, q_k, &ev.k_evolve);
        apply_phase(q_x, &ev.x_evolve);
    }
    apply_kinetic(dft, q_x, q_k, &ev.k_evolve);
    apply_phase(q_x, &ev.x_evolve_half);
    q_k.assign(q_x);
    dft.forward(q_k);
}

/// Time-dependent Schrödinger equation solver for a single particle on a
/// fixed, evenly spaced grid in a static potential.
#[derive(Clone, Debug)]
pub struct Propagator {
    x: nd::Array1<f64>,
    v: nd::Array1<f64>,
    k: nd::Array1<f64>,
    dx: f64,
    dk: f64,
    hbar: f64,
    mass: f64,
    t: f64,
    psi_mod_x: nd::Array1<C64>,
    psi_mod_k: nd::Array1<C64>,
    stale: Stale,
    evolution: Option<Evolution>,
    dft: Dft,
}

impl Propagator {
    /// Create a new propagator.
    ///
    /// `x` must be evenly spaced and at least two points long, and `psi_x0`
    /// and `v` must be sampled over it. The momentum grid is
    /// `k[j] = k0 + j δk` with `δk = 2π / (N δx)`; if `config.k0` is `None`,
    /// `k0 = -N δk / 2` so that the grid is centered on zero.
    pub fn new<S, T, U>(
        x: &nd::ArrayBase<S, Ix1>,
        psi_x0: &nd::ArrayBase<T, Ix1>,
        v: &nd::ArrayBase<U, Ix1>,
        config: PropagatorConfig,
    ) -> PResult<Self>
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = C64>,
        U: nd::Data<Elem = f64>,
    {
        let PropagatorConfig { hbar, mass, k0, t0 } = config;
        LengthError::check(x, psi_x0)?;
        LengthError::check(x, v)?;
        let dx = PropError::check_grid(x)?;
        PropError::check_hbar(hbar)?;
        PropError::check_mass(mass)?;
        PropError::check_time(t0)?;
        let n = x.len();
        let dk = TAU / (n as f64 * dx);
        let k0 = k0.unwrap_or(-0.5 * n as f64 * dk);
        PropError::check_k0(k0)?;
        let k: nd::Array1<f64> = (0..n).map(|j| k0 + dk * j as f64).collect();
        log::debug!(
            "new propagator: N = {}, dx = {:e}, dk = {:e}, k0 = {:e}",
            n, dx, dk, k0,
        );

        let mut new = Self {
            x: x.to_owned(),
            v: v.to_owned(),
            k,
            dx,
            dk,
            hbar,
            mass,
            t: t0,
            psi_mod_x: nd::Array1::zeros(n),
            psi_mod_k: nd::Array1::zeros(n),
            stale: Stale::K,
            evolution: None,
            dft: Dft::new(n),
        };
        new.write_psi_x(psi_x0);
        Ok(new)
    }

    /// Number of grid points.
    pub fn len(&self) -> usize { self.x.len() }

    /// Always `false`; grids have at least two points.
    pub fn is_empty(&self) -> bool { self.x.is_empty() }

    /// Position coordinates.
    pub fn x(&self) -> &nd::Array1<f64> { &self.x }

    /// Momentum coordinates.
    pub fn k(&self) -> &nd::Array1<f64> { &self.k }

    /// Potential.
    pub fn potential(&self) -> &nd::Array1<f64> { &self.v }

    /// Position grid spacing.
    pub fn dx(&self) -> f64 { self.dx }

    /// Momentum grid spacing.
    pub fn dk(&self) -> f64 { self.dk }

    /// Minimum momentum.
    pub fn k0(&self) -> f64 { self.k[0] }

    /// Reduced Planck constant.
    pub fn hbar(&self) -> f64 { self.hbar }

    /// Particle mass.
    pub fn mass(&self) -> f64 { self.mass }

    /// Elapsed simulation time.
    pub fn t(&self) -> f64 { self.t }

    /// Time step used for the last call to [`step`][Self::step] or
    /// [`set_dt`][Self::set_dt], if any.
    pub fn dt(&self) -> Option<f64> { self.evolution.as_ref().map(|ev| ev.dt) }

    /// Cached phase factors, if a time step has been set.
    pub fn evolution(&self) -> Option<&Evolution> { self.evolution.as_ref() }

    /// Set the time step, recomputing phase factors only if `dt` differs from
    /// the cached value.
    pub fn set_dt(&mut self, dt: f64) -> PResult<()> {
        PropError::check_dt(dt)?;
        if self.evolution.as_ref().is_some_and(|ev| ev.dt == dt) {
            return Ok(());
        }
        log::debug!("recomputing evolution operators for dt = {:e}", dt);
        self.evolution
            = Some(Evolution::new(self.hbar, self.mass, &self.v, &self.k, dt));
        Ok(())
    }

    /// Recompute the momentum state from the position state.
    pub fn compute_k_from_x(&mut self) {
        self.psi_mod_k.assign(&self.psi_mod_x);
        self.dft.forward(&mut self.psi_mod_k);
        self.stale = Stale::Neither;
    }

    /// Recompute the position state from the momentum state.
    pub fn compute_x_from_k(&mut self) {
        self.psi_mod_x.assign(&self.psi_mod_k);
        self.dft.inverse(&mut self.psi_mod_x);
        self.stale = Stale::Neither;
    }

    fn write_psi_x<S>(&mut self, psi_x: &nd::ArrayBase<S, Ix1>)
    where S: nd::Data<Elem = C64>
    {
        let k0 = self.k[0];
        let scale = self.dx / (2.0 * PI).sqrt();
        nd::Zip::from(&mut self.psi_mod_x).and(psi_x).and(&self.x)
            .for_each(|qj, pj, xj| { *qj = pj * C64::cis(-k0 * xj) * scale; });
        self.stale = Stale::K;
    }

    /// Return the wavefunction in position space.
    pub fn psi_x(&mut self) -> nd::Array1<C64> {
        if self.stale == Stale::X { self.compute_x_from_k(); }
        let k0 = self.k[0];
        let scale = (2.0 * PI).sqrt() / self.dx;
        nd::Zip::from(&self.psi_mod_x).and(&self.x)
            .map_collect(|qj, xj| qj * C64::cis(k0 * xj) * scale)
    }

    /// Overwrite the wavefunction in position space. The momentum state is
    /// left stale until next read.
    pub fn set_psi_x<S>(&mut self, psi_x: &nd::ArrayBase<S, Ix1>) -> PResult<()>
    where S: nd::Data<Elem = C64>
    {
        LengthError::check(&self.x, psi_x)?;
        self.write_psi_x(psi_x);
        Ok(())
    }

    /// Return the wavefunction in momentum space.
    pub fn psi_k(&mut self) -> nd::Array1<C64> {
        if self.stale == Stale::K { self.compute_k_from_x(); }
        let x0dk = self.x[0] * self.dk;
        self.psi_mod_k.iter().enumerate()
            .map(|(j, qj)| qj * C64::cis(-x0dk * j as f64))
            .collect()
    }

    /// Overwrite the wavefunction in momentum space. The position state is
    /// left stale until next read or step.
    pub fn set_psi_k<S>(&mut self, psi_k: &nd::ArrayBase<S, Ix1>) -> PResult<()>
    where S: nd::Data<Elem = C64>
    {
        LengthError::check(&self.k, psi_k)?;
        let x0dk = self.x[0] * self.dk;
        self.psi_mod_k.iter_mut().zip(psi_k).enumerate()
            .for_each(|(j, (qj, pj))| { *qj = pj * C64::cis(x0dk * j as f64); });
        self.stale = Stale::X;
        Ok(())
    }

    /// Return |ψ(x)|.
    pub fn amplitude(&mut self) -> nd::Array1<f64> {
        self.psi_x().mapv(|qj| qj.norm())
    }

    /// Return Σ |ψ(x)|² δx.
    pub fn norm(&mut self) -> f64 {
        let q = self.psi_x();
        wf_prob_sum(&q, self.dx)
    }

    /// Return ⟨x⟩.
    pub fn mean_position(&mut self) -> f64 {
        let q = self.psi_x();
        mean_position(&self.x, &q)
    }

    /// Advance the state by `dt * n_substeps`.
    ///
    /// Each sub-step is the symmetric product `exp(-iV dt/2ħ) exp(-iT dt/ħ)
    /// exp(-iV dt/2ħ)`; adjacent potential half-steps are merged so that only
    /// the first and last sub-steps apply a half step. Phase factors are
    /// recomputed only if `dt` differs from the previous call. With
    /// `n_substeps == 0` only the cached phase factors are updated.
    pub fn step(&mut self, dt: f64, n_substeps: usize) -> PResult<()> {
        self.set_dt(dt)?;
        if n_substeps == 0 { return Ok(()); }
        if self.stale == Stale::X { self.compute_x_from_k(); }
        log::trace!(
            "step: t = {:e}, dt = {:e}, n_substeps = {}", self.t, dt, n_substeps);
        if let Some(ev) = self.evolution.as_ref() {
            split_step(
                &mut self.dft,
                &mut self.psi_mod_x,
                &mut self.psi_mod_k,
                ev,
                n_substeps,
            );
            self.stale = Stale::Neither;
        }
        self.t += dt * n_substeps as f64;
        Ok(())
    }
}
