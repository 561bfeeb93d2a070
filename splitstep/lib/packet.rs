//! Initial states and static potentials.

use std::f64::consts::PI;
use ndarray::{ self as nd, Ix1 };
use num_complex::Complex64 as C64;

/// Gaussian wave packet of width `a`, centered at `x0`, with momentum `k0`,
/// sampled over position coordinates `x`.
///
/// ```text
/// ψ(x) = (a √π)^(-1/2) exp(-(x - x0)² / 2a² + i k0 x)
/// ```
pub fn gauss_x<S>(x: &nd::ArrayBase<S, Ix1>, a: f64, x0: f64, k0: f64)
    -> nd::Array1<C64>
where S: nd::Data<Elem = f64>
{
    let amp = (a * PI.sqrt()).powf(-0.5);
    x.mapv(|xk| {
        amp * C64::new(-0.5 * ((xk - x0) / a).powi(2), xk * k0).exp()
    })
}

/// Analytical Fourier transform of [`gauss_x`], sampled over momentum
/// coordinates `k`.
///
/// ```text
/// φ(k) = (a / √π)^(1/2) exp(-a² (k - k0)² / 2 - i (k - k0) x0)
/// ```
pub fn gauss_k<S>(k: &nd::ArrayBase<S, Ix1>, a: f64, x0: f64, k0: f64)
    -> nd::Array1<C64>
where S: nd::Data<Elem = f64>
{
    let amp = (a / PI.sqrt()).sqrt();
    k.mapv(|kk| {
        amp * C64::new(-0.5 * (a * (kk - k0)).powi(2), -(kk - k0) * x0).exp()
    })
}

/// Heaviside step: 0 for `x < 0` and 1 for `x ≥ 0`.
pub fn theta<S>(x: &nd::ArrayBase<S, Ix1>) -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    x.mapv(|xk| if xk >= 0.0 { 1.0 } else { 0.0 })
}

/// Rectangular barrier of the given height over `0 ≤ x < width`, zero
/// elsewhere.
pub fn square_barrier<S>(x: &nd::ArrayBase<S, Ix1>, width: f64, height: f64)
    -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    height * (theta(x) - theta(&x.mapv(|xk| xk - width)))
}

/// Clamp a potential to `height` wherever `x < lo` or `x > hi`, emulating
/// hard walls at the edges of the domain.
///
/// *Panics if `x` and `v` have different lengths*.
pub fn hard_walls<S, T>(
    x: &nd::ArrayBase<S, Ix1>,
    v: &mut nd::ArrayBase<T, Ix1>,
    lo: f64,
    hi: f64,
    height: f64,
)
where
    S: nd::Data<Elem = f64>,
    T: nd::DataMut<Elem = f64>,
{
    nd::Zip::from(x).and(v)
        .for_each(|xk, vk| { if *xk < lo || *xk > hi { *vk = height; } });
}
