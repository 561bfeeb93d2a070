//! Miscellaneous tools for inspecting sampled wavefunctions.

use ndarray::{ self as nd, Ix1 };
use num_complex::Complex64 as C64;
use num_traits::Float;

/// Integrate using the trapezoidal rule.
///
/// *Panics if `y` has length less than 2*.
pub fn trapz<S, A>(y: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let n: usize = y.len();
    let two = A::one() + A::one();
    let inner
        = y.iter().skip(1).take(n - 2).copied()
        .fold(A::zero(), |acc, yk| acc + yk);
    (dx / two) * (y[0] + two * inner + y[n - 1])
}

/// Calculate the norm of a wavefunction as a plain Riemann sum, Σ |ψ|² δx.
///
/// This is the quantity conserved by the split-step scheme.
pub fn wf_prob_sum<S>(q: &nd::ArrayBase<S, Ix1>, dx: f64) -> f64
where S: nd::Data<Elem = C64>
{
    q.iter().map(|qk| qk.norm_sqr()).sum::<f64>() * dx
}

/// Calculate the norm of a wavefunction using the trapezoidal rule.
///
/// *Panics if `q` has length less than 2*.
pub fn wf_norm<S>(q: &nd::ArrayBase<S, Ix1>, dx: f64) -> f64
where S: nd::Data<Elem = C64>
{
    trapz(&q.mapv(|qk| qk.norm_sqr()), dx)
}

/// Calculate the inner product ⟨q|p⟩ of two wavefunctions.
///
/// *Panics if either array has length less than 2*.
pub fn wf_dot<S, T>(q: &nd::ArrayBase<S, Ix1>, p: &nd::ArrayBase<T, Ix1>, dx: f64)
    -> C64
where
    S: nd::Data<Elem = C64>,
    T: nd::Data<Elem = C64>,
{
    let n: usize = q.len().min(p.len());
    let inner
        = q.iter().zip(p).skip(1).take(n - 2)
        .fold(C64::new(0.0, 0.0), |acc, (qk, pk)| acc + qk.conj() * pk);
    (dx / 2.0) * (
        q[0].conj() * p[0]
        + 2.0 * inner
        + q[n - 1].conj() * p[n - 1]
    )
}

/// Calculate the probability Σ |ψ|² δx contained in the half-open interval
/// `[lo, hi)`.
///
/// *Panics if `x` and `q` have different lengths*.
pub fn prob_between<S, T>(
    x: &nd::ArrayBase<S, Ix1>,
    q: &nd::ArrayBase<T, Ix1>,
    lo: f64,
    hi: f64,
    dx: f64,
) -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    assert_eq!(x.len(), q.len(), "prob_between: length mismatch");
    x.iter().zip(q)
        .filter(|(xk, _)| (lo..hi).contains(*xk))
        .map(|(_, qk)| qk.norm_sqr())
        .sum::<f64>() * dx
}

/// Calculate the expectation value of position, ⟨x⟩ = Σ x |ψ|² / Σ |ψ|².
///
/// Returns NaN for a wavefunction that is zero everywhere.
pub fn mean_position<S, T>(x: &nd::ArrayBase<S, Ix1>, q: &nd::ArrayBase<T, Ix1>)
    -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    let (num, den)
        = x.iter().zip(q)
        .fold((0.0, 0.0), |(num, den), (xk, qk)| {
            let pk = qk.norm_sqr();
            (num + xk * pk, den + pk)
        });
    num / den
}

/// Return the coordinate at which |ψ| is largest, or `None` for empty arrays.
pub fn peak_position<S, T>(x: &nd::ArrayBase<S, Ix1>, q: &nd::ArrayBase<T, Ix1>)
    -> Option<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    x.iter().zip(q)
        .map(|(xk, qk)| (*xk, qk.norm_sqr()))
        .fold(None, |best: Option<(f64, f64)>, (xk, pk)| {
            match best {
                Some((_, pb)) if pb >= pk => best,
                _ => Some((xk, pk)),
            }
        })
        .map(|(xk, _)| xk)
}
