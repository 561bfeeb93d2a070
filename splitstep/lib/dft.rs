//! Discrete Fourier transform pair.
//!
//! Forward transforms are unnormalized and inverse transforms carry the full
//! `1/N` factor, so that `ifft(fft(x)) == x` up to floating-point error. All
//! transforms are backed by [`rustfft`] and run in *O*(*N* log *N*) for any
//! `N`, though powers of two are fastest.

use std::sync::Arc;
use ndarray::{ self as nd, Ix1 };
use num_complex::Complex64 as C64;
use rustfft::{ Fft, FftPlanner };

// run a planned transform over an array, falling back to a contiguous copy if
// the array's memory isn't laid out in order
fn process<S>(
    plan: &dyn Fft<f64>,
    scratch: &mut [C64],
    x: &mut nd::ArrayBase<S, Ix1>,
)
where S: nd::DataMut<Elem = C64>
{
    match x.as_slice_mut() {
        Some(buf) => { plan.process_with_scratch(buf, scratch); },
        None => {
            let mut buf: Vec<C64> = x.to_vec();
            plan.process_with_scratch(&mut buf, scratch);
            x.iter_mut().zip(buf).for_each(|(xk, bk)| { *xk = bk; });
        },
    }
}

/// A forward/inverse transform pair planned once for a fixed length.
///
/// Holds its own scratch space, so repeated transforms of the same length
/// don't allocate.
#[derive(Clone)]
pub struct Dft {
    n: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    scratch: Vec<C64>,
}

impl std::fmt::Debug for Dft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dft").field("n", &self.n).finish()
    }
}

impl Dft {
    /// Plan transforms of length `n`.
    pub fn new(n: usize) -> Self {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(n);
        let inverse = planner.plan_fft_inverse(n);
        let scratch_len
            = forward.get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());
        let scratch = vec![C64::new(0.0, 0.0); scratch_len];
        Self { n, forward, inverse, scratch }
    }

    /// Transform length.
    pub fn len(&self) -> usize { self.n }

    /// Return `true` if planned for zero-length arrays.
    pub fn is_empty(&self) -> bool { self.n == 0 }

    /// Forward transform in place (unnormalized).
    ///
    /// *Panics if `x` does not have the planned length*.
    pub fn forward<S>(&mut self, x: &mut nd::ArrayBase<S, Ix1>)
    where S: nd::DataMut<Elem = C64>
    {
        assert_eq!(x.len(), self.n, "Dft::forward: length mismatch");
        process(self.forward.as_ref(), &mut self.scratch, x);
    }

    /// Inverse transform in place, normalized by `1/N`.
    ///
    /// *Panics if `x` does not have the planned length*.
    pub fn inverse<S>(&mut self, x: &mut nd::ArrayBase<S, Ix1>)
    where S: nd::DataMut<Elem = C64>
    {
        assert_eq!(x.len(), self.n, "Dft::inverse: length mismatch");
        process(self.inverse.as_ref(), &mut self.scratch, x);
        let n = self.n as f64;
        x.map_inplace(|xk| { *xk /= n; });
    }
}

/// Perform the one-dimensional, complex-valued FFT.
pub fn fft<S>(x: &nd::ArrayBase<S, Ix1>) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let mut f = x.to_owned();
    fft_inplace(&mut f);
    f
}

/// Perform the one-dimensional, complex-valued FFT in place.
pub fn fft_inplace<S>(f: &mut nd::ArrayBase<S, Ix1>)
where S: nd::DataMut<Elem = C64>
{
    Dft::new(f.len()).forward(f);
}

/// Perform the one-dimensional, complex-valued inverse FFT.
pub fn ifft<S>(f: &nd::ArrayBase<S, Ix1>) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let mut x = f.to_owned();
    ifft_inplace(&mut x);
    x
}

/// Perform the one-dimensional, complex-valued inverse FFT in place.
pub fn ifft_inplace<S>(x: &mut nd::ArrayBase<S, Ix1>)
where S: nd::DataMut<Elem = C64>
{
    Dft::new(x.len()).inverse(x);
}
