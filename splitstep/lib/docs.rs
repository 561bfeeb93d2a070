//! Theoretical background.
//!
//! # Contents
//! - [Split-step method](#split-step-method)
//! - [Merging half-steps](#merging-half-steps)
//! - [Discrete transforms](#discrete-transforms)
//! - [Boundaries](#boundaries)
//!
//! # Split-step method
//! The time-dependent Schrödinger equation for a particle of mass *m* in a
//! static potential,
//! ```text
//!   ∂ψ      ħ² ∂²ψ
//! iħ -- = - --- ---- + V(x) ψ
//!    ∂t     2 m ∂x²
//! ```
//! has the formal solution *ψ*(*t* + *dt*) = exp(-*i* *H* *dt* / *ħ*)
//! *ψ*(*t*) with *H* = *H*<sub>*k*</sub> + *H*<sub>*v*</sub>, where
//! ```text
//! H_k = ħ² k² / 2m
//! H_v = V(x)
//! ```
//! The two terms don't commute, so the exponential doesn't factor exactly.
//! By the Baker-Campbell-Hausdorff formula, splitting it naively into a
//! potential factor and a kinetic factor carries a *O*(*dt*²) error per step
//! from the discarded commutator \[*H*<sub>*v*</sub>, *H*<sub>*k*</sub>\].
//! Sandwiching the kinetic factor between two half-sized potential factors
//! (Strang splitting) cancels that term, leaving a *O*(*dt*³) local error:
//! ```text
//!               -i H_v dt/2ħ  -i H_k dt/ħ  -i H_v dt/2ħ
//! ψ(t + dt) = [e             e            e            ] ψ(t) + O(dt³)
//! ```
//! The potential factor is diagonal in position space and the kinetic factor
//! is diagonal in momentum space, so each reduces to an elementwise phase
//! multiplication, with an FFT carrying the state between the two
//! representations.
//!
//! # Merging half-steps
//! Over *n* consecutive steps of the same size, the closing half-step of one
//! step and the opening half-step of the next combine into a single full
//! potential factor:
//! ```text
//! (V/2 T V/2)ⁿ = V/2 T (V T)ⁿ⁻¹ V/2
//! ```
//! so a propagation call costs one extra elementwise multiplication at each
//! end rather than at every step. The FFT count is unchanged at two per step,
//! plus one at the end to leave the momentum representation consistent with
//! the final position state.
//!
//! Since the potential is static, the three phase arrays
//! ```text
//! x_evolve_half = exp(-i V dt / 2ħ)
//! x_evolve      = x_evolve_half²
//! k_evolve      = exp(-i ħ k² dt / 2m)
//! ```
//! depend only on *dt* and are reused until it changes.
//!
//! # Discrete transforms
//! The continuous transform pair used here is
//! ```text
//!              1
//! φ(k) = ----- ∫ dx ψ(x) exp(-i k x)
//!          √2π
//! ```
//! Sampling on grids *x*\[*j*\] = *x*₀ + *j* *δx* and *k*\[*m*\] = *k*₀ + *m*
//! *δk* with *δk* = 2π / *N* *δx* and approximating the integral as a Riemann
//! sum gives
//! ```text
//!                          δx
//! φ[m] = exp(-i x₀ m δk) ---- Σ_j ψ[j] exp(-i k₀ x[j]) exp(-2πi j m / N)
//!                         √2π
//! ```
//! The sum is exactly a DFT, so the state is stored in "modified" form
//! ```text
//! ψ_mod[j] = ψ[j] exp(-i k₀ x[j]) δx / √2π
//! φ_mod[m] = φ[m] exp(+i x₀ m δk)
//! ```
//! for which *φ*<sub>mod</sub> = DFT(*ψ*<sub>mod</sub>) and
//! *ψ*<sub>mod</sub> = iDFT(*φ*<sub>mod</sub>). The minimum momentum *k*₀ is
//! free: any window of width *N* *δk* works as long as the state's momentum
//! content lies inside it. By default the window is centered on zero.
//!
//! # Boundaries
//! The DFT makes the domain implicitly periodic, so anything leaving one edge
//! re-enters at the other. To emulate a closed box, the potential can be
//! clamped to a very large value near the edges. The resulting phase factors
//! rotate rapidly but stay unimodular, so the scheme remains unitary and the
//! walls reflect.
