//! Provides a solver for the one-dimensional, time-dependent Schrödinger
//! equation in a static potential via the split-operator (split-step Fourier)
//! method, along with the pieces needed to set one up:
//! - a planned [forward/inverse DFT pair][dft::Dft]
//! - Gaussian wave packets in [position][packet::gauss_x] and
//!   [momentum][packet::gauss_k] space
//! - [rectangular barriers][packet::square_barrier] and
//!   [hard walls][packet::hard_walls]
//! - [observables][utils] on sampled wavefunctions
//! - [TOML-loadable configuration][config] for the propagator and for a
//!   reference tunneling setup
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod dft;
pub mod utils;
pub mod packet;
pub mod config;
pub mod propagator;

pub mod docs;

pub use config::{ PropagatorConfig, TunnelingConfig };
pub use error::{ ConfigError, LengthError, PropError };
pub use propagator::{ Evolution, PResult, Propagator };
