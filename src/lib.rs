//! controlr - Control Theory Algorithms Built on numr
//!
//! controlr provides solvers for the matrix equations of discrete-time
//! optimal control and estimation: the discrete algebraic Riccati equation
//! (DARE), LQR feedback gains and steady-state Kalman gains. Built on
//! numr's foundational math primitives (tensors, matmul, LU/Cholesky/QZ).
//!
//! # When to Use controlr vs numr
//!
//! - **numr**: Foundational math (tensors, basic linalg, decompositions).
//! - **controlr**: Control-specific algorithms layered on top of them
//!   (Riccati equations, gain synthesis).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     controlr                            │
//! │      (Riccati solver, LQR / Kalman gain synthesis)      │
//! └──────────────────────────┬──────────────────────────────┘
//!                            │ uses
//! ┌──────────────────────────▼──────────────────────────────┐
//! │                       numr                              │
//! │    (tensors, matmul, LU, Cholesky, QZ decomposition)    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`riccati`] - DARE solver via ordered generalized Schur (QZ)
//!   decomposition of the symplectic pencil, plus a flat-buffer boundary
//! - [`statespace`] - LQR gain, steady-state Kalman gain, Bryson's-rule
//!   cost matrices
//!
//! # Example
//!
//! ```ignore
//! use controlr::riccati::RiccatiAlgorithms;
//! use numr::runtime::cpu::{CpuClient, CpuDevice};
//! use numr::tensor::Tensor;
//!
//! let device = CpuDevice::new();
//! let client = CpuClient::new(device.clone());
//!
//! let a = Tensor::from_slice(&[1.0, 1.0, 0.0, 1.0], &[2, 2], &device);
//! let b = Tensor::from_slice(&[0.5, 1.0], &[2, 1], &device);
//! let q = Tensor::from_slice(&[1.0, 0.0, 0.0, 1.0], &[2, 2], &device);
//! let r = Tensor::from_slice(&[1.0], &[1, 1], &device);
//!
//! let x = client.solve_dare(&a, &b, &q, &r)?;
//! ```
//!
//! # Numerical approach
//!
//! The DARE is solved through the generalized real Schur form of the
//! symplectic pencil, reordered with orthogonal block swaps so the stable
//! eigenvalues lead. Orthogonal transformations preserve conditioning;
//! eigenvector matrices of near-defective pencils are never formed or
//! inverted. Problems whose pencil has eigenvalues on the unit circle are
//! rejected rather than answered inaccurately.

pub mod riccati;
pub mod statespace;

// Re-export main types for convenience
pub use riccati::{solve_dare_raw, RiccatiAlgorithms, RiccatiError, RiccatiResult};
pub use statespace::{StateSpaceAlgorithms, StateSpaceError, StateSpaceResult};

// Re-export numr types that users will commonly need
pub use numr::dtype::DType;
pub use numr::error::{Error, Result};
pub use numr::runtime::{Runtime, RuntimeClient};
pub use numr::tensor::Tensor;
