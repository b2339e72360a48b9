//! Integration tests for the Riccati solver public API
//!
//! Tests verify:
//! - The flat-buffer boundary round-trips row-major data
//! - The full error taxonomy is reachable from the public surface
//! - Solutions satisfy the DARE residual and symmetry properties
//! - Repeated calls are idempotent

use controlr::riccati::{solve_dare_raw, RiccatiAlgorithms, RiccatiError};
use controlr::statespace::StateSpaceAlgorithms;
use numr::algorithm::linalg::LinearAlgebraAlgorithms;
use numr::ops::{BinaryOps, MatmulOps, ReduceOps};
use numr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
use numr::tensor::Tensor;

fn setup() -> (CpuClient, CpuDevice) {
    let device = CpuDevice::new();
    let client = CpuClient::new(device.clone());
    (client, device)
}

fn frob_norm(client: &CpuClient, m: &Tensor<CpuRuntime>) -> f64 {
    let sq = client.mul(m, m).unwrap();
    let sum = client.sum(&sq, &[0, 1], false).unwrap();
    sum.to_vec::<f64>()[0].sqrt()
}

// ============================================================================
// Flat-buffer boundary
// ============================================================================

#[test]
fn test_raw_boundary_matches_tensor_api() {
    let (client, device) = setup();

    let a = [1.0, 1.0, 0.0, 1.0];
    let b = [0.5, 1.0];
    let q = [1.0, 0.0, 0.0, 1.0];
    let r = [1.0];

    let x_raw = solve_dare_raw(&a, &b, &q, &r, 2, 1).unwrap();

    let a_t = Tensor::from_slice(&a, &[2, 2], &device);
    let b_t = Tensor::from_slice(&b, &[2, 1], &device);
    let q_t = Tensor::from_slice(&q, &[2, 2], &device);
    let r_t = Tensor::from_slice(&r, &[1, 1], &device);
    let x_tensor = client
        .solve_dare(&a_t, &b_t, &q_t, &r_t)
        .unwrap()
        .to_vec::<f64>();

    assert_eq!(x_raw, x_tensor);
}

#[test]
fn test_raw_boundary_scalar_closed_form() {
    // x² - 0.81x - 1 = 0, stabilizing root.
    let x = solve_dare_raw(&[0.9], &[1.0], &[1.0], &[1.0], 1, 1).unwrap();
    let expected = (0.81 + (0.81f64 * 0.81 + 4.0).sqrt()) / 2.0;
    assert!((x[0] - expected).abs() < 1e-10, "x = {}, expected {expected}", x[0]);
}

#[test]
fn test_raw_boundary_rejects_short_buffer() {
    // Declared 3 states, but A carries only 2×2 values.
    let err = solve_dare_raw(
        &[1.0, 0.0, 0.0, 1.0],
        &[1.0, 0.0, 0.0],
        &[0.0; 9],
        &[1.0],
        3,
        1,
    )
    .unwrap_err();
    assert!(matches!(err, RiccatiError::InvalidDimension { arg: "a", .. }));
}

// ============================================================================
// Error taxonomy
// ============================================================================

#[test]
fn test_error_taxonomy_from_public_surface() {
    let (client, device) = setup();

    let eye2 = Tensor::from_slice(&[1.0, 0.0, 0.0, 1.0], &[2, 2], &device);
    let b = Tensor::from_slice(&[0.5, 1.0], &[2, 1], &device);
    let r1 = Tensor::from_slice(&[1.0], &[1, 1], &device);

    // InvalidDimension: Q is 3×3 against 2 states.
    let q_bad = Tensor::from_slice(&[0.0; 9], &[3, 3], &device);
    assert!(matches!(
        client.solve_dare(&eye2, &b, &q_bad, &r1).unwrap_err(),
        RiccatiError::InvalidDimension { arg: "q", .. }
    ));

    // NonSymmetricInput: R asymmetric beyond tolerance.
    let a = Tensor::from_slice(&[0.5, 0.0, 0.0, 0.5], &[2, 2], &device);
    let b2 = Tensor::from_slice(&[1.0, 0.0, 0.0, 1.0], &[2, 2], &device);
    let r_asym = Tensor::from_slice(&[1.0, 0.2, 0.0, 1.0], &[2, 2], &device);
    assert!(matches!(
        client.solve_dare(&a, &b2, &eye2, &r_asym).unwrap_err(),
        RiccatiError::NonSymmetricInput { arg: "r", .. }
    ));

    // SingularR: R negative definite.
    let r_neg = Tensor::from_slice(&[-1.0], &[1, 1], &device);
    assert!(matches!(
        client.solve_dare(&a, &b, &eye2, &r_neg).unwrap_err(),
        RiccatiError::SingularR { .. }
    ));

    // NonHyperbolicPencil: uncontrollable marginally stable system.
    let b_zero = Tensor::from_slice(&[0.0, 0.0], &[2, 1], &device);
    assert!(matches!(
        client.solve_dare(&eye2, &b_zero, &eye2, &r1).unwrap_err(),
        RiccatiError::NonHyperbolicPencil { .. }
    ));
}

// ============================================================================
// Solution properties
// ============================================================================

#[test]
fn test_solution_is_symmetric_psd_with_small_residual() {
    let (client, device) = setup();

    let a = Tensor::from_slice(
        &[0.9, 0.2, 0.0, -0.1, 0.8, 0.1, 0.05, 0.0, 0.7],
        &[3, 3],
        &device,
    );
    let b = Tensor::from_slice(&[1.0, 0.0, 0.0, 0.5, 0.2, 1.0], &[3, 2], &device);
    let q = Tensor::from_slice(
        &[2.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.5],
        &[3, 3],
        &device,
    );
    let r = Tensor::from_slice(&[1.0, 0.0, 0.0, 2.0], &[2, 2], &device);

    let x = client.solve_dare(&a, &b, &q, &r).unwrap();

    // Symmetry relative to the solution norm.
    let xt = x.transpose(0, 1).unwrap().contiguous();
    let asym = client.sub(&x, &xt).unwrap();
    assert!(frob_norm(&client, &asym) <= 1e-13 * frob_norm(&client, &x).max(1.0));

    // PSD via Cholesky of X + εI.
    let eps = Tensor::from_slice(
        &[1e-10, 0.0, 0.0, 0.0, 1e-10, 0.0, 0.0, 0.0, 1e-10],
        &[3, 3],
        &device,
    );
    let shifted = client.add(&x, &eps).unwrap();
    assert!(client.cholesky_decompose(&shifted).is_ok(), "X not PSD");

    // DARE residual.
    let at = a.transpose(0, 1).unwrap().contiguous();
    let bt = b.transpose(0, 1).unwrap().contiguous();
    let atxa = client
        .matmul(&client.matmul(&at, &x).unwrap(), &a)
        .unwrap();
    let xb = client.matmul(&x, &b).unwrap();
    let gram = client.add(&r, &client.matmul(&bt, &xb).unwrap()).unwrap();
    let gram_inv = LinearAlgebraAlgorithms::inverse(&client, &gram).unwrap();
    let btxa = client.matmul(&bt, &client.matmul(&x, &a).unwrap()).unwrap();
    let middle = client
        .matmul(
            &client
                .matmul(&client.matmul(&at, &xb).unwrap(), &gram_inv)
                .unwrap(),
            &btxa,
        )
        .unwrap();
    let residual = client
        .add(
            &client
                .sub(&client.sub(&atxa, &x).unwrap(), &middle)
                .unwrap(),
            &q,
        )
        .unwrap();
    let norm = frob_norm(&client, &residual);
    assert!(norm < 1e-8, "DARE residual = {}", norm);
}

#[test]
fn test_repeated_raw_calls_are_idempotent() {
    let a = [0.9, 0.2, -0.1, 0.8];
    let b = [1.0, 0.5];
    let q = [1.0, 0.0, 0.0, 1.0];
    let r = [0.5];

    let x1 = solve_dare_raw(&a, &b, &q, &r, 2, 1).unwrap();
    let x2 = solve_dare_raw(&a, &b, &q, &r, 2, 1).unwrap();
    assert_eq!(x1, x2);
}

// ============================================================================
// Gain synthesis over the public surface
// ============================================================================

#[test]
fn test_lqr_gain_stabilizes_plant() {
    let (client, device) = setup();

    let a = Tensor::from_slice(&[1.0, 0.02, 0.0, 1.0], &[2, 2], &device);
    let b = Tensor::from_slice(&[0.0002, 0.02], &[2, 1], &device);
    let q = Tensor::from_slice(&[10.0, 0.0, 0.0, 1.0], &[2, 2], &device);
    let r = Tensor::from_slice(&[0.01], &[1, 1], &device);

    let k = client.lqr_gain(&a, &b, &q, &r).unwrap();
    let bk = client.matmul(&b, &k).unwrap();
    let acl = client.sub(&a, &bk).unwrap().to_vec::<f64>();

    // Jury criterion for the 2×2 closed loop.
    let tr = acl[0] + acl[3];
    let det = acl[0] * acl[3] - acl[1] * acl[2];
    assert!(det.abs() < 1.0 && tr.abs() < 1.0 + det, "unstable closed loop");
}

#[test]
fn test_bryson_weighted_lqr_round_trip() {
    let (client, device) = setup();

    let maxima_x = Tensor::from_slice(&[1.0, 2.0], &[2], &device);
    let maxima_u = Tensor::from_slice(&[12.0], &[1], &device);
    let q = client.bryson_cost(&maxima_x, 1.0).unwrap();
    let r = client.bryson_cost(&maxima_u, 1.0).unwrap();

    let a = Tensor::from_slice(&[1.0, 0.1, 0.0, 0.9], &[2, 2], &device);
    let b = Tensor::from_slice(&[0.005, 0.1], &[2, 1], &device);

    let k = client.lqr_gain(&a, &b, &q, &r).unwrap();
    assert_eq!(k.shape(), &[1, 2]);

    let bk = client.matmul(&b, &k).unwrap();
    let acl = client.sub(&a, &bk).unwrap().to_vec::<f64>();
    let tr = acl[0] + acl[3];
    let det = acl[0] * acl[3] - acl[1] * acl[2];
    assert!(det.abs() < 1.0 && tr.abs() < 1.0 + det);
}
