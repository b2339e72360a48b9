//! Stable-first reordering of a generalized real Schur (QZ) form.
//!
//! Given S quasi-upper-triangular, T upper triangular and orthogonal Q, Z
//! with A = Q·S·Zᵀ, B = Q·T·Zᵀ, reorders the diagonal blocks of (S, T) so
//! that every generalized eigenvalue with |α/β| < 1 appears in the leading
//! block. Each adjacent-block swap is an orthogonal equivalence: the small
//! generalized Sylvester system for the coupling blocks is solved directly,
//! the stacked solutions are orthonormalized with Householder QR, and the
//! resulting rotation pair is applied to (S, T) and accumulated into Q, Z.
//!
//! Eigenvalues on (or within tolerance of) the unit circle are rejected
//! before any swapping: the pencil is non-hyperbolic and no unique
//! stabilizing subspace exists.
//!
//! # Performance note
//!
//! The reordering extracts all four factors to the CPU for the sequential
//! block sweeps. Each swap depends on the previous one, so this is
//! inherently serial; matrices here are 2n×2n for n states, small in
//! practice.

use crate::riccati::error::{RiccatiError, RiccatiResult};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Absolute tolerance on |λ| − 1 below which the pencil is treated as
/// non-hyperbolic.
const UNIT_CIRCLE_TOL: f64 = 1e-8;

/// Subdiagonal threshold separating 1×1 from 2×2 diagonal blocks.
const SUBDIAG_TOL: f64 = 1e-10;

/// Pivot threshold for the small dense solves inside a swap.
const PIVOT_TOL: f64 = 1e-15;

/// A generalized Schur form reordered so the stable eigenvalues lead.
pub struct OrderedQz<R: Runtime> {
    /// Left orthogonal factor, swaps accumulated.
    pub q: Tensor<R>,
    /// Right orthogonal factor, swaps accumulated. Its leading
    /// `num_stable` columns span the stable right deflating subspace.
    pub z: Tensor<R>,
    /// Reordered quasi-upper-triangular S.
    pub s: Tensor<R>,
    /// Reordered upper-triangular T.
    pub t: Tensor<R>,
    /// Total size of the leading stable block.
    pub num_stable: usize,
}

/// Reorder a generalized real Schur form so eigenvalues inside the unit
/// circle come first.
///
/// 1×1 blocks are classified by |α/β|; 2×2 blocks (complex conjugate
/// pairs) by √|det S₂₂ / det T₂₂|, the modulus of the pair. Blocks with
/// β ≈ 0 carry infinite eigenvalues and are never selected; their
/// reciprocal partners (zero eigenvalues) always are.
pub fn ordqz_stable_impl<R, C>(
    _client: &C,
    q: &Tensor<R>,
    z: &Tensor<R>,
    s: &Tensor<R>,
    t: &Tensor<R>,
) -> RiccatiResult<OrderedQz<R>>
where
    R: Runtime,
    C: RuntimeClient<R>,
{
    let n = s.shape()[0];
    if n == 0 {
        return Ok(OrderedQz {
            q: q.clone(),
            z: z.clone(),
            s: s.clone(),
            t: t.clone(),
            num_stable: 0,
        });
    }

    let mut s_data = s.contiguous().to_vec::<f64>();
    let mut t_data = t.contiguous().to_vec::<f64>();
    let mut q_data = q.contiguous().to_vec::<f64>();
    let mut z_data = z.contiguous().to_vec::<f64>();

    // Scan the diagonal block structure and classify each block. The
    // unit-circle proximity check happens here, before any block has
    // moved, so a non-hyperbolic pencil fails without side effects.
    let mut blocks: Vec<(usize, usize, bool)> = Vec::new();
    let mut pos = 0;
    while pos < n {
        let size = if pos + 1 < n && s_data[(pos + 1) * n + pos].abs() > SUBDIAG_TOL {
            2
        } else {
            1
        };
        let stable = match block_modulus(&s_data, &t_data, n, pos, size) {
            None => false,
            Some(modulus) => {
                if (modulus - 1.0).abs() <= UNIT_CIRCLE_TOL {
                    return Err(RiccatiError::NonHyperbolicPencil {
                        context: format!(
                            "generalized eigenvalue with modulus {modulus} at block {pos}"
                        ),
                    });
                }
                modulus < 1.0
            }
        };
        blocks.push((pos, size, stable));
        pos += size;
    }

    // Bubble sort: whenever an unstable block precedes a stable one,
    // swap them with an orthogonal equivalence transformation.
    let mut swapped = true;
    while swapped {
        swapped = false;
        let mut idx = 0;
        while idx + 1 < blocks.len() {
            if !blocks[idx].2 && blocks[idx + 1].2 {
                let p = blocks[idx].0;
                let s1 = blocks[idx].1;
                let s2 = blocks[idx + 1].1;
                if !swap_adjacent_blocks(
                    &mut s_data,
                    &mut t_data,
                    &mut q_data,
                    &mut z_data,
                    n,
                    p,
                    s1,
                    s2,
                ) {
                    return Err(RiccatiError::NonHyperbolicPencil {
                        context: format!(
                            "adjacent eigenvalue blocks at {p} could not be separated"
                        ),
                    });
                }
                blocks[idx] = (p, s2, true);
                blocks[idx + 1] = (p + s2, s1, false);
                swapped = true;
            }
            idx += 1;
        }
    }

    let num_stable = blocks.iter().filter(|b| b.2).map(|b| b.1).sum();
    let device = s.device();

    Ok(OrderedQz {
        q: Tensor::from_slice(&q_data, &[n, n], device),
        z: Tensor::from_slice(&z_data, &[n, n], device),
        s: Tensor::from_slice(&s_data, &[n, n], device),
        t: Tensor::from_slice(&t_data, &[n, n], device),
        num_stable,
    })
}

/// Modulus of the generalized eigenvalue(s) of one diagonal block, or
/// `None` for an infinite eigenvalue (β ≈ 0).
fn block_modulus(s: &[f64], t: &[f64], n: usize, pos: usize, size: usize) -> Option<f64> {
    if size == 1 {
        let alpha = s[pos * n + pos];
        let beta = t[pos * n + pos];
        if beta.abs() < PIVOT_TOL {
            return None;
        }
        Some((alpha / beta).abs())
    } else {
        let s11 = s[pos * n + pos];
        let s12 = s[pos * n + pos + 1];
        let s21 = s[(pos + 1) * n + pos];
        let s22 = s[(pos + 1) * n + pos + 1];
        // T is upper triangular, so det T₂₂ = t11·t22.
        let t11 = t[pos * n + pos];
        let t22 = t[(pos + 1) * n + pos + 1];

        let det_s = s11 * s22 - s12 * s21;
        let det_t = t11 * t22;
        if det_t.abs() < PIVOT_TOL {
            return None;
        }
        // For a complex conjugate pair, |det S/det T| = |λ|².
        Some((det_s / det_t).abs().sqrt())
    }
}

/// Swap two adjacent diagonal blocks of the pencil.
///
/// Block 1 (size `s1`) starts at `p`; block 2 (size `s2`) at `p + s1`.
/// Solves the generalized Sylvester system
///
/// ```text
/// S11·L − R·S22 = −S12
/// T11·L − R·T22 = −T12
/// ```
///
/// then builds the right transform V from the QR of [[L],[I]] and the left
/// transform U from the QR of [[R],[I]], and applies S ← Uᵀ·S·V,
/// T ← Uᵀ·T·V, Q ← Q·U, Z ← Z·V. Returns false if the blocks' eigenvalues
/// are too close to separate.
#[allow(clippy::too_many_arguments)]
fn swap_adjacent_blocks(
    s: &mut [f64],
    t: &mut [f64],
    q: &mut [f64],
    z: &mut [f64],
    n: usize,
    p: usize,
    s1: usize,
    s2: usize,
) -> bool {
    let d = s1 + s2;
    let k = s1 * s2;
    let nn = 2 * k;

    // Assemble the 2k×2k system over unknowns [vec(L); vec(R)], row-major.
    let mut m = vec![0.0f64; nn * nn];
    let mut rhs = vec![0.0f64; nn];
    for (set, fac) in [(0usize, &*s), (k, &*t)] {
        for i in 0..s1 {
            for j in 0..s2 {
                let e = set + i * s2 + j;
                for kk in 0..s1 {
                    m[e * nn + (kk * s2 + j)] += fac[(p + i) * n + (p + kk)];
                }
                for kk in 0..s2 {
                    m[e * nn + (k + i * s2 + kk)] -= fac[(p + s1 + kk) * n + (p + s1 + j)];
                }
                rhs[e] = -fac[(p + i) * n + (p + s1 + j)];
            }
        }
    }
    if !gauss_solve(&mut m, &mut rhs, nn) {
        return false;
    }
    let (l_sol, r_sol) = rhs.split_at(k);

    // Stack [[L],[I_{s2}]] and [[R],[I_{s2}]] (both d×s2) and orthonormalize.
    let mut mz = vec![0.0f64; d * s2];
    let mut mq = vec![0.0f64; d * s2];
    for i in 0..s1 {
        for j in 0..s2 {
            mz[i * s2 + j] = l_sol[i * s2 + j];
            mq[i * s2 + j] = r_sol[i * s2 + j];
        }
    }
    for j in 0..s2 {
        mz[(s1 + j) * s2 + j] = 1.0;
        mq[(s1 + j) * s2 + j] = 1.0;
    }
    let v_full = match householder_orthonormal(&mz, d, s2) {
        Some(v) => v,
        None => return false,
    };
    let u_full = match householder_orthonormal(&mq, d, s2) {
        Some(u) => u,
        None => return false,
    };

    apply_left_block(s, n, p, d, &u_full);
    apply_left_block(t, n, p, d, &u_full);
    apply_right_block(s, n, p, d, &v_full);
    apply_right_block(t, n, p, d, &v_full);
    apply_right_block(q, n, p, d, &u_full);
    apply_right_block(z, n, p, d, &v_full);

    // The (2,1) block is zero in exact arithmetic; enforce it.
    for i in s2..d {
        for j in 0..s2 {
            s[(p + i) * n + (p + j)] = 0.0;
            t[(p + i) * n + (p + j)] = 0.0;
        }
    }
    // The leading T block is a product of triangular factors; clean its
    // strict lower part.
    for i in 0..s2 {
        for j in 0..i {
            t[(p + i) * n + (p + j)] = 0.0;
        }
    }
    // A 2×2 trailing block of T needs one left Givens rotation to restore
    // triangularity; S absorbs it into its 2×2 block and Q accumulates it.
    if s1 == 2 {
        let r0 = t[(p + s2) * n + (p + s2)];
        let r1 = t[(p + s2 + 1) * n + (p + s2)];
        let rr = (r0 * r0 + r1 * r1).sqrt();
        if rr > PIVOT_TOL {
            let cs = r0 / rr;
            let sn = r1 / rr;
            apply_givens_left(t, n, p + s2, p + s2 + 1, cs, sn);
            apply_givens_left(s, n, p + s2, p + s2 + 1, cs, sn);
            apply_givens_right(q, n, p + s2, p + s2 + 1, cs, sn);
        }
        t[(p + s2 + 1) * n + (p + s2)] = 0.0;
    }

    true
}

/// Gaussian elimination with partial pivoting; solution left in `rhs`.
/// Returns false on a pivot below [`PIVOT_TOL`].
fn gauss_solve(m: &mut [f64], rhs: &mut [f64], nn: usize) -> bool {
    for col in 0..nn {
        let mut max_row = col;
        let mut max_val = m[col * nn + col].abs();
        for row in col + 1..nn {
            let v = m[row * nn + col].abs();
            if v > max_val {
                max_val = v;
                max_row = row;
            }
        }
        if max_val < PIVOT_TOL {
            return false;
        }
        if max_row != col {
            for j in 0..nn {
                m.swap(col * nn + j, max_row * nn + j);
            }
            rhs.swap(col, max_row);
        }
        let pivot = m[col * nn + col];
        for row in col + 1..nn {
            let factor = m[row * nn + col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in col..nn {
                m[row * nn + j] -= factor * m[col * nn + j];
            }
            rhs[row] -= factor * rhs[col];
        }
    }
    for i in (0..nn).rev() {
        let mut v = rhs[i];
        for j in i + 1..nn {
            v -= m[i * nn + j] * rhs[j];
        }
        rhs[i] = v / m[i * nn + i];
    }
    true
}

/// Full d×d orthogonal factor from the Householder QR of a d×k matrix
/// (row-major). Returns `None` if a column is numerically zero.
fn householder_orthonormal(mat: &[f64], d: usize, k: usize) -> Option<Vec<f64>> {
    let mut work = mat.to_vec();
    let mut reflectors: Vec<(usize, Vec<f64>, f64)> = Vec::new();

    for col in 0..k {
        let mut norm_sq = 0.0f64;
        for row in col..d {
            norm_sq += work[row * k + col] * work[row * k + col];
        }
        let norm_val = norm_sq.sqrt();
        if norm_val < PIVOT_TOL {
            return None;
        }
        let sign = if work[col * k + col] >= 0.0 { 1.0 } else { -1.0 };
        let alpha = -sign * norm_val;

        let mut v = vec![0.0f64; d];
        v[col] = work[col * k + col] - alpha;
        for row in col + 1..d {
            v[row] = work[row * k + col];
        }
        let v_norm_sq: f64 = v[col..].iter().map(|&vi| vi * vi).sum();
        if v_norm_sq < 1e-30 {
            continue;
        }
        let beta = 2.0 / v_norm_sq;

        for j in col..k {
            let dot: f64 = (col..d).map(|r| v[r] * work[r * k + j]).sum();
            for r in col..d {
                work[r * k + j] -= beta * v[r] * dot;
            }
        }
        reflectors.push((col, v, beta));
    }

    // Q = H₁·H₂·…·H_k, built by right-applying each reflector to I.
    let mut qm = vec![0.0f64; d * d];
    for i in 0..d {
        qm[i * d + i] = 1.0;
    }
    for &(col, ref v, beta) in &reflectors {
        for row in 0..d {
            let dot: f64 = (col..d).map(|kk| qm[row * d + kk] * v[kk]).sum();
            for kk in col..d {
                qm[row * d + kk] -= beta * dot * v[kk];
            }
        }
    }
    Some(qm)
}

/// Rows p..p+d of x ← Uᵀ · rows (u is d×d row-major).
fn apply_left_block(x: &mut [f64], n: usize, p: usize, d: usize, u: &[f64]) {
    let mut vals = vec![0.0f64; d];
    for col in 0..n {
        for (i, v) in vals.iter_mut().enumerate() {
            *v = x[(p + i) * n + col];
        }
        for i in 0..d {
            let mut acc = 0.0;
            for kk in 0..d {
                acc += u[kk * d + i] * vals[kk];
            }
            x[(p + i) * n + col] = acc;
        }
    }
}

/// Columns p..p+d of x ← cols · V (v is d×d row-major).
fn apply_right_block(x: &mut [f64], n: usize, p: usize, d: usize, v: &[f64]) {
    let mut vals = vec![0.0f64; d];
    for row in 0..n {
        for (j, val) in vals.iter_mut().enumerate() {
            *val = x[row * n + p + j];
        }
        for j in 0..d {
            let mut acc = 0.0;
            for kk in 0..d {
                acc += vals[kk] * v[kk * d + j];
            }
            x[row * n + p + j] = acc;
        }
    }
}

/// Apply Givens rotation G(i,j,cs,sn) from the left: X ← G·X.
fn apply_givens_left(x: &mut [f64], n: usize, i: usize, j: usize, cs: f64, sn: f64) {
    for col in 0..n {
        let xi = x[i * n + col];
        let xj = x[j * n + col];
        x[i * n + col] = cs * xi + sn * xj;
        x[j * n + col] = -sn * xi + cs * xj;
    }
}

/// Apply Givens rotation from the right: X ← X·Gᵀ.
fn apply_givens_right(x: &mut [f64], n: usize, i: usize, j: usize, cs: f64, sn: f64) {
    for row in 0..n {
        let xi = x[row * n + i];
        let xj = x[row * n + j];
        x[row * n + i] = cs * xi + sn * xj;
        x[row * n + j] = -sn * xi + cs * xj;
    }
}
