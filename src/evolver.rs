//! Qubit-wise gate application.
//!
//! Applying a gate to one or two wires of an `n`-qubit state never
//! needs the full `2^n x 2^n` operator matrix in memory: the state
//! vector factors into independent 2- or 4-dimensional subspaces
//! indexed by the bits not touched by the gate, and the gate acts
//! identically on every one of them. Each public entry point here
//! walks those subspaces once, builds a fresh output vector, and never
//! mutates its input.

use tracing::debug;

use crate::control::ControlMask;
use crate::error::{CoreError, CoreResult};
use crate::math::matrix::Matrix;
use crate::math::{C, N};
use crate::state::StateVector;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Scatters a reduced `k`-bit index into an `n`-bit index with zero
/// bits at each position in `sorted_positions` (ascending order).
///
/// Used to enumerate, for a fixed set of target wires, the distinct
/// "everything else" basis indices without ever touching the target
/// bits directly.
fn insert_zero_bits(mut index: N, sorted_positions: &[N]) -> N {
    let mut result = 0usize;
    let mut shift = 0;
    let mut prev_pos = 0;
    for &pos in sorted_positions {
        let width = pos - prev_pos;
        let mask = (1usize << width) - 1;
        result |= (index & mask) << shift;
        index >>= width;
        shift = pos + 1;
        prev_pos = pos + 1;
    }
    result |= index << shift;
    result
}

fn check_target_in_range(target: N, n: N) -> CoreResult<()> {
    if target >= n {
        return Err(CoreError::invalid(format!(
            "target wire {} out of range for {} qubits",
            target, n
        )));
    }
    Ok(())
}

fn check_gate_shape(gate: &Matrix, expected: N) -> CoreResult<()> {
    if gate.rows() != expected || gate.cols() != expected {
        return Err(CoreError::shape(format!(
            "expected a {0}x{0} gate matrix, got {1}x{2}",
            expected,
            gate.rows(),
            gate.cols()
        )));
    }
    Ok(())
}

/// Applies a 2x2 gate to `target`, a single wire of an `n`-qubit
/// state, honoring `controls`.
///
/// For every basis index whose control bits satisfy `controls`, the
/// pair of amplitudes differing only in `target`'s bit is replaced by
/// the gate's action on that pair; every other amplitude (failed
/// controls) is copied unchanged.
pub fn apply_single_qubit_gate(
    gate: &Matrix,
    target: N,
    n: N,
    psi: &StateVector,
    controls: &ControlMask,
) -> CoreResult<StateVector> {
    check_target_in_range(target, n)?;
    check_gate_shape(gate, 2)?;
    if psi.num_qubits() != n {
        return Err(CoreError::shape(format!(
            "state has {} qubits, expected {}",
            psi.num_qubits(),
            n
        )));
    }
    controls.check_disjoint_from(1 << target)?;

    let dim = psi.dim();
    let amps = psi.amplitudes();
    let mut out = amps.to_vec();

    let g00 = gate.get(0, 0);
    let g01 = gate.get(0, 1);
    let g10 = gate.get(1, 0);
    let g11 = gate.get(1, 1);

    let half = dim >> 1;
    let positions = [target];

    let pairs: Vec<(N, N)> = (0..half)
        .map(|i| {
            let r0 = insert_zero_bits(i, &positions);
            (r0, r0 | (1 << target))
        })
        .filter(|&(r0, _)| controls.is_satisfied_by(r0))
        .collect();

    let apply_pair = |r0: N, r1: N, a0: C, a1: C| -> (C, C) { (g00 * a0 + g01 * a1, g10 * a0 + g11 * a1) };

    #[cfg(feature = "parallel")]
    {
        let updates: Vec<(N, C, N, C)> = pairs
            .par_iter()
            .map(|&(r0, r1)| {
                let (new0, new1) = apply_pair(r0, r1, amps[r0], amps[r1]);
                (r0, new0, r1, new1)
            })
            .collect();
        for (r0, new0, r1, new1) in updates {
            out[r0] = new0;
            out[r1] = new1;
        }
    }
    #[cfg(not(feature = "parallel"))]
    {
        for (r0, r1) in pairs {
            let (new0, new1) = apply_pair(r0, r1, amps[r0], amps[r1]);
            out[r0] = new0;
            out[r1] = new1;
        }
    }

    debug!(target, n, controlled = !controls.is_empty(), "applied single-qubit gate");
    Ok(StateVector::from_amplitudes_unchecked(n, out))
}

/// Applies a 4x4 gate to the ordered wire pair `(t0, t1)`, where `t0`
/// plays the role of the local low bit and `t1` the local high bit of
/// the gate's own index space, honoring `controls`.
pub fn apply_two_qubit_gate(
    gate: &Matrix,
    targets: (N, N),
    n: N,
    psi: &StateVector,
    controls: &ControlMask,
) -> CoreResult<StateVector> {
    let (t0, t1) = targets;
    check_target_in_range(t0, n)?;
    check_target_in_range(t1, n)?;
    if t0 == t1 {
        return Err(CoreError::invalid("a two-qubit gate needs two distinct target wires"));
    }
    check_gate_shape(gate, 4)?;
    if psi.num_qubits() != n {
        return Err(CoreError::shape(format!(
            "state has {} qubits, expected {}",
            psi.num_qubits(),
            n
        )));
    }
    let target_mask = (1 << t0) | (1 << t1);
    controls.check_disjoint_from(target_mask)?;

    let dim = psi.dim();
    let amps = psi.amplitudes();
    let mut out = amps.to_vec();

    let mut positions = [t0, t1];
    positions.sort_unstable();

    let quarter = dim >> 2;
    let groups: Vec<[N; 4]> = (0..quarter)
        .map(|i| {
            let base = insert_zero_bits(i, &positions);
            [
                base,
                base | (1 << t0),
                base | (1 << t1),
                base | (1 << t0) | (1 << t1),
            ]
        })
        .filter(|group| controls.is_satisfied_by(group[0]))
        .collect();

    let apply_group = |values: [C; 4]| -> [C; 4] {
        let mut result = [C::new(0.0, 0.0); 4];
        for (row, slot) in result.iter_mut().enumerate() {
            let mut acc = C::new(0.0, 0.0);
            for (col, &amp) in values.iter().enumerate() {
                acc += gate.get(row, col) * amp;
            }
            *slot = acc;
        }
        result
    };

    #[cfg(feature = "parallel")]
    {
        let updates: Vec<([N; 4], [C; 4])> = groups
            .par_iter()
            .map(|&indices| {
                let values = [amps[indices[0]], amps[indices[1]], amps[indices[2]], amps[indices[3]]];
                (indices, apply_group(values))
            })
            .collect();
        for (indices, new_values) in updates {
            for (idx, value) in indices.into_iter().zip(new_values) {
                out[idx] = value;
            }
        }
    }
    #[cfg(not(feature = "parallel"))]
    {
        for indices in groups {
            let values = [amps[indices[0]], amps[indices[1]], amps[indices[2]], amps[indices[3]]];
            let new_values = apply_group(values);
            for (idx, value) in indices.into_iter().zip(new_values) {
                out[idx] = value;
            }
        }
    }

    debug!(t0, t1, n, controlled = !controls.is_empty(), "applied two-qubit gate");
    Ok(StateVector::from_amplitudes_unchecked(n, out))
}

/// Swaps wires `a` and `b`, honoring `controls`. Equivalent to, but
/// cheaper than, applying the 4x4 SWAP matrix via
/// [`apply_two_qubit_gate`]: no arithmetic is needed, only a
/// conditional exchange of amplitudes.
pub fn apply_swap(a: N, b: N, n: N, psi: &StateVector, controls: &ControlMask) -> CoreResult<StateVector> {
    check_target_in_range(a, n)?;
    check_target_in_range(b, n)?;
    if a == b {
        return Err(CoreError::invalid("swap needs two distinct wires"));
    }
    if psi.num_qubits() != n {
        return Err(CoreError::shape(format!(
            "state has {} qubits, expected {}",
            psi.num_qubits(),
            n
        )));
    }
    let target_mask = (1 << a) | (1 << b);
    controls.check_disjoint_from(target_mask)?;

    let amps = psi.amplitudes();
    let mut out = amps.to_vec();

    for (r, &amp) in amps.iter().enumerate() {
        let bit_a = (r >> a) & 1;
        let bit_b = (r >> b) & 1;
        if bit_a == bit_b || !controls.is_satisfied_by(r) {
            continue;
        }
        let partner = r ^ target_mask;
        if partner > r {
            out[r] = amps[partner];
            out[partner] = amp;
        }
    }

    debug!(a, b, n, "applied swap");
    Ok(StateVector::from_amplitudes_unchecked(n, out))
}
