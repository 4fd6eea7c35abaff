//! Expanding a small gate into an explicit `2^n x 2^n` operator.
//!
//! A caller's-choice utility, not a required operator factory: the
//! evolver and partial-trace engine never materialize the full
//! operator, and this module is never imported by either. It exists
//! for callers who prefer to build the explicit matrix and multiply it
//! against the state vector themselves.

use crate::error::{CoreError, CoreResult};
use crate::math::matrix::Matrix;
use crate::math::{C, N};

/// Extracts the bits of `index` at `positions` (ascending order, bit 0
/// of the result corresponds to `positions[0]`) into a small index.
fn project_bits(index: N, positions: &[N]) -> N {
    positions
        .iter()
        .enumerate()
        .filter(|&(_, &pos)| (index >> pos) & 1 != 0)
        .fold(0, |acc, (k, _)| acc | (1 << k))
}

/// Expands `gate` (shape `2^k x 2^k`) acting on the ordered wire list
/// `targets` into an explicit `2^n x 2^n` operator on `n` wires, acting
/// as the identity on every wire not in `targets`.
///
/// `targets[0]` plays the role of the gate's local bit 0, matching the
/// qubit-wise evolver's convention for [`crate::evolver::apply_two_qubit_gate`].
pub fn expand_for_n_wires(gate: &Matrix, targets: &[N], n: N) -> CoreResult<Matrix> {
    let k = targets.len();
    let expected_dim = 1usize << k;
    if gate.rows() != expected_dim || gate.cols() != expected_dim {
        return Err(CoreError::shape(format!(
            "gate is {}x{}, expected {0}x{0} for {1} target wire(s)",
            gate.rows(),
            expected_dim,
            k
        )));
    }
    let mut seen = Vec::with_capacity(k);
    for &t in targets {
        if t >= n {
            return Err(CoreError::invalid(format!("target wire {} out of range for {} qubits", t, n)));
        }
        if seen.contains(&t) {
            return Err(CoreError::invalid(format!("duplicate target wire {}", t)));
        }
        seen.push(t);
    }

    let dim = 1usize << n;
    let target_mask: usize = targets.iter().fold(0, |acc, &t| acc | (1 << t));
    let mut out = Matrix::zeros(dim, dim);
    for row in 0..dim {
        for col in 0..dim {
            if (row & !target_mask) != (col & !target_mask) {
                continue;
            }
            let gate_row = project_bits(row, targets);
            let gate_col = project_bits(col, targets);
            let value = gate.get(gate_row, gate_col);
            if value != C::new(0.0, 0.0) {
                out.set(row, col, value);
            }
        }
    }
    Ok(out)
}

/// Expands a 4x4 gate on the ordered wire pair `(t0, t1)` into an
/// explicit `2^n x 2^n` operator.
pub fn expand4x4_for_n_wires(gate: &Matrix, targets: (N, N), n: N) -> CoreResult<Matrix> {
    if targets.0 == targets.1 {
        return Err(CoreError::invalid("a two-qubit gate needs two distinct target wires"));
    }
    expand_for_n_wires(gate, &[targets.0, targets.1], n)
}
