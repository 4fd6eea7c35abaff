//! Ergonomic glue over the free functions in [`crate::evolver`],
//! [`crate::partial_trace`] and [`crate::stats`].
//!
//! A quantum register wrapping a state vector plus qubit count, with
//! gate application, reduction and statistics as methods instead of
//! free functions taking the state explicitly. No measurement and no
//! circuit-description surface, both are left to callers.

use crate::config::config;
use crate::control::ControlMask;
use crate::density::DensityMatrix;
use crate::error::{CoreError, CoreResult};
use crate::evolver;
use crate::math::matrix::Matrix;
use crate::math::{C, N};
use crate::partial_trace;
use crate::stats::{self, PairwiseStats, SingleQubitStats};
use crate::state::StateVector;

/// A register of `n` qubits and the state vector evolving over them.
#[derive(Debug, Clone, PartialEq)]
pub struct Register {
    n: N,
    psi: StateVector,
}

impl Register {
    /// `|0>^{\otimes n}`.
    pub fn zero(n: N) -> Self {
        Self {
            n,
            psi: StateVector::zero(n),
        }
    }

    /// The computational basis state `|state>` on `n` qubits.
    pub fn with_state(n: N, state: N) -> CoreResult<Self> {
        Ok(Self {
            n,
            psi: StateVector::basis_state(n, state)?,
        })
    }

    /// Wraps an existing state vector.
    pub fn from_state_vector(psi: StateVector) -> Self {
        Self {
            n: psi.num_qubits(),
            psi,
        }
    }

    pub fn num_qubits(&self) -> N {
        self.n
    }

    pub fn state(&self) -> &StateVector {
        &self.psi
    }

    pub fn into_state_vector(self) -> StateVector {
        self.psi
    }

    /// Applies a 2x2 gate to `target`, honoring `controls`.
    pub fn apply_single(&mut self, gate: &Matrix, target: N, controls: &ControlMask) -> CoreResult<()> {
        self.psi = evolver::apply_single_qubit_gate(gate, target, self.n, &self.psi, controls)?;
        Ok(())
    }

    /// Applies a 4x4 gate to the ordered wire pair `(t0, t1)`, honoring
    /// `controls`.
    pub fn apply_two(&mut self, gate: &Matrix, t0: N, t1: N, controls: &ControlMask) -> CoreResult<()> {
        self.psi = evolver::apply_two_qubit_gate(gate, (t0, t1), self.n, &self.psi, controls)?;
        Ok(())
    }

    /// Swaps wires `a` and `b`, honoring `controls`.
    pub fn swap(&mut self, a: N, b: N, controls: &ControlMask) -> CoreResult<()> {
        self.psi = evolver::apply_swap(a, b, self.n, &self.psi, controls)?;
        Ok(())
    }

    /// The reduced density matrix on `qubits` (or its complement, if
    /// `keep` is false), validated as a proper density matrix (unit
    /// trace, positive semidefinite, Hermitian).
    pub fn partial_trace(&self, qubits: &[N], keep: bool) -> CoreResult<DensityMatrix> {
        let reduced = partial_trace::partial_trace_from_state(self.n, &self.psi, qubits, keep)?;
        DensityMatrix::from_matrix(reduced, config().epsilon)
    }

    /// Single-qubit descriptors for `wire`, from its own partial trace.
    pub fn single_qubit_stats(&self, wire: N) -> CoreResult<SingleQubitStats> {
        let eps = config().epsilon;
        let rho = self.partial_trace(&[wire], true)?;
        stats::single_qubit_stats(&rho, eps)
    }

    /// Pairwise descriptors for wires `(i, j)`, from their own partial
    /// trace.
    pub fn pairwise_stats(&self, i: N, j: N) -> CoreResult<PairwiseStats> {
        if i == j {
            return Err(CoreError::invalid("pairwise stats need two distinct wires"));
        }
        let eps = config().epsilon;
        let rho = self.partial_trace(&[i, j], true)?;
        stats::pairwise_stats(&rho, eps)
    }

    /// Single-qubit descriptors for every wire.
    pub fn all_single_qubit_stats(&self) -> CoreResult<Vec<SingleQubitStats>> {
        stats::all_single_qubit_stats(&self.psi, config().epsilon)
    }

    /// Pairwise descriptors for every unordered pair of wires.
    pub fn all_pairwise_stats(&self) -> CoreResult<Vec<((N, N), PairwiseStats)>> {
        stats::all_pairwise_stats(&self.psi, config().epsilon)
    }

    /// The second stabilizer Rényi entropy ("magic") of the reduced
    /// state on `qubits`.
    pub fn stabilizer_renyi_entropy(&self, qubits: &[N]) -> CoreResult<f64> {
        let eps = config().epsilon;
        let rho = self.partial_trace(qubits, true)?;
        stats::stabilizer_renyi_entropy(&rho, eps)
    }

    /// Base-state probabilities `|psi_r|^2` for every basis index `r`.
    pub fn probabilities(&self) -> Vec<f64> {
        self.psi.probabilities()
    }

    /// Raw amplitude at basis index `r`.
    pub fn amplitude(&self, r: N) -> C {
        self.psi.amplitude(r)
    }
}
