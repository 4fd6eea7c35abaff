//! State vector ψ.
//!
//! The evolver returns a fresh [`StateVector`] per invocation and
//! never mutates its input, a "return new, don't mutate" contract
//! made explicit here at the data-type level.

use crate::config::config;
use crate::error::{CoreError, CoreResult};
use crate::math::{ilog2_exact, C, C_ONE, C_ZERO, N};

/// A normalized (up to ε) state vector of length `2^n`.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    n: N,
    amplitudes: Vec<C>,
}

impl StateVector {
    /// Builds a state vector from raw amplitudes, checking the length
    /// is a power of two and the norm is within ε of 1.
    pub fn from_amplitudes(amplitudes: Vec<C>) -> CoreResult<Self> {
        let n = ilog2_exact(amplitudes.len()).ok_or_else(|| {
            CoreError::shape(format!(
                "state vector length {} is not a power of two",
                amplitudes.len()
            ))
        })?;
        let sv = Self { n, amplitudes };
        sv.check_normalized()?;
        Ok(sv)
    }

    /// Builds a state vector without checking normalization, for
    /// internal use by the evolver, which preserves normalization by
    /// construction when applied gates are unitary.
    pub(crate) fn from_amplitudes_unchecked(n: N, amplitudes: Vec<C>) -> Self {
        Self { n, amplitudes }
    }

    /// The computational basis state `|state>` on `n` qubits.
    pub fn basis_state(n: N, state: N) -> CoreResult<Self> {
        let dim = 1usize << n;
        if state >= dim {
            return Err(CoreError::invalid(format!(
                "basis state {} out of range for {} qubits",
                state, n
            )));
        }
        let mut amplitudes = vec![C_ZERO; dim];
        amplitudes[state] = C_ONE;
        Ok(Self { n, amplitudes })
    }

    /// `|0>^{\otimes n}`.
    pub fn zero(n: N) -> Self {
        Self::basis_state(n, 0).expect("state 0 is always in range")
    }

    /// Tensor-power ket: the product of `kets` in the given order,
    /// `[q_{n-1}, ..., q_0]`.
    pub fn tensor_product(kets: &[StateVector]) -> CoreResult<Self> {
        if kets.is_empty() {
            return Err(CoreError::invalid("tensor_product requires at least one ket"));
        }
        let mut n = kets[0].n;
        let mut amplitudes = kets[0].amplitudes.clone();
        for ket in &kets[1..] {
            let mut combined = Vec::with_capacity(amplitudes.len() * ket.amplitudes.len());
            for &a in &amplitudes {
                for &b in &ket.amplitudes {
                    combined.push(a * b);
                }
            }
            amplitudes = combined;
            n += ket.n;
        }
        Ok(Self { n, amplitudes })
    }

    pub fn num_qubits(&self) -> N {
        self.n
    }

    pub fn dim(&self) -> N {
        self.amplitudes.len()
    }

    pub fn amplitudes(&self) -> &[C] {
        &self.amplitudes
    }

    pub fn amplitude(&self, index: N) -> C {
        self.amplitudes[index]
    }

    pub fn norm_squared(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    pub fn check_normalized(&self) -> CoreResult<()> {
        let eps = config().epsilon;
        let norm_sq = self.norm_squared();
        if (norm_sq - 1.0).abs() > eps {
            return Err(CoreError::numerical(format!(
                "state vector not normalized: sum |psi|^2 = {}",
                norm_sq
            )));
        }
        Ok(())
    }
}
