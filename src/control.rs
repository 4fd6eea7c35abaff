//! Control masks with arbitrary positive/negative polarity.
//!
//! A control wire may gate an operation on either "bit must be 1" or
//! "bit must be 0"; this module represents both as an explicit list
//! of `(wire, Polarity)` pairs, validated once at construction instead
//! of re-checked on every amplitude.

use crate::error::{CoreError, CoreResult};
use crate::math::N;

/// Whether a control wire gates the operation when its bit is 1 or 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Apply when the control wire's bit is 1.
    On,
    /// Apply when the control wire's bit is 0.
    Off,
}

/// An ordered, validated set of `(wire, polarity)` control pairs.
///
/// An empty mask (`ControlMask::NONE`) means unconditional.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlMask {
    wires: Vec<(N, Polarity)>,
}

impl ControlMask {
    pub const NONE: ControlMask = ControlMask { wires: Vec::new() };

    /// Builds a control mask, rejecting duplicate wires. Disjointness
    /// from target wires is checked by the evolver, which knows the
    /// targets.
    pub fn new(wires: Vec<(N, Polarity)>) -> CoreResult<Self> {
        let mut seen = Vec::with_capacity(wires.len());
        for &(wire, _) in &wires {
            if seen.contains(&wire) {
                return Err(CoreError::invalid(format!(
                    "duplicate control wire {}",
                    wire
                )));
            }
            seen.push(wire);
        }
        Ok(Self { wires })
    }

    /// All-positive-polarity control mask, the common case.
    pub fn positive(wires: impl IntoIterator<Item = N>) -> CoreResult<Self> {
        Self::new(wires.into_iter().map(|w| (w, Polarity::On)).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }

    pub fn wires(&self) -> &[(N, Polarity)] {
        &self.wires
    }

    /// Disjointness check against a target-wire bitmask.
    pub(crate) fn check_disjoint_from(&self, target_mask: usize) -> CoreResult<()> {
        for &(wire, _) in &self.wires {
            if target_mask & (1 << wire) != 0 {
                return Err(CoreError::invalid(format!(
                    "control wire {} coincides with a target wire",
                    wire
                )));
            }
        }
        Ok(())
    }

    /// Whether basis index `r` satisfies every control in the mask.
    #[inline]
    pub(crate) fn is_satisfied_by(&self, r: usize) -> bool {
        self.wires.iter().all(|&(wire, polarity)| {
            let bit = (r >> wire) & 1;
            match polarity {
                Polarity::On => bit == 1,
                Polarity::Off => bit == 0,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mask_is_unconditional() {
        let mask = ControlMask::NONE;
        assert!(mask.is_satisfied_by(0));
        assert!(mask.is_satisfied_by(0b1011));
    }

    #[test]
    fn rejects_duplicate_wires() {
        let result = ControlMask::new(vec![(2, Polarity::On), (2, Polarity::Off)]);
        assert!(result.is_err());
    }

    #[test]
    fn mixed_polarity_mask() {
        let mask = ControlMask::new(vec![(0, Polarity::On), (1, Polarity::Off)]).unwrap();
        assert!(mask.is_satisfied_by(0b01));
        assert!(!mask.is_satisfied_by(0b11));
        assert!(!mask.is_satisfied_by(0b00));
    }

    #[test]
    fn detects_overlap_with_targets() {
        let mask = ControlMask::positive([1]).unwrap();
        assert!(mask.check_disjoint_from(1 << 1).is_err());
        assert!(mask.check_disjoint_from(1 << 0).is_ok());
    }
}
