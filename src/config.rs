//! Process-wide numeric configuration.
//!
//! The endianness convention and the default tolerances are
//! initialization parameters, not per-call arguments. Mixing
//! conventions within a single run is a correctness bug the type
//! system can't catch, so it lives behind one global `lazy_static`
//! `RwLock` instead of threading a handle through every call.

use std::sync::RwLock;

/// Default ε for "equal up to noise" tests on amplitudes/traces.
pub const DEFAULT_EPSILON: f64 = 1e-9;
/// Default tolerance for clamping small negative eigenvalues to zero.
pub const DEFAULT_EIGENVALUE_EPSILON: f64 = 1e-7;

/// Process-wide numeric configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericConfig {
    /// Tolerance for magnitude/trace/normalization comparisons.
    pub epsilon: f64,
    /// Tolerance for clamping small negative eigenvalues to zero.
    pub eigenvalue_epsilon: f64,
    /// Selects the alternative bit/wire convention at the gate-library
    /// level. `false` (default): `CX` has wire 0 as control, as stored
    /// in [`crate::gates::cx`]. `true`: textbook convention, wire 1 as
    /// control, obtained internally via
    /// [`crate::math::matrix::Matrix::reverse_endianness`].
    pub using_textbook_convention: bool,
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            eigenvalue_epsilon: DEFAULT_EIGENVALUE_EPSILON,
            using_textbook_convention: false,
        }
    }
}

lazy_static::lazy_static! {
    static ref CONFIG: RwLock<NumericConfig> = RwLock::new(NumericConfig::default());
}

/// Read the current process-wide configuration.
pub fn config() -> NumericConfig {
    *CONFIG.read().unwrap()
}

/// Replace the process-wide configuration.
///
/// Callers must not mix conventions within a run: call this once,
/// before building any state vectors, if you need a non-default
/// convention or tolerance.
pub fn set_config(new_config: NumericConfig) {
    *CONFIG.write().unwrap() = new_config;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = config();
        assert_eq!(cfg.epsilon, 1e-9);
        assert_eq!(cfg.eigenvalue_epsilon, 1e-7);
        assert!(!cfg.using_textbook_convention);
    }

    #[test]
    fn set_config_round_trips() {
        let original = config();
        set_config(NumericConfig {
            epsilon: 1e-6,
            ..original
        });
        assert_eq!(config().epsilon, 1e-6);
        set_config(original);
    }
}
