//! Thin factory for the fixed library of 2x2 and 4x4 gate constants.
//!
//! Gate-catalog construction is an external collaborator of the core
//! evolver, not a dependency of it: the evolver takes gate matrices as
//! plain data and never imports this module. It ships here as a
//! sibling so a complete crate has somewhere to get `H`, `CX`,
//! `RX(theta)` and so on without every caller hand-writing
//! `Matrix::from_rows`.
//!
//! All angle arguments are degrees; internal trigonometry converts to
//! radians once, at the boundary.

use std::f64::consts::FRAC_1_SQRT_2;

use crate::error::{CoreError, CoreResult};
use crate::math::matrix::Matrix;
use crate::math::C;

fn deg_to_rad(theta_deg: f64) -> f64 {
    theta_deg.to_radians()
}

pub fn i() -> Matrix {
    Matrix::identity(2)
}

pub fn x() -> Matrix {
    Matrix::from_rows(vec![
        vec![C::new(0.0, 0.0), C::new(1.0, 0.0)],
        vec![C::new(1.0, 0.0), C::new(0.0, 0.0)],
    ])
    .expect("2x2 literal is always well-formed")
}

pub fn y() -> Matrix {
    Matrix::from_rows(vec![
        vec![C::new(0.0, 0.0), C::new(0.0, -1.0)],
        vec![C::new(0.0, 1.0), C::new(0.0, 0.0)],
    ])
    .expect("2x2 literal is always well-formed")
}

pub fn z() -> Matrix {
    Matrix::from_rows(vec![
        vec![C::new(1.0, 0.0), C::new(0.0, 0.0)],
        vec![C::new(0.0, 0.0), C::new(-1.0, 0.0)],
    ])
    .expect("2x2 literal is always well-formed")
}

pub fn h() -> Matrix {
    let s = FRAC_1_SQRT_2;
    Matrix::from_rows(vec![
        vec![C::new(s, 0.0), C::new(s, 0.0)],
        vec![C::new(s, 0.0), C::new(-s, 0.0)],
    ])
    .expect("2x2 literal is always well-formed")
}

/// The principal fractional power of an involutory Hermitian Pauli
/// matrix `M` (eigenvalues +/-1): writing `M = P+ - P-` for its
/// eigenprojectors, `M^p = P+ + e^{i*pi*p}*P-`, which satisfies the
/// group law `(M^p)^2 = M^(2p)` exactly. `p = 1/2` gives the
/// "square root of Pauli" gates (`SX`/`SY`/`SZ`); `p = 1/4` gives
/// their square roots in turn (`SSX`/`SSY`/`SSZ`).
fn frac_pauli_power(pauli: &Matrix, p: f64) -> Matrix {
    let theta = p * std::f64::consts::PI;
    let phase = C::new(theta.cos(), theta.sin());
    let c1 = (C::new(1.0, 0.0) + phase) * C::new(0.5, 0.0);
    let c2 = (C::new(1.0, 0.0) - phase) * C::new(0.5, 0.0);
    Matrix::identity(2).scale(c1).sum(&pauli.scale(c2)).expect("same shape by construction")
}

/// `X^(1/2^k)`: `XE(1) = SX`, `XE(2) = SSX`, and so on.
pub fn xe(k: u32) -> Matrix {
    frac_pauli_power(&x(), 1.0 / 2f64.powi(k as i32))
}

/// `Y^(1/2^k)`: `YE(1) = SY`, `YE(2) = SSY`, and so on.
pub fn ye(k: u32) -> Matrix {
    frac_pauli_power(&y(), 1.0 / 2f64.powi(k as i32))
}

/// `Z^(1/2^k)`: `ZE(1) = SZ`, `ZE(2) = SSZ`, and so on.
pub fn ze(k: u32) -> Matrix {
    frac_pauli_power(&z(), 1.0 / 2f64.powi(k as i32))
}

pub fn sx() -> Matrix {
    xe(1)
}
pub fn sy() -> Matrix {
    ye(1)
}
pub fn sz() -> Matrix {
    ze(1)
}
pub fn ssx() -> Matrix {
    xe(2)
}
pub fn ssy() -> Matrix {
    ye(2)
}
pub fn ssz() -> Matrix {
    ze(2)
}

pub fn sx_inv() -> Matrix {
    sx().conjugate_transpose()
}
pub fn sy_inv() -> Matrix {
    sy().conjugate_transpose()
}
pub fn sz_inv() -> Matrix {
    sz().conjugate_transpose()
}
pub fn ssx_inv() -> Matrix {
    ssx().conjugate_transpose()
}
pub fn ssy_inv() -> Matrix {
    ssy().conjugate_transpose()
}
pub fn ssz_inv() -> Matrix {
    ssz().conjugate_transpose()
}

/// `e^{i*theta} * I`: an unobservable global phase, useful only when
/// composed with other operators (e.g. via [`crate::math::matrix::Matrix::nary_mult`]).
pub fn global_phase(theta_deg: f64) -> Matrix {
    let theta = deg_to_rad(theta_deg);
    Matrix::identity(2).scale(C::new(theta.cos(), theta.sin()))
}

/// `diag(1, e^{i*theta})`.
pub fn phase(theta_deg: f64) -> Matrix {
    let theta = deg_to_rad(theta_deg);
    Matrix::from_rows(vec![
        vec![C::new(1.0, 0.0), C::new(0.0, 0.0)],
        vec![C::new(0.0, 0.0), C::new(theta.cos(), theta.sin())],
    ])
    .expect("2x2 literal is always well-formed")
}

pub fn rx(theta_deg: f64) -> Matrix {
    let half = deg_to_rad(theta_deg) / 2.0;
    let (cos, sin) = (C::new(half.cos(), 0.0), C::new(0.0, -half.sin()));
    Matrix::identity(2).scale(cos).sum(&x().scale(sin)).expect("same shape by construction")
}

pub fn ry(theta_deg: f64) -> Matrix {
    let half = deg_to_rad(theta_deg) / 2.0;
    let (cos, sin) = (C::new(half.cos(), 0.0), C::new(0.0, -half.sin()));
    Matrix::identity(2).scale(cos).sum(&y().scale(sin)).expect("same shape by construction")
}

pub fn rz(theta_deg: f64) -> Matrix {
    let half = deg_to_rad(theta_deg) / 2.0;
    let (cos, sin) = (C::new(half.cos(), 0.0), C::new(0.0, -half.sin()));
    Matrix::identity(2).scale(cos).sum(&z().scale(sin)).expect("same shape by construction")
}

/// Normalizes `axis` to a unit vector, rejecting the zero vector.
fn unit_axis(axis: (f64, f64, f64)) -> CoreResult<(f64, f64, f64)> {
    let (ax, ay, az) = axis;
    let norm = (ax * ax + ay * ay + az * az).sqrt();
    if norm < 1e-12 {
        return Err(CoreError::invalid("rotation axis must be nonzero"));
    }
    Ok((ax / norm, ay / norm, az / norm))
}

/// `cos(theta/2)*I - i*sin(theta/2)*(ax*X + ay*Y + az*Z)` for a unit
/// axis `(ax, ay, az)` (normalized internally).
pub fn rot_free_axis_angle(axis: (f64, f64, f64), theta_deg: f64) -> CoreResult<Matrix> {
    let (ax, ay, az) = unit_axis(axis)?;
    let half = deg_to_rad(theta_deg) / 2.0;
    let generator = x()
        .scale(C::new(ax, 0.0))
        .sum(&y().scale(C::new(ay, 0.0)))
        .and_then(|m| m.sum(&z().scale(C::new(az, 0.0))))
        .expect("same shape by construction");
    let cos = C::new(half.cos(), 0.0);
    let i_sin = C::new(0.0, -half.sin());
    Ok(Matrix::identity(2).scale(cos).sum(&generator.scale(i_sin)).expect("same shape by construction"))
}

/// `rot_free_axis_angle(axis, 180)`: rotation by a half-turn around
/// `axis`, the free-axis generalization of a single Pauli gate.
pub fn rot_free_axis(axis: (f64, f64, f64)) -> CoreResult<Matrix> {
    rot_free_axis_angle(axis, 180.0)
}

/// `diag(e^{i*a}, e^{i*b}) . Z`: the two-phase generalization of
/// [`z`]/[`phase`], with an independent phase on each eigenspace.
pub fn z_g(a_deg: f64, b_deg: f64) -> Matrix {
    let (a, b) = (deg_to_rad(a_deg), deg_to_rad(b_deg));
    Matrix::from_rows(vec![
        vec![C::new(a.cos(), a.sin()), C::new(0.0, 0.0)],
        vec![C::new(0.0, 0.0), C::new(-b.cos(), -b.sin())],
    ])
    .expect("2x2 literal is always well-formed")
}

/// `diag(e^{i*a}, e^{i*b}) . Y`: the two-phase generalization of [`y`].
pub fn y_g(a_deg: f64, b_deg: f64) -> Matrix {
    let (a, b) = (deg_to_rad(a_deg), deg_to_rad(b_deg));
    let phase_a = C::new(a.cos(), a.sin());
    let phase_b = C::new(b.cos(), b.sin());
    Matrix::from_rows(vec![
        vec![C::new(0.0, 0.0), C::new(0.0, -1.0) * phase_a],
        vec![C::new(0.0, 1.0) * phase_b, C::new(0.0, 0.0)],
    ])
    .expect("2x2 literal is always well-formed")
}

/// `diag(e^{i*a}, e^{i*b}) . H`: the two-phase generalization of [`h`].
pub fn h_g(a_deg: f64, b_deg: f64) -> Matrix {
    let phase = Matrix::from_rows(vec![
        vec![C::new(deg_to_rad(a_deg).cos(), deg_to_rad(a_deg).sin()), C::new(0.0, 0.0)],
        vec![C::new(0.0, 0.0), C::new(deg_to_rad(b_deg).cos(), deg_to_rad(b_deg).sin())],
    ])
    .expect("2x2 literal is always well-formed");
    phase.mult(&h()).expect("2x2 times 2x2 always matches")
}

/// The library's own internal convention: wire 0 is control, wire 1
/// is target.
fn cx_internal() -> Matrix {
    Matrix::from_rows(vec![
        vec![C::new(1.0, 0.0), C::new(0.0, 0.0), C::new(0.0, 0.0), C::new(0.0, 0.0)],
        vec![C::new(0.0, 0.0), C::new(0.0, 0.0), C::new(0.0, 0.0), C::new(1.0, 0.0)],
        vec![C::new(0.0, 0.0), C::new(0.0, 0.0), C::new(1.0, 0.0), C::new(0.0, 0.0)],
        vec![C::new(0.0, 0.0), C::new(1.0, 0.0), C::new(0.0, 0.0), C::new(0.0, 0.0)],
    ])
    .expect("4x4 literal is always well-formed")
}

/// `CX`, wire 0 control / wire 1 target unless
/// [`crate::config::NumericConfig::using_textbook_convention`] is set,
/// in which case the textbook form (wire 1 control / wire 0 target) is
/// returned instead, via [`crate::math::matrix::Matrix::reverse_endianness`].
/// Callers must not mix conventions within a run, see [`crate::config`].
pub fn cx() -> Matrix {
    let internal = cx_internal();
    if crate::config::config().using_textbook_convention {
        internal.reverse_endianness(2).expect("cx is always 4x4")
    } else {
        internal
    }
}

pub fn swap() -> Matrix {
    Matrix::from_rows(vec![
        vec![C::new(1.0, 0.0), C::new(0.0, 0.0), C::new(0.0, 0.0), C::new(0.0, 0.0)],
        vec![C::new(0.0, 0.0), C::new(0.0, 0.0), C::new(1.0, 0.0), C::new(0.0, 0.0)],
        vec![C::new(0.0, 0.0), C::new(1.0, 0.0), C::new(0.0, 0.0), C::new(0.0, 0.0)],
        vec![C::new(0.0, 0.0), C::new(0.0, 0.0), C::new(0.0, 0.0), C::new(1.0, 0.0)],
    ])
    .expect("4x4 literal is always well-formed")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unitary(m: &Matrix, eps: f64) {
        let product = m.mult(&m.conjugate_transpose()).unwrap();
        let id = Matrix::identity(m.rows());
        for i in 0..m.rows() {
            for j in 0..m.cols() {
                assert!((product.get(i, j) - id.get(i, j)).norm() < eps, "not unitary at ({i},{j})");
            }
        }
    }

    #[test]
    fn pauli_and_hadamard_are_unitary() {
        for g in [i(), x(), y(), z(), h()] {
            assert_unitary(&g, 1e-12);
        }
    }

    #[test]
    fn fractional_pauli_powers_compose_to_the_whole() {
        // SX * SX == X, up to global phase insensitivity of the test:
        // compare |entries| isn't enough, so check SX^2 == X exactly
        // (frac_pauli_power's phase convention makes this hold exactly).
        let sx2 = sx().mult(&sx()).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert!((sx2.get(i, j) - x().get(i, j)).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn ssx_squared_is_sx() {
        let ssx2 = ssx().mult(&ssx()).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert!((ssx2.get(i, j) - sx().get(i, j)).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn sx_inv_undoes_sx() {
        let product = sx().mult(&sx_inv()).unwrap();
        assert_unitary(&sx(), 1e-12);
        let id = Matrix::identity(2);
        for i in 0..2 {
            for j in 0..2 {
                assert!((product.get(i, j) - id.get(i, j)).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn rx_180_matches_x_up_to_global_phase() {
        let rx180 = rx(180.0);
        let x_mat = x();
        // RX(180) = -i X: compare after dividing out the phase factor.
        for i in 0..2 {
            for j in 0..2 {
                let scaled = rx180.get(i, j) * C::new(0.0, 1.0);
                assert!((scaled - x_mat.get(i, j)).norm() < 1e-9);
            }
        }
    }

    #[test]
    fn rot_free_axis_along_z_matches_z_up_to_phase() {
        let rot = rot_free_axis((0.0, 0.0, 1.0)).unwrap();
        let z_mat = z();
        for i in 0..2 {
            for j in 0..2 {
                let scaled = rot.get(i, j) * C::new(0.0, 1.0);
                assert!((scaled - z_mat.get(i, j)).norm() < 1e-9);
            }
        }
    }

    #[test]
    fn rot_free_axis_rejects_zero_vector() {
        assert!(rot_free_axis((0.0, 0.0, 0.0)).is_err());
    }

    #[test]
    fn generalized_gates_are_unitary() {
        assert_unitary(&z_g(30.0, -40.0), 1e-9);
        assert_unitary(&y_g(10.0, 200.0), 1e-9);
        assert_unitary(&h_g(15.0, -90.0), 1e-9);
    }

    #[test]
    fn z_g_at_zero_zero_is_z() {
        let zg = z_g(0.0, 0.0);
        let z_mat = z();
        for i in 0..2 {
            for j in 0..2 {
                assert!((zg.get(i, j) - z_mat.get(i, j)).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn z_g_reduces_to_phase_with_a_half_turn_offset() {
        // Phase(theta) = diag(1, e^{i theta}); Z_G(0, theta+180) = diag(e^{i*0}, -e^{i(theta+pi)})
        // and -e^{i(theta+pi)} = e^{i theta}, so the two coincide exactly.
        let p = phase(55.0);
        let zg = z_g(0.0, 55.0 + 180.0);
        for i in 0..2 {
            for j in 0..2 {
                assert!((p.get(i, j) - zg.get(i, j)).norm() < 1e-9);
            }
        }
    }

    #[test]
    fn cx_is_unitary_and_self_inverse() {
        assert_unitary(&cx(), 1e-12);
        let squared = cx().mult(&cx()).unwrap();
        assert_eq!(squared, Matrix::identity(4));
    }

    #[test]
    fn swap_is_unitary_and_self_inverse() {
        assert_unitary(&swap(), 1e-12);
        let squared = swap().mult(&swap()).unwrap();
        assert_eq!(squared, Matrix::identity(4));
    }

    #[test]
    fn cx_reverse_endianness_swaps_control_and_target() {
        // Textbook CX (wire 1 control, wire 0 target) flips which basis
        // state is untouched: |10> (wire0=0,wire1=1) must now flip wire 0.
        let textbook = cx().reverse_endianness(2).unwrap();
        // |01> in our bit-0-is-LSB convention is index 0b10 = 2 (wire1=1,wire0=0)
        // controlled on wire1=1 it must flip wire0: 2 -> 3
        assert_eq!(textbook.get(3, 2).re, 1.0);
    }

    #[test]
    fn cx_honors_the_process_wide_textbook_convention_flag() {
        use crate::config::{config, set_config, NumericConfig};

        let original = config();
        let internal = cx();
        let expected_textbook = internal.reverse_endianness(2).unwrap();

        set_config(NumericConfig {
            using_textbook_convention: true,
            ..original
        });
        let flipped = cx();
        set_config(original);

        assert_eq!(flipped, expected_textbook);
    }
}
