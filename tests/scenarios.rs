//! End-to-end scenarios and cross-module invariants, driven through
//! the public [`qsim_core::register::Register`] API rather than any
//! single module in isolation.

use approx::assert_relative_eq;
use rand::prelude::*;
use rand_distr::Uniform;

use qsim_core::control::ControlMask;
use qsim_core::gates;
use qsim_core::math::C;
use qsim_core::register::Register;
use qsim_core::state::StateVector;

const EPS: f64 = 1e-6;

#[test]
fn scenario_1_hadamard_on_single_qubit() {
    let mut reg = Register::zero(1);
    reg.apply_single(&gates::h(), 0, &ControlMask::NONE).unwrap();

    let s = std::f64::consts::FRAC_1_SQRT_2;
    assert_relative_eq!(reg.amplitude(0).re, s, epsilon = EPS);
    assert_relative_eq!(reg.amplitude(1).re, s, epsilon = EPS);

    let stats = reg.single_qubit_stats(0).unwrap();
    assert_relative_eq!(stats.purity, 1.0, epsilon = EPS);
    assert_relative_eq!(stats.bloch.0, 1.0, epsilon = EPS);
    assert_relative_eq!(stats.bloch.1, 0.0, epsilon = EPS);
    assert_relative_eq!(stats.bloch.2, 0.0, epsilon = EPS);
}

#[test]
fn scenario_2_bell_pair_via_h_then_cx() {
    let mut reg = Register::zero(2);
    reg.apply_single(&gates::h(), 0, &ControlMask::NONE).unwrap();
    reg.apply_two(&gates::cx(), 0, 1, &ControlMask::NONE).unwrap();

    let s = std::f64::consts::FRAC_1_SQRT_2;
    assert_relative_eq!(reg.amplitude(0b00).re, s, epsilon = EPS);
    assert_relative_eq!(reg.amplitude(0b01).norm(), 0.0, epsilon = EPS);
    assert_relative_eq!(reg.amplitude(0b10).norm(), 0.0, epsilon = EPS);
    assert_relative_eq!(reg.amplitude(0b11).re, s, epsilon = EPS);

    for wire in 0..2 {
        let stats = reg.single_qubit_stats(wire).unwrap();
        assert_relative_eq!(stats.purity, 0.5, epsilon = EPS);
        assert_relative_eq!(stats.von_neumann_entropy, 1.0, epsilon = EPS);
    }
    let pair = reg.pairwise_stats(0, 1).unwrap();
    assert_relative_eq!(pair.concurrence, 1.0, epsilon = EPS);
}

#[test]
fn scenario_3_readme_example_phase_kickback() {
    let mut reg = Register::zero(3);
    reg.apply_single(&gates::h(), 1, &ControlMask::NONE).unwrap();
    reg.apply_single(&gates::x(), 2, &ControlMask::NONE).unwrap();
    // CX with control on wire 1, target wire 0: local bit 0 = control.
    reg.apply_two(&gates::cx(), 1, 0, &ControlMask::NONE).unwrap();
    reg.apply_single(&gates::z(), 0, &ControlMask::NONE).unwrap();
    // CX with control on wire 1, target wire 2.
    reg.apply_two(&gates::cx(), 1, 2, &ControlMask::NONE).unwrap();

    let s = std::f64::consts::FRAC_1_SQRT_2;
    for (index, expected) in [(3usize, -s), (4usize, s)] {
        assert_relative_eq!(reg.amplitude(index).re, expected, epsilon = EPS);
        assert_relative_eq!(reg.amplitude(index).im, 0.0, epsilon = EPS);
    }
    for index in 0..8 {
        if index != 3 && index != 4 {
            assert_relative_eq!(reg.amplitude(index).norm(), 0.0, epsilon = EPS);
        }
    }
}

#[test]
fn scenario_4_ghz_state() {
    let mut reg = Register::zero(3);
    reg.apply_single(&gates::h(), 0, &ControlMask::NONE).unwrap();
    reg.apply_two(&gates::cx(), 0, 1, &ControlMask::NONE).unwrap();
    reg.apply_two(&gates::cx(), 0, 2, &ControlMask::NONE).unwrap();

    let s = std::f64::consts::FRAC_1_SQRT_2;
    assert_relative_eq!(reg.amplitude(0).re, s, epsilon = EPS);
    assert_relative_eq!(reg.amplitude(7).re, s, epsilon = EPS);
    for index in 1..7 {
        assert_relative_eq!(reg.amplitude(index).norm(), 0.0, epsilon = EPS);
    }

    for wire in 0..3 {
        let stats = reg.single_qubit_stats(wire).unwrap();
        assert_relative_eq!(stats.bloch.2, 0.0, epsilon = EPS);
        assert_relative_eq!(stats.purity, 0.5, epsilon = EPS);
    }
    for i in 0..3 {
        for j in (i + 1)..3 {
            let pair = reg.pairwise_stats(i, j).unwrap();
            assert_relative_eq!(pair.concurrence, 0.0, epsilon = EPS);
        }
    }
    let ssre = reg.stabilizer_renyi_entropy(&[0, 1, 2]).unwrap();
    assert_relative_eq!(ssre, 0.0, epsilon = EPS);
}

#[test]
fn scenario_5_biased_bell_like_state() {
    let a = 0.6;
    let b = 0.8;
    let psi = StateVector::from_amplitudes(vec![
        C::new(a, 0.0),
        C::new(0.0, 0.0),
        C::new(0.0, 0.0),
        C::new(b, 0.0),
    ])
    .unwrap();
    let reg = Register::from_state_vector(psi);

    for wire in 0..2 {
        let stats = reg.single_qubit_stats(wire).unwrap();
        assert_relative_eq!(stats.purity, a.powi(4) + b.powi(4), epsilon = EPS);
        assert_relative_eq!(stats.linear_entropy, 1.0 - (a.powi(4) + b.powi(4)), epsilon = EPS);
    }
    let pair = reg.pairwise_stats(0, 1).unwrap();
    assert_relative_eq!(pair.concurrence, 2.0 * a * b, epsilon = EPS);
}

#[test]
fn scenario_6_normalization_survives_forty_random_gates() {
    let mut rng = StdRng::seed_from_u64(20260727);
    let angle_dist = Uniform::new(-360.0_f64, 360.0);
    let mut reg = Register::zero(10);

    for _ in 0..40 {
        let choice: u32 = rng.gen_range(0..6);
        match choice {
            0 => {
                let wire: usize = rng.gen_range(0..10);
                reg.apply_single(&gates::rx(angle_dist.sample(&mut rng)), wire, &ControlMask::NONE).unwrap();
            }
            1 => {
                let wire: usize = rng.gen_range(0..10);
                reg.apply_single(&gates::ry(angle_dist.sample(&mut rng)), wire, &ControlMask::NONE).unwrap();
            }
            2 => {
                let wire: usize = rng.gen_range(0..10);
                reg.apply_single(&gates::rz(angle_dist.sample(&mut rng)), wire, &ControlMask::NONE).unwrap();
            }
            3 => {
                let (t0, t1) = distinct_pair(&mut rng, 10);
                reg.apply_two(&gates::cx(), t0, t1, &ControlMask::NONE).unwrap();
            }
            4 => {
                let (a, b) = distinct_pair(&mut rng, 10);
                reg.swap(a, b, &ControlMask::NONE).unwrap();
            }
            _ => {
                let wire: usize = rng.gen_range(0..10);
                reg.apply_single(&gates::phase(angle_dist.sample(&mut rng)), wire, &ControlMask::NONE).unwrap();
            }
        }
        let norm_sq = reg.state().norm_squared();
        assert!((norm_sq - 1.0).abs() < 1e-9, "norm drifted to {norm_sq}");
    }
}

fn distinct_pair(rng: &mut StdRng, n: usize) -> (usize, usize) {
    let a: usize = rng.gen_range(0..n);
    loop {
        let b: usize = rng.gen_range(0..n);
        if b != a {
            return (a, b);
        }
    }
}

#[test]
fn round_trip_gate_then_dagger_restores_state() {
    let mut reg = Register::zero(3);
    reg.apply_single(&gates::h(), 0, &ControlMask::NONE).unwrap();
    reg.apply_single(&gates::x(), 1, &ControlMask::NONE).unwrap();
    let before = reg.state().clone();

    let gate = gates::ry(37.0);
    let dagger = gate.conjugate_transpose();
    reg.apply_single(&gate, 2, &ControlMask::NONE).unwrap();
    reg.apply_single(&dagger, 2, &ControlMask::NONE).unwrap();

    for i in 0..before.dim() {
        assert_relative_eq!(reg.amplitude(i).re, before.amplitude(i).re, epsilon = EPS);
        assert_relative_eq!(reg.amplitude(i).im, before.amplitude(i).im, epsilon = EPS);
    }
}

#[test]
fn round_trip_controlled_gate_then_dagger_restores_state() {
    let mut reg = Register::zero(2);
    reg.apply_single(&gates::h(), 0, &ControlMask::NONE).unwrap();
    let before = reg.state().clone();

    let controls = ControlMask::positive([0]).unwrap();
    let gate = gates::rz(73.0);
    reg.apply_single(&gate, 1, &controls).unwrap();
    reg.apply_single(&gate.conjugate_transpose(), 1, &controls).unwrap();

    for i in 0..before.dim() {
        assert_relative_eq!(reg.amplitude(i).norm(), before.amplitude(i).norm(), epsilon = EPS);
    }
}

#[test]
fn partial_trace_is_transitive() {
    let mut reg = Register::zero(3);
    reg.apply_single(&gates::h(), 0, &ControlMask::NONE).unwrap();
    reg.apply_two(&gates::cx(), 0, 1, &ControlMask::NONE).unwrap();
    reg.apply_single(&gates::ry(41.0), 2, &ControlMask::NONE).unwrap();

    // Tracing out {1, 2} directly must match tracing out {1} then
    // tracing out the second remaining qubit of that once-reduced
    // matrix. Kept wires after tracing out {1} are [0, 2] in that
    // order, so wire 2 lands at local index 1 in the 4x4 reduction.
    let direct = reg.partial_trace(&[1, 2], false).unwrap();

    let after_tracing_one = reg.partial_trace(&[1], false).unwrap();
    let step_wise = qsim_core::partial_trace::partial_trace_from_density(
        2,
        after_tracing_one.matrix(),
        &[1],
        false,
    )
    .unwrap();

    for i in 0..direct.dim() {
        for j in 0..direct.dim() {
            assert_relative_eq!(direct.matrix().get(i, j).re, step_wise.get(i, j).re, epsilon = EPS);
            assert_relative_eq!(direct.matrix().get(i, j).im, step_wise.get(i, j).im, epsilon = EPS);
        }
    }
}

#[test]
fn reverse_endianness_is_involution_on_cx() {
    let cx = gates::cx();
    let once = cx.reverse_endianness(2).unwrap();
    let twice = once.reverse_endianness(2).unwrap();
    for i in 0..4 {
        for j in 0..4 {
            assert_relative_eq!(twice.get(i, j).re, cx.get(i, j).re, epsilon = EPS);
            assert_relative_eq!(twice.get(i, j).im, cx.get(i, j).im, epsilon = EPS);
        }
    }
}

#[test]
fn every_library_gate_is_unitary() {
    let gates_2x2 = vec![
        gates::i(),
        gates::x(),
        gates::y(),
        gates::z(),
        gates::h(),
        gates::sx(),
        gates::sy(),
        gates::sz(),
        gates::ssx(),
        gates::ssy(),
        gates::ssz(),
        gates::rx(17.0),
        gates::ry(-83.0),
        gates::rz(200.0),
        gates::phase(44.0),
        gates::global_phase(12.0),
        gates::z_g(30.0, -12.0),
        gates::y_g(5.0, 95.0),
        gates::h_g(-45.0, 45.0),
    ];
    for gate in gates_2x2 {
        let product = gate.mult(&gate.conjugate_transpose()).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(product.get(i, j).re, expected, epsilon = EPS);
                assert_relative_eq!(product.get(i, j).im, 0.0, epsilon = EPS);
            }
        }
    }

    for gate in [gates::cx(), gates::swap()] {
        let product = gate.mult(&gate.conjugate_transpose()).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(product.get(i, j).re, expected, epsilon = EPS);
            }
        }
    }
}
