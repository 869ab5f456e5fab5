//! Property-based tests for grover-sim using proptest
//!
//! Properties of the oracle, the diffusion and the engine that must hold for
//! every register size and marked value.

use grover_sim::{AmplitudeVector, Diffusion, GroverEngine, Oracle, Unitary, run};
use num_complex::Complex;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// `(n, m)` with `n` in 1..=6 and `m` a valid marked value for `n`.
fn register_and_marked() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=6).prop_flat_map(|n| (Just(n), 0..(1usize << n)))
}

/// A normalised complex vector of length `2^n`.
fn normalized_state(n: usize, raw: &[(f64, f64)]) -> AmplitudeVector {
    let amps: Vec<Complex<f64>> = raw.iter().take(1 << n).map(|&(re, im)| Complex::new(re, im)).collect();
    let norm = amps.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt();
    let amps = amps.into_iter().map(|a| a / norm).collect();
    AmplitudeVector::from_amplitudes(n, amps).unwrap()
}

// ============================================================================
// Oracle Properties
// ============================================================================

proptest! {
    /// Property: the oracle negates the marked amplitude and leaves every other one untouched
    #[test]
    fn oracle_flips_only_marked(
        (n, marked) in register_and_marked(),
        raw in prop::collection::vec((0.1f64..1.0, -1.0f64..1.0), 64)
    ) {
        let before = normalized_state(n, &raw);
        let mut after = before.clone();
        Oracle::new(n, marked).unwrap().apply(&mut after).unwrap();

        for (i, (a, b)) in after.amplitudes().iter().zip(before.amplitudes()).enumerate() {
            let expected = if i == marked { -*b } else { *b };
            prop_assert!(
                (a - expected).norm() < 1e-9,
                "n={} m={} index {}: got {}, expected {}",
                n, marked, i, a, expected
            );
        }
    }

    /// Property: applying the oracle twice is the identity
    #[test]
    fn oracle_is_involution((n, marked) in register_and_marked()) {
        let mut state = AmplitudeVector::new(n).unwrap();
        state.apply_hadamard_all().unwrap();
        let before = state.clone();
        let oracle = Oracle::new(n, marked).unwrap();
        oracle.apply(&mut state).unwrap();
        oracle.apply(&mut state).unwrap();

        for (a, b) in state.amplitudes().iter().zip(before.amplitudes()) {
            prop_assert!((a - b).norm() < 1e-9);
        }
    }
}

// ============================================================================
// Normalisation Properties
// ============================================================================

proptest! {
    /// Property: diffusion preserves the norm of any normalised state
    #[test]
    fn diffusion_preserves_norm(
        n in 1usize..=6,
        raw in prop::collection::vec((-1.0f64..1.0, 0.1f64..1.0), 64)
    ) {
        let mut state = normalized_state(n, &raw);
        Diffusion::new(n).unwrap().apply(&mut state).unwrap();
        prop_assert!((state.norm_sqr() - 1.0).abs() < 1e-9, "norm^2 = {}", state.norm_sqr());
    }

    /// Property: every engine step keeps the register normalised, with validation on
    #[test]
    fn engine_steps_stay_normalized(
        (n, marked) in register_and_marked(),
        k in 0usize..12
    ) {
        let mut engine = GroverEngine::new(n, marked).unwrap()
            .with_iterations(k).unwrap()
            .with_step_validation(1e-9);
        engine.superpose().unwrap();
        engine.iterate().unwrap();
        prop_assert!((engine.state().norm_sqr() - 1.0).abs() < 1e-9);
    }

    /// Property: counts always sum to the requested shots
    #[test]
    fn counts_sum_to_shots(
        (n, marked) in register_and_marked(),
        shots in 1usize..2000,
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let dist = run(n, marked, shots, None, &mut rng).unwrap();
        prop_assert_eq!(dist.total_shots(), shots);
        prop_assert_eq!(dist.iter().map(|(_, c)| c).sum::<usize>(), shots);
        prop_assert!(dist.iter().all(|(i, _)| i < (1usize << n)));
    }
}
