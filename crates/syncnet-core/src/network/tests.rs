//! Tests for the network module.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::config::{AdaptiveConfig, NetworkConfig};
use crate::error::SyncNetError;
use crate::initial::InitialPhases;
use crate::solver::SolveType;
use crate::topology::ConnectionType;

use super::{CouplingContext, CouplingFunction, SyncNetwork};

fn test_config(size: usize) -> NetworkConfig {
    NetworkConfig {
        size,
        weight: 1.0,
        frequency: 0.0,
        cluster: 1,
        connection: ConnectionType::AllToAll,
        initial_phases: InitialPhases::RandomUniform,
        seed: Some(42),
    }
}

fn assert_partition_covers(ensembles: &[Vec<usize>], size: usize) {
    let mut all: Vec<usize> = ensembles.iter().flatten().copied().collect();
    all.sort_unstable();
    assert_eq!(all, (0..size).collect::<Vec<_>>());
}

#[test]
fn test_construction_basics() {
    let network = SyncNetwork::new(&test_config(10)).unwrap();
    assert_eq!(network.size(), 10);
    assert_eq!(network.weight(), 1.0);
    assert_eq!(network.cluster_order(), 1);
    assert_eq!(network.connection(), ConnectionType::AllToAll);

    for phase in network.phases() {
        assert!((0.0..2.0 * PI).contains(&phase));
    }
    // frequency factor 0 gives identical zero natural frequencies
    assert!(network.frequencies().iter().all(|&f| f == 0.0));
}

#[test]
fn test_frequencies_scaled_by_factor() {
    let config = NetworkConfig {
        frequency: 2.0,
        ..test_config(20)
    };
    let network = SyncNetwork::new(&config).unwrap();
    let frequencies = network.frequencies();
    assert!(frequencies.iter().all(|&f| (0.0..2.0).contains(&f)));
    assert!(frequencies.iter().any(|&f| f > 0.0));
}

#[test]
fn test_same_seed_same_network() {
    let a = SyncNetwork::new(&test_config(16)).unwrap();
    let b = SyncNetwork::new(&test_config(16)).unwrap();
    assert_eq!(a.phases(), b.phases());
    assert_eq!(a.frequencies(), b.frequencies());
}

#[test]
fn test_invalid_config_rejected() {
    let config = NetworkConfig {
        size: 0,
        ..test_config(1)
    };
    assert!(matches!(
        SyncNetwork::new(&config),
        Err(SyncNetError::ConfigError(_))
    ));

    let config = NetworkConfig {
        cluster: 0,
        ..test_config(4)
    };
    assert!(SyncNetwork::new(&config).is_err());
}

#[test]
fn test_grid_requires_square_size() {
    let config = NetworkConfig {
        connection: ConnectionType::GridFour,
        ..test_config(10)
    };
    assert!(matches!(
        SyncNetwork::new(&config),
        Err(SyncNetError::InvalidArgument { .. })
    ));
}

#[test]
fn test_set_phase_validation() {
    let mut network = SyncNetwork::new(&test_config(3)).unwrap();
    network.set_phase(1, 1.25).unwrap();
    assert_eq!(network.oscillator(1).unwrap().phase, 1.25);

    assert!(network.set_phase(3, 0.0).is_err());
    assert!(network.set_phase(0, f64::NAN).is_err());
    assert!(network.set_phase(0, f64::INFINITY).is_err());
}

#[test]
fn test_phase_kuramoto_pairwise_attraction() {
    let mut network = SyncNetwork::new(&test_config(2)).unwrap();
    network.set_phase(0, 0.0).unwrap();
    network.set_phase(1, FRAC_PI_2).unwrap();

    let phases = network.phases();
    // dθ_0/dt = 0 + (1/1) · sin(π/2 − 0) = 1
    let derivative = network.phase_kuramoto(0.0, 0.0, 0, &phases);
    assert!((derivative - 1.0).abs() < 1e-12);
    // symmetric pull on the other oscillator
    let derivative = network.phase_kuramoto(0.0, FRAC_PI_2, 1, &phases);
    assert!((derivative + 1.0).abs() < 1e-12);
}

#[test]
fn test_phase_kuramoto_isolated_oscillator() {
    let config = NetworkConfig {
        connection: ConnectionType::None,
        ..test_config(2)
    };
    let network = SyncNetwork::new(&config).unwrap();
    let phases = network.phases();
    // no neighbors: the coupling term vanishes, ω = 0 here
    assert_eq!(network.phase_kuramoto(0.0, phases[0], 0, &phases), 0.0);
}

#[test]
fn test_sync_order_identical_phases_is_one() {
    let mut network = SyncNetwork::new(&test_config(5)).unwrap();
    for index in 0..5 {
        network.set_phase(index, 1.3).unwrap();
    }
    assert!((network.sync_order() - 1.0).abs() < 1e-12);
}

#[test]
fn test_sync_order_identical_modulo_two_pi() {
    let mut network = SyncNetwork::new(&test_config(3)).unwrap();
    network.set_phase(0, 1.0).unwrap();
    network.set_phase(1, 1.0 + 2.0 * PI).unwrap();
    network.set_phase(2, 1.0 - 2.0 * PI).unwrap();
    assert!((network.sync_order() - 1.0).abs() < 1e-9);
}

#[test]
fn test_sync_order_equipartition_is_incoherent() {
    let config = NetworkConfig {
        initial_phases: InitialPhases::Equipartition,
        ..test_config(4)
    };
    let network = SyncNetwork::new(&config).unwrap();
    assert!(network.sync_order() < 1e-8);
}

#[test]
fn test_sync_order_in_unit_interval() {
    let network = SyncNetwork::new(&test_config(64)).unwrap();
    let order = network.sync_order();
    assert!((0.0..=1.0).contains(&order));
}

#[test]
fn test_sync_local_order_bounds() {
    let mut network = SyncNetwork::new(&test_config(4)).unwrap();
    for index in 0..4 {
        network.set_phase(index, 2.0).unwrap();
    }
    assert!((network.sync_local_order() - 1.0).abs() < 1e-12);

    let config = NetworkConfig {
        connection: ConnectionType::None,
        ..test_config(4)
    };
    let network = SyncNetwork::new(&config).unwrap();
    assert_eq!(network.sync_local_order(), 0.0);
}

#[test]
fn test_simulate_sample_counts_and_times() {
    let mut network = SyncNetwork::new(&test_config(6)).unwrap();
    let dynamic = network.simulate(4, 2.0, SolveType::Fast, true).unwrap();

    assert_eq!(dynamic.len(), 6);
    for trajectory in &dynamic {
        assert_eq!(trajectory.len(), 5);
        for (k, sample) in trajectory.iter().enumerate() {
            assert_eq!(sample.time, 0.5 * k as f64);
        }
    }
}

#[test]
fn test_simulate_final_only() {
    let mut network = SyncNetwork::new(&test_config(6)).unwrap();
    let dynamic = network.simulate(4, 2.0, SolveType::Fast, false).unwrap();

    assert_eq!(dynamic.len(), 6);
    for trajectory in &dynamic {
        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory[0].time, 2.0);
    }
}

#[test]
fn test_simulate_static_matches_simulate() {
    let mut a = SyncNetwork::new(&test_config(8)).unwrap();
    let mut b = SyncNetwork::new(&test_config(8)).unwrap();

    let via_simulate = a.simulate(10, 1.0, SolveType::Rk4, true).unwrap();
    let via_static = b.simulate_static(10, 1.0, SolveType::Rk4, true).unwrap();
    assert_eq!(via_simulate, via_static);
}

#[test]
fn test_simulate_invalid_arguments() {
    let mut network = SyncNetwork::new(&test_config(4)).unwrap();
    assert!(network.simulate(0, 1.0, SolveType::Fast, false).is_err());
    assert!(network.simulate(10, 0.0, SolveType::Fast, false).is_err());
    assert!(network.simulate(10, -1.0, SolveType::Fast, false).is_err());
    assert!(network
        .simulate(10, f64::NAN, SolveType::Fast, false)
        .is_err());
}

#[test]
fn test_single_euler_step_is_jacobi() {
    let mut network = SyncNetwork::new(&test_config(2)).unwrap();
    network.set_phase(0, 0.0).unwrap();
    network.set_phase(1, FRAC_PI_2).unwrap();

    network.simulate(1, 0.1, SolveType::Fast, false).unwrap();

    // Both derivatives were taken against the old vector: the second
    // oscillator saw θ_0 = 0, not the already-updated 0.1.
    let phases = network.phases();
    assert!((phases[0] - 0.1).abs() < 1e-12);
    assert!((phases[1] - (FRAC_PI_2 - 0.1)).abs() < 1e-12);
}

#[test]
fn test_simulation_is_deterministic() {
    let mut a = SyncNetwork::new(&test_config(12)).unwrap();
    let mut b = SyncNetwork::new(&test_config(12)).unwrap();

    a.simulate(50, 5.0, SolveType::Rkf45, false).unwrap();
    b.simulate(50, 5.0, SolveType::Rkf45, false).unwrap();
    assert_eq!(a.phases(), b.phases());
}

#[test]
fn test_zero_weight_preserves_relative_phase() {
    let config = NetworkConfig {
        weight: 0.0,
        ..test_config(2)
    };
    let mut network = SyncNetwork::new(&config).unwrap();
    network.set_phase(0, 1.0).unwrap();
    network.set_phase(1, 2.0).unwrap();

    network.simulate(100, 10.0, SolveType::Rk4, false).unwrap();

    // coupling is the only mechanism that changes relative phase
    assert_eq!(network.phases(), vec![1.0, 2.0]);
    let ensembles = network.allocate_sync_ensembles(0.1).unwrap();
    assert_eq!(ensembles.len(), 2);
}

#[test]
fn test_divergence_detected() {
    let config = NetworkConfig {
        weight: f64::MAX,
        ..test_config(2)
    };
    let mut network = SyncNetwork::new(&config).unwrap();
    network.set_phase(0, 0.0).unwrap();
    network.set_phase(1, FRAC_PI_2).unwrap();

    let result = network.simulate(1, 2.0, SolveType::Fast, false);
    assert!(matches!(
        result,
        Err(SyncNetError::NumericDivergence { .. })
    ));
}

#[test]
fn test_allocate_partition_covers_all_indices() {
    let network = SyncNetwork::new(&test_config(32)).unwrap();
    for tolerance in [0.0, 0.01, 0.5, 2.0 * PI] {
        let ensembles = network.allocate_sync_ensembles(tolerance).unwrap();
        assert_partition_covers(&ensembles, 32);
    }
}

#[test]
fn test_allocate_transitive_chaining() {
    let mut network = SyncNetwork::new(&test_config(3)).unwrap();
    network.set_phase(0, 0.0).unwrap();
    network.set_phase(1, 0.009).unwrap();
    network.set_phase(2, 0.018).unwrap();

    // 0 and 2 are farther apart than the tolerance but linked through 1
    let ensembles = network.allocate_sync_ensembles(0.01).unwrap();
    assert_eq!(ensembles, vec![vec![0, 1, 2]]);

    let ensembles = network.allocate_sync_ensembles(0.005).unwrap();
    assert_eq!(ensembles.len(), 3);
}

#[test]
fn test_allocate_extreme_tolerances() {
    let network = SyncNetwork::new(&test_config(10)).unwrap();

    let ensembles = network.allocate_sync_ensembles(2.0 * PI).unwrap();
    assert_eq!(ensembles.len(), 1);
    assert_eq!(ensembles[0].len(), 10);

    assert!(network.allocate_sync_ensembles(-0.1).is_err());
    assert!(network.allocate_sync_ensembles(f64::NAN).is_err());
}

#[test]
fn test_simulate_dynamic_converges_fully_connected() {
    let config = NetworkConfig {
        weight: 10.0,
        ..test_config(10)
    };
    let mut network = SyncNetwork::new(&config).unwrap();

    let trace = network
        .simulate_dynamic(0.99, SolveType::Rk4, true, &AdaptiveConfig::default())
        .unwrap();

    assert!(!trace.is_empty());
    assert!(trace.last().unwrap().order >= 0.99);
    assert!(network.sync_order() >= 0.99);
}

#[test]
fn test_simulate_dynamic_unreachable_order_hits_cap() {
    let config = NetworkConfig {
        weight: 0.0,
        ..test_config(2)
    };
    let mut network = SyncNetwork::new(&config).unwrap();
    network.set_phase(0, 1.0).unwrap();
    network.set_phase(1, 2.0).unwrap();

    let options = AdaptiveConfig {
        step: 0.25,
        threshold_changes: 0.0,
        max_iterations: 5,
        ..Default::default()
    };
    let trace = network
        .simulate_dynamic(1.5, SolveType::Fast, true, &options)
        .unwrap();

    // one sample at t = 0 plus exactly max_iterations increments
    assert_eq!(trace.len(), 6);
    for (k, sample) in trace.iter().enumerate() {
        assert!((sample.time - 0.25 * k as f64).abs() < 1e-12);
        assert!(sample.order < 1.0);
    }
}

#[test]
fn test_simulate_dynamic_terminal_sample_only() {
    let config = NetworkConfig {
        weight: 10.0,
        ..test_config(8)
    };
    let mut network = SyncNetwork::new(&config).unwrap();
    let trace = network
        .simulate_dynamic(0.95, SolveType::Rk4, false, &AdaptiveConfig::default())
        .unwrap();
    assert_eq!(trace.len(), 1);
    assert!(trace[0].order >= 0.95);
}

#[test]
fn test_simulate_dynamic_invalid_arguments() {
    let mut network = SyncNetwork::new(&test_config(4)).unwrap();

    let bad_step = AdaptiveConfig {
        step: 0.0,
        ..Default::default()
    };
    assert!(network
        .simulate_dynamic(0.9, SolveType::Fast, false, &bad_step)
        .is_err());

    let bad_int = AdaptiveConfig {
        step_int: -1.0,
        ..Default::default()
    };
    assert!(network
        .simulate_dynamic(0.9, SolveType::Fast, false, &bad_int)
        .is_err());

    let bad_cap = AdaptiveConfig {
        max_iterations: 0,
        ..Default::default()
    };
    assert!(network
        .simulate_dynamic(0.9, SolveType::Fast, false, &bad_cap)
        .is_err());

    assert!(network
        .simulate_dynamic(f64::NAN, SolveType::Fast, false, &AdaptiveConfig::default())
        .is_err());
}

#[test]
fn test_two_cluster_harmonic_partitions_basins() {
    let config = NetworkConfig {
        cluster: 2,
        weight: 2.0,
        ..test_config(4)
    };
    let mut network = SyncNetwork::new(&config).unwrap();
    network.set_phase(0, 0.1).unwrap();
    network.set_phase(1, 0.2).unwrap();
    network.set_phase(2, PI + 0.1).unwrap();
    network.set_phase(3, PI + 0.2).unwrap();

    network.simulate(300, 30.0, SolveType::Rk4, false).unwrap();

    // q = 2 stabilizes two phase-locked groups half a turn apart
    let ensembles = network.allocate_sync_ensembles(0.3).unwrap();
    assert_eq!(ensembles.len(), 2);
    assert_partition_covers(&ensembles, 4);
    assert!(ensembles.contains(&vec![0, 1]));
    assert!(ensembles.contains(&vec![2, 3]));
}

#[test]
fn test_custom_coupling_variant() {
    #[derive(Debug)]
    struct UnitDrift;

    impl CouplingFunction for UnitDrift {
        fn phase_derivative(
            &self,
            _t: f64,
            _theta: f64,
            _index: usize,
            _ctx: &CouplingContext<'_>,
        ) -> f64 {
            1.0
        }
    }

    let mut network = SyncNetwork::with_coupling(&test_config(3), Box::new(UnitDrift)).unwrap();
    let before = network.phases();
    network.simulate(10, 1.0, SolveType::Rk4, false).unwrap();

    for (after, before) in network.phases().iter().zip(before.iter()) {
        assert!((after - before - 1.0).abs() < 1e-9);
    }
}
