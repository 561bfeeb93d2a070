//! Reference-configuration runs: free spreading and barrier reflection.

use ndarray as nd;
use splitstep::{
    config::TunnelingConfig,
    packet::gauss_x,
    propagator::Propagator,
    utils::{ peak_position, prob_between, wf_dot, wf_norm, wf_prob_sum },
};

fn free_propagator(cfg: &TunnelingConfig) -> Propagator {
    let x = cfg.grid();
    let q0 = gauss_x(&x, cfg.packet_width(), cfg.x0(), cfg.packet_k0());
    let v: nd::Array1<f64> = nd::Array1::zeros(x.len());
    Propagator::new(&x, &q0, &v, cfg.propagator_config()).unwrap()
}

#[test]
fn free_packet_mean_advances() {
    let cfg = TunnelingConfig::default();
    let mut prop = free_propagator(&cfg);
    let x_start = prop.mean_position();
    assert!((x_start - cfg.x0()).abs() < 1e-6);

    prop.step(cfg.dt, cfg.n_substeps).unwrap();
    assert_eq!(prop.t(), 0.5);
    let shift = prop.mean_position() - x_start;
    let expected = prop.t() * cfg.packet_k0() / cfg.mass;
    assert!(
        (shift - expected).abs() < 0.05 * expected,
        "shift {} vs expected {}", shift, expected,
    );
}

#[test]
fn free_packet_peak_advances() {
    let cfg = TunnelingConfig::default();
    let mut prop = free_propagator(&cfg);
    let q = prop.psi_x();
    let peak_start = peak_position(prop.x(), &q).unwrap();
    for _ in 0..20 {
        prop.step(cfg.dt, cfg.n_substeps).unwrap();
    }
    assert!((prop.t() - 10.0).abs() < 1e-12);
    let q = prop.psi_x();
    let peak = peak_position(prop.x(), &q).unwrap();
    let expected = prop.t() * cfg.packet_k0() / cfg.mass;
    let shift = peak - peak_start;
    assert!(
        (shift - expected).abs() < 0.05 * expected,
        "shift {} vs expected {}", shift, expected,
    );
    // the packet spreads but stays normalized
    let amp = prop.amplitude();
    let q0 = gauss_x(prop.x(), cfg.packet_width(), cfg.x0(), cfg.packet_k0());
    let amp0 = q0.iter().map(|q| q.norm()).fold(0.0, f64::max);
    assert!(amp.iter().copied().fold(0.0, f64::max) < amp0);
    assert!((prop.norm() - 1.0).abs() < 1e-6);
    let q = prop.psi_x();
    assert!((wf_norm(&q, prop.dx()) - 1.0).abs() < 1e-6);
    // spreading and drift pull the state away from where it started
    let overlap = wf_dot(&q0, &q, prop.dx()).norm();
    assert!(overlap > 0.3 && overlap < 0.95, "overlap {}", overlap);
}

#[test]
fn barrier_reflection() {
    let cfg = TunnelingConfig::default();
    let mut prop = cfg.build().unwrap();
    let x = prop.x().clone();
    let dx = prop.dx();
    let width = cfg.barrier_width * cfg.length_scale();
    let total = prop.norm();
    assert!((total - 1.0).abs() < 1e-6);
    // initially everything is incident
    let q = prop.psi_x();
    assert!(prob_between(&x, &q, f64::NEG_INFINITY, 0.0, dx) > 1.0 - 1e-9);

    // 110 time units: long enough for the packet to clear the barrier but not
    // reach the walls
    for _ in 0..220 {
        prop.step(cfg.dt, cfg.n_substeps).unwrap();
    }
    assert!((prop.t() - 110.0).abs() < 1e-9);

    let q = prop.psi_x();
    let reflected = prob_between(&x, &q, f64::NEG_INFINITY, 0.0, dx);
    let inside = prob_between(&x, &q, 0.0, width, dx);
    let transmitted = prob_between(&x, &q, width, f64::INFINITY, dx);
    assert!(reflected > 0.35 && reflected < 0.85, "reflected {}", reflected);
    assert!(transmitted > 0.15 && transmitted < 0.65, "transmitted {}", transmitted);
    assert!(inside < 1e-2);
    assert!(((reflected + inside + transmitted) - total).abs() < 1e-6 * total);
    assert!((wf_prob_sum(&q, dx) - total).abs() < 1e-6 * total);

    // nothing has leaked into the walls
    let walled = prob_between(&x, &q, f64::NEG_INFINITY, -cfg.wall_position, dx)
        + prob_between(&x, &q, cfg.wall_position, f64::INFINITY, dx);
    assert!(walled < 1e-9);
}
