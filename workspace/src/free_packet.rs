use ndarray as nd;
use num_complex::Complex64 as C64;
use splitstep::{ config::TunnelingConfig, packet, propagator::Propagator, utils };

// follow a free Gaussian packet and compare its center against the classical
// trajectory, along with its overlap with the initial state

const FRAMES: usize = 100;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cfg = TunnelingConfig::default();
    let x: nd::Array1<f64> = cfg.grid();
    let q0: nd::Array1<C64>
        = packet::gauss_x(&x, cfg.packet_width(), cfg.x0(), cfg.packet_k0());
    let v: nd::Array1<f64> = nd::Array1::zeros(x.len());
    let mut prop = Propagator::new(&x, &q0, &v, cfg.propagator_config())?;

    println!("# t x_classical mean_x peak_x norm trapz_norm overlap");
    for _ in 0..=FRAMES {
        let q = prop.psi_x();
        println!(
            "{:.3} {:+.5e} {:+.5e} {:+.5e} {:.9} {:.9} {:.5e}",
            prop.t(),
            cfg.classical_center(prop.t()),
            utils::mean_position(&x, &q),
            utils::peak_position(&x, &q).unwrap_or(f64::NAN),
            utils::wf_prob_sum(&q, prop.dx()),
            utils::wf_norm(&q, prop.dx()),
            utils::wf_dot(&q0, &q, prop.dx()).norm(),
        );
        prop.step(cfg.dt, cfg.n_substeps)?;
    }
    Ok(())
}
