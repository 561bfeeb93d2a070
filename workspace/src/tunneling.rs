use std::path::PathBuf;
use splitstep::{ config::TunnelingConfig, utils };

// run the reference tunneling setup (or one read from the TOML file given as
// the first argument) and print per-frame observables as whitespace-separated
// columns:
//   t  x_classical  <x>  P(x < 0)  P(x >= L)  max|ψ|

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cfg: TunnelingConfig
        = match std::env::args().nth(1) {
            Some(path) => TunnelingConfig::load(PathBuf::from(path))?,
            None => TunnelingConfig::default(),
        };
    log::info!("{:?}", cfg);
    let width = cfg.barrier_width * cfg.length_scale();

    let mut prop = cfg.build()?;
    let x = prop.x().clone();
    let dx = prop.dx();
    println!("# t x_classical mean_x reflected transmitted max_amplitude");
    for _ in 0..=cfg.frames() {
        let q = prop.psi_x();
        let refl = utils::prob_between(&x, &q, f64::NEG_INFINITY, 0.0, dx);
        let trans = utils::prob_between(&x, &q, width, f64::INFINITY, dx);
        let amax = q.iter().map(|qk| qk.norm()).fold(0.0, f64::max);
        println!(
            "{:.3} {:+.5e} {:+.5e} {:.5e} {:.5e} {:.5e}",
            prop.t(),
            cfg.classical_center(prop.t()),
            utils::mean_position(&x, &q),
            refl,
            trans,
            amax,
        );
        prop.step(cfg.dt, cfg.n_substeps)?;
    }
    Ok(())
}
