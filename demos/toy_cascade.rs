//=====================================================================
// Toy cascade: a rho0 of mass 1.2 GeV with a uniform spectrum decaying
// into pi+ pi-. Run with RUST_LOG=info, or debug to follow every feed.
//=====================================================================

use anyhow::{Context, Result};
use log::info;

use feeddown_rs::{
    AzimuthGrid, Cascade, CascadeConfig, DecayChannel, ParticleTable, SpectrumGrid, Species,
};

const N_PHI: usize = 8;

fn axis(n: usize, step: f64, start: f64) -> Vec<f64> {
    (0..n).map(|i| start + i as f64 * step).collect()
}

fn build_table() -> Result<ParticleTable> {
    let parent_grid = SpectrumGrid::from_fn(axis(9, 0.5, -2.0), axis(11, 0.1, 0.0), N_PHI, |_, _, _| 1.0);
    let pion_grid = || SpectrumGrid::new(axis(11, 0.5, -2.5), axis(16, 0.1, 0.0), N_PHI);

    let species = vec![
        Species::new(113, "rho0", 1.2, 0.0, parent_grid),
        Species::new(211, "pi+", 0.14, 0.0, pion_grid()).with_quantum_numbers(0, 1, 0)?,
        Species::new(-211, "pi-", 0.14, 0.0, pion_grid()).with_quantum_numbers(0, -1, 0)?,
    ];
    let channels = vec![DecayChannel::new(113, vec![211, -211], 1.0)];
    let azimuths = AzimuthGrid::uniform(N_PHI)?;

    ParticleTable::new(species, channels, azimuths).context("Failed to build the toy particle table")
}

fn main() -> Result<()> {
    env_logger::init();

    let table = build_table()?;
    let output = Cascade::new(CascadeConfig::default())
        .run(table)
        .context("Toy cascade failed")?;
    info!("{}", output.report);

    let pion = output.table.species_by_id(211).context("pi+ missing from the output table")?;
    let grid = &pion.grid;
    let iy = grid.n_y() / 2;
    info!("{} at y = {}, phi = 0:", pion.name, grid.rapidities[iy]);
    for (ipt, pt) in grid.transverse_momenta.iter().enumerate() {
        info!("  pt = {:4.2} GeV  dN = {:.6e}", pt, grid.get(iy, ipt, 0));
    }
    Ok(())
}
