#![allow(unused)]

//=====================================================================
// Toy particle tables shared by the tests
//=====================================================================

use std::sync::Mutex;

use lazy_static::lazy_static;

use crate::cascade::Cascade;
use crate::config::{CascadeConfig, SpectrumSettings};
use crate::particles::{DecayChannel, ParticleTable, Species};
use crate::spectrum::{AzimuthGrid, SpectrumGrid};

pub const RHO_ID: i32 = 113;
pub const PI_PLUS_ID: i32 = 211;
pub const PI_MINUS_ID: i32 = -211;
pub const PION_MASS: f64 = 0.14;
pub const TEMPERATURE: f64 = 0.25;

// Axes of the two-body box scenario
pub const BOX_PARENT_RAPIDITIES: [f64; 5] = [-2.0, -1.0, 0.0, 1.0, 2.0];
pub const BOX_PARENT_PTS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];
pub const BOX_DAUGHTER_RAPIDITIES: [f64; 5] = [-5.0, -1.0, 0.0, 1.0, 5.0];
pub const BOX_DAUGHTER_PTS: [f64; 9] = [0.0, 0.1, 0.3, 0.6, 0.9, 1.3, 1.5, 2.0, 3.0];

// The box table is cascaded once and reused by every test that reads it
lazy_static! {
    pub static ref CASCADED_BOX: Mutex<Option<ParticleTable>> = Mutex::new(None);
}

// `n` points from 0 with spacing `step`
pub fn pt_axis(n: usize, step: f64) -> Vec<f64> {
    (0..n).map(|i| i as f64 * step).collect()
}

// Boltzmann-like spectrum exp(-mt / T), the same at every rapidity and azimuth
pub fn thermal_grid(rapidities: Vec<f64>, pts: Vec<f64>, n_phi: usize, mass: f64) -> SpectrumGrid {
    let nodes = pts.clone();
    SpectrumGrid::from_fn(rapidities, pts, n_phi, move |_, ipt, _| {
        (-(nodes[ipt] * nodes[ipt] + mass * mass).sqrt() / TEMPERATURE).exp()
    })
}

pub fn flat_grid(rapidities: Vec<f64>, pts: Vec<f64>, n_phi: usize, value: f64) -> SpectrumGrid {
    SpectrumGrid::from_fn(rapidities, pts, n_phi, move |_, _, _| value)
}

pub fn charged_pion(id: i32, grid: SpectrumGrid) -> Species {
    let (name, charge) = if id > 0 { ("pi+", 1) } else { ("pi-", -1) };
    Species::new(id, name, PION_MASS, 0.0, grid)
        .with_quantum_numbers(0, charge, 0)
        .unwrap()
}

// rho0 -> pi+ pi- with the given spectra, processed in that order
pub fn rho_table(rho_mass: f64, rho_width: f64, rho_grid: SpectrumGrid, pion_grid: SpectrumGrid) -> ParticleTable {
    let n_phi = rho_grid.n_phi;
    let species = vec![
        Species::new(RHO_ID, "rho0", rho_mass, rho_width, rho_grid),
        charged_pion(PI_PLUS_ID, pion_grid.clone()),
        charged_pion(PI_MINUS_ID, pion_grid),
    ];
    let channels = vec![DecayChannel::new(RHO_ID, vec![PI_PLUS_ID, PI_MINUS_ID], 1.0)];
    ParticleTable::new(species, channels, AzimuthGrid::uniform(n_phi).unwrap()).unwrap()
}

// Heavy resonance of mass 1.2 with a uniform spectrum decaying into two pions
pub fn box_table() -> ParticleTable {
    rho_table(
        1.2,
        0.0,
        flat_grid(BOX_PARENT_RAPIDITIES.to_vec(), BOX_PARENT_PTS.to_vec(), 4, 1.0),
        flat_grid(BOX_DAUGHTER_RAPIDITIES.to_vec(), BOX_DAUGHTER_PTS.to_vec(), 4, 0.0),
    )
}

pub fn get_cascaded_box() -> ParticleTable {
    let mut table = CASCADED_BOX.lock().unwrap();

    // Only run the cascade if it has not run yet
    if table.is_none() {
        let output = Cascade::new(CascadeConfig::default()).run(box_table()).unwrap();
        *table = Some(output.table);
    }
    table.as_ref().unwrap().clone()
}

// Boost-invariant thermal rho decaying into pions with empty spectra
pub fn thermal_rho_table(rho_mass: f64) -> ParticleTable {
    rho_table(
        rho_mass,
        0.0,
        thermal_grid(vec![0.0], pt_axis(41, 0.1), 8, rho_mass),
        flat_grid(vec![0.0], pt_axis(81, 0.05), 8, 0.0),
    )
}

pub fn boost_invariant_config() -> CascadeConfig {
    CascadeConfig {
        spectrum: SpectrumSettings { boost_invariant: true, ..SpectrumSettings::default() },
        ..CascadeConfig::default()
    }
}

// Lambda and anti-Lambda decaying into nucleons and pions. The
// anti-Lambda spectrum is the Lambda one scaled by `anti_scale`.
pub fn lambda_table(anti_scale: f64) -> ParticleTable {
    let rapidities = vec![0.0];
    let pts = pt_axis(13, 0.25);
    let lambda_grid = thermal_grid(rapidities.clone(), pts.clone(), 4, 1.116);
    let mut anti_grid = lambda_grid.clone();
    anti_grid.values.iter_mut().for_each(|v| *v *= anti_scale);
    let empty = flat_grid(rapidities, pts, 4, 0.0);

    let baryon = |id: i32, name: &str, mass: f64, grid: SpectrumGrid, charge: i32, strangeness: i32| {
        Species::new(id, name, mass, 0.0, grid)
            .with_quantum_numbers(id.signum(), charge, strangeness)
            .unwrap()
    };
    let species = vec![
        baryon(3122, "Lambda", 1.116, lambda_grid, 0, -1),
        baryon(-3122, "anti-Lambda", 1.116, anti_grid, 0, 1),
        baryon(2112, "n", 0.9396, empty.clone(), 0, 0),
        baryon(-2112, "anti-n", 0.9396, empty.clone(), 0, 0),
        baryon(2212, "p", 0.9383, empty.clone(), 1, 0),
        baryon(-2212, "anti-p", 0.9383, empty.clone(), -1, 0),
        charged_pion(PI_PLUS_ID, empty.clone()),
        charged_pion(PI_MINUS_ID, empty.clone()),
        Species::new(111, "pi0", 0.135, 0.0, empty),
    ];
    let channels = vec![
        DecayChannel::new(3122, vec![2212, -211], 0.639),
        DecayChannel::new(3122, vec![2112, 111], 0.358),
    ];
    ParticleTable::new(species, channels, AzimuthGrid::uniform(4).unwrap()).unwrap()
}

// Trapezoidal dN/dy = 2π ∫ pt f(pt) dpt
pub fn dn_dy(pts: &[f64], values: &[f64]) -> f64 {
    let integral: f64 = pts
        .windows(2)
        .zip(values.windows(2))
        .map(|(pt, f)| 0.5 * (pt[1] - pt[0]) * (pt[0] * f[0] + pt[1] * f[1]))
        .sum();
    std::f64::consts::TAU * integral
}
