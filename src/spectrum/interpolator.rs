use crate::config::{AnomalyPolicy, SpectrumSettings};
use crate::errors::DecayError;
use crate::particles::Species;
use crate::spectrum::{
    linear, pseudorapidity_from_rapidity, AzimuthGrid, PtInterpolation, SpectrumGrid, TWO_PI,
};

// Interpolation inputs below zero are replaced with this before any log is taken.
pub const NEGATIVE_YIELD_FLOOR: f64 = 1e-30;

//=====================================================================
// Evaluates a species' tabulated spectrum at an arbitrary kinematic
// point.
//
// Bracketing nodes are found by a linear scan from the low end of each
// axis; points beyond the last node of an axis are extrapolated from the
// last cell. Interpolation is linear in phi and y, and linear or
// log-linear in pt (see `PtInterpolation`). The spectrum is zero beyond
// the tabulated pt range, and beyond the rapidity range unless the
// spectra are boost invariant.
//=====================================================================
#[derive(Debug, Clone, Copy)]
pub struct Interpolator<'a> {
    azimuths: &'a [f64],
    settings: &'a SpectrumSettings,
    policy: AnomalyPolicy,
}

// Indices of the enclosing cell and where the lookup landed inside it
struct Cell {
    iy: usize,
    ipt: usize,
    iphi: usize,
    y: f64,
    pt: f64,
    phi: f64,
}

impl<'a> Interpolator<'a> {
    pub fn new(azimuths: &'a AzimuthGrid, settings: &'a SpectrumSettings, policy: AnomalyPolicy) -> Self {
        Self { azimuths: azimuths.as_slice(), settings, policy }
    }

    // Differential yield of `species` at rapidity `y`, transverse momentum
    // `pt` and azimuth `phi`. `y` is always a rapidity; in pseudorapidity
    // mode it is converted using the species mass before the lookup.
    pub fn lookup(&self, species: &Species, y: f64, pt: f64, phi: f64) -> Result<f64, DecayError> {
        if !(0.0..=TWO_PI).contains(&phi) {
            return Err(DecayError::AzimuthOutOfRange { phi });
        }

        let grid = &species.grid;
        let y = if self.settings.pseudorapidity_mode {
            pseudorapidity_from_rapidity(y, pt, species.mass)
        } else {
            y
        };

        // No support outside of the tabulated ranges
        if pt > grid.max_pt() {
            return Ok(0.0);
        }
        if y.abs() > grid.rapidity_half_range() && !self.settings.boost_invariant {
            return Ok(0.0);
        }

        let cell = Cell {
            iy: upper_node(&grid.rapidities, y),
            ipt: upper_node(&grid.transverse_momenta, pt),
            iphi: upper_node(&self.azimuths[..grid.n_phi], phi),
            y,
            pt,
            phi,
        };

        let value = if grid.n_y() == 1 {
            self.pt_phi_slice(grid, 0, &cell)
        } else {
            let lower = self.pt_phi_slice(grid, cell.iy - 1, &cell);
            let upper = self.pt_phi_slice(grid, cell.iy, &cell);
            linear(grid.rapidities[cell.iy - 1], grid.rapidities[cell.iy], lower, upper, y)
        };

        if value.is_nan() {
            self.policy.report(|| self.describe_nan(species, &cell))?;
        }
        Ok(value)
    }

    // Interpolate in phi on the two pt nodes bracketing the point, then in pt.
    fn pt_phi_slice(&self, grid: &SpectrumGrid, iy: usize, cell: &Cell) -> f64 {
        let (phi0, phi1) = (self.azimuths[cell.iphi - 1], self.azimuths[cell.iphi]);
        let along_phi = |ipt: usize| {
            let value = linear(phi0, phi1, grid.get(iy, ipt, cell.iphi - 1), grid.get(iy, ipt, cell.iphi), cell.phi);
            // negative yields are floored before any log is taken
            if value < 0.0 { NEGATIVE_YIELD_FLOOR } else { value }
        };
        let f1 = along_phi(cell.ipt - 1);
        let f2 = along_phi(cell.ipt);

        let (pt0, pt1) = (grid.transverse_momenta[cell.ipt - 1], grid.transverse_momenta[cell.ipt]);
        PtInterpolation::select(cell.pt, self.settings.pt_change, f1, f2).interpolate(pt0, pt1, f1, f2, cell.pt)
    }

    fn describe_nan(&self, species: &Species, cell: &Cell) -> String {
        let grid = &species.grid;
        let iy0 = cell.iy.saturating_sub(1);
        let corners: Vec<String> = [iy0, cell.iy.min(grid.n_y() - 1)]
            .iter()
            .flat_map(|&iy| [cell.ipt - 1, cell.ipt].map(move |ipt| (iy, ipt)))
            .flat_map(|(iy, ipt)| [cell.iphi - 1, cell.iphi].map(move |iphi| (iy, ipt, iphi)))
            .map(|(iy, ipt, iphi)| format!("[{}][{}][{}]={:e}", iy, ipt, iphi, grid.get(iy, ipt, iphi)))
            .collect();
        format!(
            "NaN interpolating {} at y={}, pt={}, phi={} (cell iy={}, ipt={}, iphi={}; pt in [{}, {}], phi in [{}, {}]; corners {})",
            species.name,
            cell.y,
            cell.pt,
            cell.phi,
            cell.iy,
            cell.ipt,
            cell.iphi,
            grid.transverse_momenta[cell.ipt - 1],
            grid.transverse_momenta[cell.ipt],
            self.azimuths[cell.iphi - 1],
            self.azimuths[cell.iphi],
            corners.join(", ")
        )
    }
}

// Index of the first node at or above x, starting the scan at 1 and
// stopping at the last node. Axes with a single node return 0.
fn upper_node(nodes: &[f64], x: f64) -> usize {
    if nodes.len() < 2 {
        return 0;
    }
    let mut i = 1;
    while x > nodes[i] && i < nodes.len() - 1 {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn species_with(grid: SpectrumGrid, mass: f64) -> Species {
        Species::new(211, "pi+", mass, 0.0, grid)
    }

    fn exponential_grid(n_phi: usize) -> SpectrumGrid {
        let pts = vec![0.0, 0.5, 1.0, 1.5, 2.0, 3.0];
        let slopes = pts.clone();
        SpectrumGrid::from_fn(vec![-1.0, 0.0, 1.0], pts, n_phi, move |_, ipt, _| (-slopes[ipt] / 0.3).exp())
    }

    #[test]
    fn test_upper_node() {
        let nodes = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(upper_node(&nodes, -1.0), 1);
        assert_eq!(upper_node(&nodes, 0.5), 1);
        assert_eq!(upper_node(&nodes, 1.0), 1);
        assert_eq!(upper_node(&nodes, 1.5), 2);
        assert_eq!(upper_node(&nodes, 10.0), 3);
        assert_eq!(upper_node(&[0.0], 10.0), 0);
    }

    #[test]
    fn test_zero_beyond_pt_range() {
        let azimuths = AzimuthGrid::uniform(4).unwrap();
        let settings = SpectrumSettings::default();
        let interpolator = Interpolator::new(&azimuths, &settings, AnomalyPolicy::Abort);
        let species = species_with(exponential_grid(4), 0.14);

        for pt in [3.0 + 1e-12, 3.5, 100.0] {
            assert_eq!(interpolator.lookup(&species, 0.0, pt, 1.0).unwrap(), 0.0);
        }
        assert!(interpolator.lookup(&species, 0.0, 3.0, 1.0).unwrap() > 0.0);
    }

    #[test]
    fn test_zero_beyond_rapidity_range() {
        let azimuths = AzimuthGrid::uniform(4).unwrap();
        let species = species_with(exponential_grid(4), 0.14);

        let settings = SpectrumSettings::default();
        let interpolator = Interpolator::new(&azimuths, &settings, AnomalyPolicy::Abort);
        for y in [-1.5, 1.0 + 1e-9, 4.0] {
            assert_eq!(interpolator.lookup(&species, y, 0.7, 0.0).unwrap(), 0.0);
        }
        assert!(interpolator.lookup(&species, 1.0, 0.7, 0.0).unwrap() > 0.0);

        // Boost invariant spectra have no rapidity cut
        let settings = SpectrumSettings { boost_invariant: true, ..SpectrumSettings::default() };
        let interpolator = Interpolator::new(&azimuths, &settings, AnomalyPolicy::Abort);
        assert_relative_eq!(
            interpolator.lookup(&species, 4.0, 0.5, 0.0).unwrap(),
            (-0.5_f64 / 0.3).exp(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_trilinear_below_pt_change() {
        let azimuths = AzimuthGrid::new(vec![0.0, 2.0, 4.0, 6.0]).unwrap();
        let settings = SpectrumSettings { pt_change: 10.0, ..SpectrumSettings::default() };
        let interpolator = Interpolator::new(&azimuths, &settings, AnomalyPolicy::Abort);
        // A function linear in each coordinate is reproduced exactly
        let ys = vec![-1.0, 0.0, 1.0];
        let pts = vec![0.0, 1.0, 2.0];
        let (yv, ptv, phiv) = (ys.clone(), pts.clone(), azimuths.0.clone());
        let grid = SpectrumGrid::from_fn(ys, pts, 4, move |iy, ipt, iphi| {
            1.0 + 0.5 * yv[iy] + 2.0 * ptv[ipt] + 0.25 * phiv[iphi]
        });
        let species = species_with(grid, 0.14);

        let value = interpolator.lookup(&species, 0.3, 1.4, 3.1).unwrap();
        assert_abs_diff_eq!(value, 1.0 + 0.5 * 0.3 + 2.0 * 1.4 + 0.25 * 3.1, epsilon = 1e-12);
    }

    #[test]
    fn test_log_linear_above_pt_change() {
        let azimuths = AzimuthGrid::uniform(4).unwrap();
        let settings = SpectrumSettings { pt_change: 1.0, ..SpectrumSettings::default() };
        let interpolator = Interpolator::new(&azimuths, &settings, AnomalyPolicy::Abort);
        let species = species_with(exponential_grid(4), 0.14);

        // Exponentials are exact in the log-linear region
        assert_relative_eq!(
            interpolator.lookup(&species, 0.0, 2.6, 0.5).unwrap(),
            (-2.6_f64 / 0.3).exp(),
            max_relative = 1e-10
        );
        // Below the switch the interpolation is linear
        let linear_value = 0.5 * ((-0.5_f64 / 0.3).exp() + (-1.0_f64 / 0.3).exp());
        assert_relative_eq!(interpolator.lookup(&species, 0.0, 0.75, 0.5).unwrap(), linear_value, max_relative = 1e-12);
    }

    #[test]
    fn test_continuous_at_pt_change() {
        let azimuths = AzimuthGrid::uniform(4).unwrap();
        let settings = SpectrumSettings { pt_change: 1.5, ..SpectrumSettings::default() };
        let interpolator = Interpolator::new(&azimuths, &settings, AnomalyPolicy::Abort);
        let species = species_with(exponential_grid(4), 0.14);

        let at = interpolator.lookup(&species, 0.2, 1.5, 1.0).unwrap();
        let below = interpolator.lookup(&species, 0.2, 1.5 - 1e-9, 1.0).unwrap();
        let above = interpolator.lookup(&species, 0.2, 1.5 + 1e-9, 1.0).unwrap();
        assert_relative_eq!(below, at, max_relative = 1e-7);
        assert_relative_eq!(above, at, max_relative = 1e-7);
    }

    #[test]
    fn test_switch_inside_a_cell_jumps() {
        let azimuths = AzimuthGrid::uniform(4).unwrap();
        let settings = SpectrumSettings { pt_change: 1.25, ..SpectrumSettings::default() };
        let interpolator = Interpolator::new(&azimuths, &settings, AnomalyPolicy::Abort);
        let species = species_with(exponential_grid(4), 0.14);

        // linear up to and including pt_change, log-linear right after it
        let at = interpolator.lookup(&species, 0.2, 1.25, 1.0).unwrap();
        let above = interpolator.lookup(&species, 0.2, 1.25 + 1e-9, 1.0).unwrap();
        let chord = 0.5 * ((-1.0_f64 / 0.3).exp() + (-1.5_f64 / 0.3).exp());
        assert_relative_eq!(at, chord, max_relative = 1e-12);
        assert_relative_eq!(above, (-1.25_f64 / 0.3).exp(), max_relative = 1e-7);
        assert!(above < 0.8 * at);
    }

    #[test]
    fn test_negative_yields_are_floored() {
        let azimuths = AzimuthGrid::uniform(4).unwrap();
        let settings = SpectrumSettings::default();
        let interpolator = Interpolator::new(&azimuths, &settings, AnomalyPolicy::Abort);
        let grid = SpectrumGrid::from_fn(vec![0.0, 1.0], vec![1.0, 2.0, 3.0], 4, |_, _, _| -1e-3);
        let species = species_with(grid, 0.14);

        let value = interpolator.lookup(&species, 0.5, 2.5, 0.3).unwrap();
        assert!(value.is_finite());
        assert_relative_eq!(value, NEGATIVE_YIELD_FLOOR, max_relative = 1e-9);
    }

    #[test]
    fn test_azimuth_out_of_range_is_fatal() {
        let azimuths = AzimuthGrid::uniform(4).unwrap();
        let settings = SpectrumSettings::default();
        let interpolator = Interpolator::new(&azimuths, &settings, AnomalyPolicy::Propagate);
        let species = species_with(exponential_grid(4), 0.14);

        assert_eq!(
            interpolator.lookup(&species, 0.0, 0.5, -0.1),
            Err(DecayError::AzimuthOutOfRange { phi: -0.1 })
        );
        assert!(interpolator.lookup(&species, 0.0, 0.5, 7.0).is_err());
        assert!(interpolator.lookup(&species, 0.0, 0.5, f64::NAN).is_err());
        assert!(interpolator.lookup(&species, 0.0, 0.5, TWO_PI).is_ok());
    }

    #[test]
    fn test_nan_policy() {
        let azimuths = AzimuthGrid::uniform(4).unwrap();
        let settings = SpectrumSettings::default();
        let mut grid = exponential_grid(4);
        let index = grid.index(1, 1, 0);
        grid.values[index] = f64::NAN;
        let species = species_with(grid, 0.14);

        let tolerant = Interpolator::new(&azimuths, &settings, AnomalyPolicy::Propagate);
        assert!(tolerant.lookup(&species, 0.0, 0.3, 0.1).unwrap().is_nan());

        let strict = Interpolator::new(&azimuths, &settings, AnomalyPolicy::Abort);
        assert!(matches!(
            strict.lookup(&species, 0.0, 0.3, 0.1),
            Err(DecayError::NumericalAnomaly { .. })
        ));
    }

    #[test]
    fn test_pseudorapidity_mode() {
        let azimuths = AzimuthGrid::uniform(4).unwrap();
        let settings = SpectrumSettings { pseudorapidity_mode: true, ..SpectrumSettings::default() };
        let interpolator = Interpolator::new(&azimuths, &settings, AnomalyPolicy::Abort);
        // Yield linear in the stored pseudorapidity
        let etas = vec![-2.0, 0.0, 2.0];
        let eta_nodes = etas.clone();
        let grid = SpectrumGrid::from_fn(etas, vec![0.0, 2.0], 4, move |iy, _, _| 3.0 + eta_nodes[iy]);
        let species = species_with(grid, 0.938);

        let (y, pt) = (0.8, 0.6);
        let eta = pseudorapidity_from_rapidity(y, pt, 0.938);
        assert_relative_eq!(interpolator.lookup(&species, y, pt, 0.0).unwrap(), 3.0 + eta, max_relative = 1e-12);
    }
}
