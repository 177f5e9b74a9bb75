use log::{debug, info};
use rayon::prelude::*;

use crate::cascade::{CascadeOutput, CascadeReport};
use crate::config::{AnomalyPolicy, CascadeConfig};
use crate::errors::DecayError;
use crate::kernels::{DaughterPoint, DaughterSpectrum, KernelContext, PhaseSpaceKernel, widen_to_threshold};
use crate::particles::{Feed, ParticleTable, Species};
use crate::spectrum::{Interpolator, SpectrumGrid, TWO_PI, rapidity_from_pseudorapidity};

//=====================================================================
// Walks a particle table in processing order and folds every parent
// spectrum into its daughters.
//
// Species are strictly sequential: a daughter is complete once all of
// its feeds have been added, before it is read as a parent itself. The
// cells of one feed are evaluated in parallel into a feed-local buffer
// which is then added to the daughter in cell order, so results do not
// depend on the number of threads.
//=====================================================================
#[derive(Debug, Clone, Default)]
pub struct Cascade {
    config: CascadeConfig,
}

// Everything one feed contributes to its daughter
struct FeedContribution {
    kernel: PhaseSpaceKernel,
    branching_ratio: f64,
    values: Vec<f64>,
}

impl Cascade {
    pub fn new(config: CascadeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CascadeConfig {
        &self.config
    }

    // Run the full cascade. The table only comes back on success, a
    // failed run leaves no partially fed spectra behind.
    pub fn run(&self, mut table: ParticleTable) -> Result<CascadeOutput, DecayError> {
        let mut report = CascadeReport::default();

        // species after the lightest one keep their spectra
        let n_processed = match self.config.lightest_species {
            Some(id) => table.index_of(id).ok_or(DecayError::UnknownSpecies { id })? + 1,
            None => table.species().len(),
        };

        for daughter in 0..n_processed {
            let feeds = table.feeds(daughter);
            if feeds.is_empty() {
                continue;
            }
            info!("calculating decays into {}", table.species()[daughter].name);

            for feed in feeds {
                let contribution = self.evaluate_feed(&table, daughter, feed, &mut report)?;
                self.accumulate(table.species_mut(daughter), contribution, &mut report)?;
                report.feeds_applied += 1;
            }
            report.species_fed += 1;
        }

        info!("resonance decays done: {}", report);
        Ok(CascadeOutput { table, report })
    }

    // Evaluate one feed on every daughter cell without touching the daughter.
    fn evaluate_feed(
        &self,
        table: &ParticleTable,
        daughter: usize,
        feed: Feed,
        report: &mut CascadeReport,
    ) -> Result<FeedContribution, DecayError> {
        let channel = &table.channels()[feed.channel];
        let parent = &table.species()[feed.parent];
        let species = &table.species()[daughter];

        // the listed partners; a conjugated channel has the same masses
        let partners = channel
            .recoil_partners(feed.slot)
            .map(|id| table.species_by_id(id).ok_or(DecayError::UnknownSpecies { id }))
            .collect::<Result<Vec<&Species>, DecayError>>()?;

        let masses = widen_to_threshold(parent, species, &partners)?;
        if masses.widened() {
            report.threshold_widenings += 1;
        }
        let kernel = PhaseSpaceKernel::for_decay(feed.channel, &masses, &self.config.quadrature)?;
        debug!(
            "{} -> {} (channel {}, slot {}{}): {} kernel, BR = {}",
            parent.name,
            species.name,
            feed.channel,
            feed.slot,
            if feed.conjugate { ", conjugated" } else { "" },
            kernel,
            channel.branching_ratio
        );

        let context = KernelContext {
            interpolator: Interpolator::new(table.azimuths(), &self.config.spectrum, self.config.anomaly_policy),
            parent,
            orders: self.config.quadrature,
        };
        let grid = &species.grid;
        let azimuths = table.azimuths();

        // boost-invariant spectra are only evaluated on the first rapidity slice
        let n_cells = if self.config.spectrum.boost_invariant {
            grid.n_pt() * grid.n_phi
        } else {
            grid.n_cells()
        };

        let values = (0..n_cells)
            .into_par_iter()
            .map(|index| {
                let point = self.daughter_point(grid, azimuths, index, kernel.daughter_mass());
                kernel.evaluate(&context, point)
            })
            .collect::<Result<Vec<f64>, DecayError>>()?;
        report.cells_evaluated += n_cells;

        Ok(FeedContribution { kernel, branching_ratio: channel.branching_ratio, values })
    }

    // Where a daughter cell is evaluated. In pseudorapidity mode the stored
    // pseudorapidity is turned into a rapidity with the daughter mass, and
    // the azimuths are spread uniformly over [0, 2π).
    fn daughter_point(&self, grid: &SpectrumGrid, azimuths: &[f64], index: usize, daughter_mass: f64) -> DaughterPoint {
        let settings = &self.config.spectrum;
        let (iy, ipt, iphi) = grid.cell(index);
        let pt = grid.transverse_momenta[ipt];

        let stored_y = if settings.boost_invariant { 0.0 } else { grid.rapidities[iy] };
        let (y, phi) = if settings.pseudorapidity_mode {
            (
                rapidity_from_pseudorapidity(stored_y, pt, daughter_mass),
                iphi as f64 * TWO_PI / grid.n_phi as f64,
            )
        } else {
            (stored_y, azimuths[iphi])
        };
        DaughterPoint { y, pt, phi }
    }

    // Add a feed into its daughter, applying the anomaly policy to NaN cells.
    fn accumulate(&self, species: &mut Species, contribution: FeedContribution, report: &mut CascadeReport) -> Result<(), DecayError> {
        let boost_invariant = self.config.spectrum.boost_invariant;
        let grid = &mut species.grid;

        for (index, value) in contribution.values.iter().copied().enumerate() {
            let (iy, ipt, iphi) = grid.cell(index);
            if value.is_nan() {
                report.anomalies += 1;
                self.config.anomaly_policy.report(|| {
                    format!(
                        "{} kernel gave NaN for {} at (y = {}, pt = {}, phi cell {})",
                        contribution.kernel,
                        species.name,
                        grid.rapidities[iy],
                        grid.transverse_momenta[ipt],
                        iphi
                    )
                })?;
                if self.config.anomaly_policy == AnomalyPolicy::SkipCell {
                    report.skipped_cells += 1;
                    continue;
                }
            }

            let weighted = contribution.branching_ratio * value;
            if boost_invariant {
                for slice in 0..grid.n_y() {
                    grid.add(slice, ipt, iphi, weighted);
                }
            } else {
                grid.add(iy, ipt, iphi, weighted);
            }
        }
        Ok(())
    }
}
