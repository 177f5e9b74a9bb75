use crate::particles::ParticleTable;

//=====================================================================
// Bookkeeping of one cascade run.
//=====================================================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeReport {
    // daughters that received at least one feed
    pub species_fed: usize,
    pub feeds_applied: usize,
    pub cells_evaluated: usize,
    // feeds that needed the mass-threshold widening
    pub threshold_widenings: usize,
    pub anomalies: usize,
    pub skipped_cells: usize,
}

impl std::fmt::Display for CascadeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "fed {} species through {} feeds ({} cells evaluated, {} threshold widenings, {} anomalies, {} cells skipped)",
            self.species_fed,
            self.feeds_applied,
            self.cells_evaluated,
            self.threshold_widenings,
            self.anomalies,
            self.skipped_cells
        )
    }
}

// Result of a successful cascade: the table with its final spectra.
#[derive(Debug, Clone)]
pub struct CascadeOutput {
    pub table: ParticleTable,
    pub report: CascadeReport,
}
