use thiserror::Error;

//=====================================================================
// Every failure the decay engine can report. Variants raised while
// building a `ParticleTable` or a `CascadeConfig` reject bad input
// before any grid is touched; the remaining variants abort a running
// cascade, which then returns no table at all.
//=====================================================================
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecayError {
    #[error("azimuth {phi} is outside of [0, 2π]")]
    AzimuthOutOfRange { phi: f64 },

    #[error("{0}-point Gauss-Legendre quadrature is not supported")]
    UnsupportedOrder(usize),

    #[error("decay channel {channel} has {daughters} daughters, only 1 to 4 are supported")]
    UnsupportedMultiplicity { channel: usize, daughters: usize },

    #[error("species {id} has baryon number {baryon}, expected -1, 0 or 1")]
    UnknownBaryonClass { id: i32, baryon: i32 },

    #[error("species {id} is referenced but not present in the particle table")]
    UnknownSpecies { id: i32 },

    #[error("species {id} appears more than once in the particle table")]
    DuplicateSpecies { id: i32 },

    #[error("{parent} must be processed before its daughter {daughter} (channel {channel})")]
    ProcessingOrder { parent: String, daughter: String, channel: usize },

    #[error("invalid spectrum grid for {name}: {reason}")]
    InvalidGrid { name: String, reason: String },

    #[error("decay channel {channel} has branching ratio {branching_ratio}, expected a value in [0, 1]")]
    InvalidBranchingRatio { channel: usize, branching_ratio: f64 },

    #[error("decay channel {channel} declares {declared} daughters but lists {listed}")]
    DaughterCountMismatch { channel: usize, declared: usize, listed: usize },

    #[error("{resonance} (mass {mass}) cannot reach the daughter mass sum {daughter_mass_sum}: no width to widen with")]
    BelowThreshold { resonance: String, mass: f64, daughter_mass_sum: f64 },

    #[error("numerical anomaly: {context}")]
    NumericalAnomaly { context: String },
}
