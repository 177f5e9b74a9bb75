pub mod cascade;
pub mod config;
pub mod errors;
pub mod kernels;
pub mod particles;
pub mod quadrature;
pub mod spectrum;

#[cfg(test)]
mod utils;

pub use cascade::{Cascade, CascadeOutput, CascadeReport};
pub use config::{AnomalyPolicy, CascadeConfig, QuadratureOrders, SpectrumSettings};
pub use errors::DecayError;
pub use particles::{BaryonClass, DecayChannel, ParticleTable, Species};
pub use spectrum::{AzimuthGrid, SpectrumGrid};
