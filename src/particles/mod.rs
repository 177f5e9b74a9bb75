mod decay_channel;
mod particle_table;
mod species;

pub use decay_channel::DecayChannel;
pub use particle_table::{Feed, ParticleTable};
pub use species::{BaryonClass, Species};
