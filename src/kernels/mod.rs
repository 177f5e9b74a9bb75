mod phase_space_kernel;
mod three_body;
mod threshold;
mod two_body;

pub use phase_space_kernel::{DaughterPoint, DaughterSpectrum, KernelContext, PhaseSpaceKernel};
pub use three_body::{ThreeBodyKernel, four_body_pseudo_mass, three_body_normalization};
pub use threshold::{DecayMasses, widen_to_threshold};
pub use two_body::TwoBodyKernel;
