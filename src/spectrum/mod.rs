mod grid;
mod interpolation_scheme;
mod interpolator;
mod kinematics;

pub use grid::{AzimuthGrid, SpectrumGrid};
pub use interpolation_scheme::PtInterpolation;
pub use interpolator::{Interpolator, NEGATIVE_YIELD_FLOOR};
pub use kinematics::{linear, pseudorapidity_from_rapidity, rapidity_from_pseudorapidity, TWO_PI};
