use log::warn;
use strum_macros::Display;

use crate::errors::DecayError;
use crate::quadrature::GaussOrder;

//=====================================================================
// How spectra are stored on their grids and how the transverse
// momentum axis is interpolated.
//
// `pseudorapidity_mode`: the rapidity axis of every grid holds
//     pseudorapidity instead of rapidity.
// `boost_invariant`: spectra do not depend on rapidity; lookups skip the
//     rapidity range check and daughters are evaluated at y = 0 only.
// `pt_change`: above this transverse momentum (GeV) the interpolation
//     switches to log(yield) vs pt.
//=====================================================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumSettings {
    pub pseudorapidity_mode: bool,
    pub boost_invariant: bool,
    pub pt_change: f64,
}

impl Default for SpectrumSettings {
    fn default() -> Self {
        Self {
            pseudorapidity_mode: false,
            boost_invariant: false,
            pt_change: 1.0,
        }
    }
}

//=====================================================================
// Quadrature orders used by the phase-space kernels.
//
// `polar`: cos(theta) of the daughter in the resonance rest frame.
// `azimuthal`: azimuth of the daughter around the resonance direction.
// `normalization`: the three-body normalization integral.
// `invariant_mass`: invariant mass squared of the recoiling pair in
//     three- and four-body decays.
//=====================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadratureOrders {
    pub polar: GaussOrder,
    pub azimuthal: GaussOrder,
    pub normalization: GaussOrder,
    pub invariant_mass: GaussOrder,
}

impl QuadratureOrders {
    // Build from raw point counts, rejecting counts without a rule.
    pub fn new(polar: usize, azimuthal: usize, normalization: usize, invariant_mass: usize) -> Result<Self, DecayError> {
        Ok(Self {
            polar: GaussOrder::from_points(polar)?,
            azimuthal: GaussOrder::from_points(azimuthal)?,
            normalization: GaussOrder::from_points(normalization)?,
            invariant_mass: GaussOrder::from_points(invariant_mass)?,
        })
    }
}

impl Default for QuadratureOrders {
    fn default() -> Self {
        Self {
            polar: GaussOrder::Eight,
            azimuthal: GaussOrder::Eight,
            normalization: GaussOrder::Twelve,
            invariant_mass: GaussOrder::Twelve,
        }
    }
}

//=====================================================================
// What to do with a NaN coming out of the interpolation or a kernel.
//
// `Propagate`: report it and let the value flow into the daughter grid.
// `SkipCell`: report it and leave the affected daughter cell unchanged.
// `Abort`: stop the cascade with `DecayError::NumericalAnomaly`.
//=====================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum AnomalyPolicy {
    #[default]
    Propagate,
    SkipCell,
    Abort,
}

impl AnomalyPolicy {
    // Report an anomaly. The context is only rendered when it is needed.
    pub fn report<F: FnOnce() -> String>(&self, context: F) -> Result<(), DecayError> {
        match self {
            AnomalyPolicy::Abort => Err(DecayError::NumericalAnomaly { context: context() }),
            AnomalyPolicy::Propagate | AnomalyPolicy::SkipCell => {
                warn!("{}", context());
                Ok(())
            }
        }
    }
}

//=====================================================================
// Full configuration of a decay cascade.
//
// `lightest_species`: last species (by id) to be fed. Species after it
// in processing order keep their initial spectra.
//=====================================================================
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CascadeConfig {
    pub spectrum: SpectrumSettings,
    pub quadrature: QuadratureOrders,
    pub anomaly_policy: AnomalyPolicy,
    pub lightest_species: Option<i32>,
}
