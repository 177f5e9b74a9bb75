use crate::config::QuadratureOrders;
use crate::errors::DecayError;
use crate::kernels::{DecayMasses, ThreeBodyKernel, TwoBodyKernel};
use crate::particles::Species;
use crate::spectrum::Interpolator;

// Point of the daughter spectrum a kernel is evaluated at (rapidity, not
// pseudorapidity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaughterPoint {
    pub y: f64,
    pub pt: f64,
    pub phi: f64,
}

// What a kernel reads while it integrates: the parent spectrum and how to
// look it up, and the quadrature orders.
#[derive(Debug, Clone, Copy)]
pub struct KernelContext<'a> {
    pub interpolator: Interpolator<'a>,
    pub parent: &'a Species,
    pub orders: QuadratureOrders,
}

// Trait for anything that turns a parent spectrum into a daughter yield
// at one point of the daughter's phase space.
pub trait DaughterSpectrum {
    fn daughter_mass(&self) -> f64;
    fn evaluate(&self, context: &KernelContext, point: DaughterPoint) -> Result<f64, DecayError>;
}

//=====================================================================
// Kernel matching the number of daughters in a channel. Four-body
// decays are approximated as three-body decays with the last two
// recoiling daughters lumped into one pseudo-particle.
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseSpaceKernel {
    TwoBody(TwoBodyKernel),
    ThreeBody(ThreeBodyKernel),
    FourBodyAsThreeBody(ThreeBodyKernel),
}

impl PhaseSpaceKernel {
    // Pick the kernel for a channel from its (threshold adjusted) masses.
    pub fn for_decay(channel: usize, masses: &DecayMasses, orders: &QuadratureOrders) -> Result<Self, DecayError> {
        let mr = masses.resonance;
        let m1 = masses.daughter;
        match masses.partners.as_slice() {
            [m2] => Ok(PhaseSpaceKernel::TwoBody(TwoBodyKernel::new(mr, m1, *m2))),
            [m2, m3] => Ok(PhaseSpaceKernel::ThreeBody(ThreeBodyKernel::new(
                mr,
                m1,
                *m2,
                *m3,
                orders.normalization,
            )?)),
            [m2, m3, m4] => Ok(PhaseSpaceKernel::FourBodyAsThreeBody(ThreeBodyKernel::from_four_body(
                mr,
                m1,
                *m2,
                *m3,
                *m4,
                orders.normalization,
            )?)),
            partners => Err(DecayError::UnsupportedMultiplicity { channel, daughters: partners.len() + 1 }),
        }
    }

    pub fn daughter_count(&self) -> usize {
        match self {
            PhaseSpaceKernel::TwoBody(_) => 2,
            PhaseSpaceKernel::ThreeBody(_) => 3,
            PhaseSpaceKernel::FourBodyAsThreeBody(_) => 4,
        }
    }
}

impl DaughterSpectrum for PhaseSpaceKernel {
    fn daughter_mass(&self) -> f64 {
        match self {
            PhaseSpaceKernel::TwoBody(kernel) => kernel.daughter_mass(),
            PhaseSpaceKernel::ThreeBody(kernel) => kernel.daughter_mass(),
            PhaseSpaceKernel::FourBodyAsThreeBody(kernel) => kernel.daughter_mass(),
        }
    }

    // Yields are never negative, NaN passes through for the caller to handle.
    fn evaluate(&self, context: &KernelContext, point: DaughterPoint) -> Result<f64, DecayError> {
        let value = match self {
            PhaseSpaceKernel::TwoBody(kernel) => kernel.evaluate(context, point)?,
            PhaseSpaceKernel::ThreeBody(kernel) => kernel.evaluate(context, point)?,
            PhaseSpaceKernel::FourBodyAsThreeBody(kernel) => kernel.evaluate(context, point)?,
        };
        Ok(if value < 0.0 { 0.0 } else { value })
    }
}

impl std::fmt::Display for PhaseSpaceKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseSpaceKernel::TwoBody(_) => write!(f, "2-body"),
            PhaseSpaceKernel::ThreeBody(_) => write!(f, "3-body"),
            PhaseSpaceKernel::FourBodyAsThreeBody(_) => write!(f, "4-body (as 3-body)"),
        }
    }
}
