use crate::errors::DecayError;
use crate::kernels::two_body::{DaughterFrame, rest_frame_momentum, solid_angle_integral};
use crate::kernels::{DaughterPoint, DaughterSpectrum, KernelContext};
use crate::quadrature::{GaussOrder, Integrand, integrate};
use crate::spectrum::TWO_PI;

// Normalization of the three-body phase space for R -> 1 + 2 + 3,
//
//   Q = mr² / (2π ∫ sqrt((a - x)(b - x)(x - c)(x - d)) / x dx),
//
// integrated over x in [(m2 + m3)², (mr - m1)²] with a = (mr + m1)²,
// b = (mr - m1)², c = (m2 + m3)², d = (m2 - m3)².
pub fn three_body_normalization(mr: f64, m1: f64, m2: f64, m3: f64, order: GaussOrder) -> Result<f64, DecayError> {
    let a = (mr + m1) * (mr + m1);
    let b = (mr - m1) * (mr - m1);
    let c = (m2 + m3) * (m2 + m3);
    let d = (m2 - m3) * (m2 - m3);

    let quartic = |x: f64| -> Result<f64, DecayError> { Ok(((a - x) * (b - x) * (x - c) * (x - d)).max(0.0).sqrt() / x) };
    let integral = integrate(order, &quartic, c, b)?;
    Ok(mr * mr / (TWO_PI * integral))
}

// Mass of the pseudo-particle standing in for daughters 3 and 4 of a
// four-body decay: their average mass shifted by half of the kinetic
// energy released, so that the total released energy is kept.
pub fn four_body_pseudo_mass(mr: f64, m1: f64, m2: f64, m3: f64, m4: f64) -> f64 {
    0.5 * (m3 + m4 + mr - m1 - m2)
}

//=====================================================================
// Three-body decay R -> 1 + 2 + 3, evaluated for daughter 1.
//
// Daughters 2 and 3 are treated as one system of invariant mass squared
// x: every x is a two-body decay of R into 1 and that system, weighted
// with the two-body phase space of the system itself.
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct ThreeBodyKernel {
    pub resonance_mass: f64,
    pub daughter_mass: f64,
    pub partner_masses: [f64; 2],
    pub normalization: f64,
}

impl ThreeBodyKernel {
    pub fn new(mr: f64, m1: f64, m2: f64, m3: f64, order: GaussOrder) -> Result<Self, DecayError> {
        Ok(Self {
            resonance_mass: mr,
            daughter_mass: m1,
            partner_masses: [m2, m3],
            normalization: three_body_normalization(mr, m1, m2, m3, order)?,
        })
    }

    // Four-body decay R -> 1 + 2 + 3 + 4 approximated as R -> 1 + 2 + X.
    pub fn from_four_body(mr: f64, m1: f64, m2: f64, m3: f64, m4: f64, order: GaussOrder) -> Result<Self, DecayError> {
        Self::new(mr, m1, m2, four_body_pseudo_mass(mr, m1, m2, m3, m4), order)
    }

    // Range of the invariant mass squared of the recoiling pair
    pub fn invariant_mass_range(&self) -> (f64, f64) {
        let [m2, m3] = self.partner_masses;
        let lo = (m2 + m3) * (m2 + m3);
        let hi = (self.resonance_mass - self.daughter_mass) * (self.resonance_mass - self.daughter_mass);
        (lo, hi)
    }
}

// Integrand over the invariant mass squared of the recoiling pair
struct InvariantMassIntegrand<'a> {
    kernel: &'a ThreeBodyKernel,
    context: &'a KernelContext<'a>,
    frame: DaughterFrame,
}

impl Integrand for InvariantMassIntegrand<'_> {
    fn evaluate(&self, x: f64) -> Result<f64, DecayError> {
        let kernel = self.kernel;
        let [m2, m3] = kernel.partner_masses;
        let sum_squared = (m2 + m3) * (m2 + m3);
        let difference_squared = (m2 - m3) * (m2 - m3);

        let p0 = rest_frame_momentum(kernel.resonance_mass, kernel.daughter_mass, x);
        let pair_phase_space = ((x - sum_squared) * (x - difference_squared)).max(0.0).sqrt() / x;
        let angular = solid_angle_integral(self.context, &self.frame, kernel.resonance_mass, x)?;
        Ok(p0 * pair_phase_space * angular)
    }
}

impl DaughterSpectrum for ThreeBodyKernel {
    fn daughter_mass(&self) -> f64 {
        self.daughter_mass
    }

    fn evaluate(&self, context: &KernelContext, point: DaughterPoint) -> Result<f64, DecayError> {
        let (lo, hi) = self.invariant_mass_range();
        // closed phase space
        if hi <= lo {
            return Ok(0.0);
        }

        let integrand = InvariantMassIntegrand {
            kernel: self,
            context,
            frame: DaughterFrame::new(point, self.daughter_mass),
        };
        let integral = integrate(context.orders.invariant_mass, &integrand, lo, hi)?;
        Ok(2.0 * self.normalization * integral / self.resonance_mass)
    }
}
