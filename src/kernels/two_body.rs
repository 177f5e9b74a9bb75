use log::warn;

use crate::errors::DecayError;
use crate::kernels::{DaughterPoint, DaughterSpectrum, KernelContext};
use crate::quadrature::{Integrand, integrate};
use crate::spectrum::TWO_PI;

// Reconstructed azimuth cosines beyond this are reported before clamping.
const AZIMUTH_COSINE_TOLERANCE: f64 = 1.01;

//=====================================================================
// Lab-frame kinematics of the daughter at the evaluation point.
//=====================================================================
#[derive(Debug, Clone, Copy)]
pub(crate) struct DaughterFrame {
    pub mass: f64,
    pub pt: f64,
    pub phi: f64,
    pub energy: f64,
    pub longitudinal_momentum: f64,
}

impl DaughterFrame {
    pub fn new(point: DaughterPoint, mass: f64) -> Self {
        let mt = (point.pt * point.pt + mass * mass).sqrt();
        Self {
            mass,
            pt: point.pt,
            phi: point.phi,
            energy: mt * point.y.cosh(),
            longitudinal_momentum: mt * point.y.sinh(),
        }
    }
}

// Daughter energy and momentum in the rest frame of a resonance of mass
// `resonance_mass` recoiling against a system of invariant mass squared
// `recoil_mass_squared`.
#[derive(Debug, Clone, Copy)]
struct RestFrameDecay {
    resonance_mass: f64,
    energy: f64,
    momentum: f64,
}

impl RestFrameDecay {
    fn new(resonance_mass: f64, daughter_mass: f64, recoil_mass_squared: f64) -> Self {
        let energy = (resonance_mass * resonance_mass + daughter_mass * daughter_mass - recoil_mass_squared)
            / (2.0 * resonance_mass);
        let momentum = (energy * energy - daughter_mass * daughter_mass).max(0.0).sqrt();
        Self { resonance_mass, energy, momentum }
    }
}

// Daughter momentum in the resonance rest frame for invariant mass squared
// `recoil_mass_squared` of everything it recoils against.
pub(crate) fn rest_frame_momentum(resonance_mass: f64, daughter_mass: f64, recoil_mass_squared: f64) -> f64 {
    RestFrameDecay::new(resonance_mass, daughter_mass, recoil_mass_squared).momentum
}

//=====================================================================
// Innermost integrand: azimuth of the daughter around the resonance
// direction. For a fixed rest-frame angle the resonance kinematics
// follow from energy-momentum conservation, the parent spectrum is
// read there and weighted with the Jacobian of the change of frame.
//=====================================================================
struct AzimuthalIntegrand<'a> {
    context: &'a KernelContext<'a>,
    frame: &'a DaughterFrame,
    decay: RestFrameDecay,
    cos_theta: f64,
    sin_theta: f64,
}

impl Integrand for AzimuthalIntegrand<'_> {
    fn evaluate(&self, phi: f64) -> Result<f64, DecayError> {
        let frame = self.frame;
        let mr = self.decay.resonance_mass;
        let e0 = self.decay.energy;
        let p0 = self.decay.momentum;

        let sum_energy = frame.energy + e0;
        let d = frame.energy * e0
            + frame.longitudinal_momentum * p0 * self.cos_theta
            + frame.pt * p0 * self.sin_theta * phi.cos()
            + frame.mass * frame.mass;

        // resonance energy, momentum and rapidity
        let resonance_energy = mr * (sum_energy * sum_energy / d - 1.0);
        let jacobian = mr + resonance_energy;
        let resonance_pl = mr * sum_energy * (frame.longitudinal_momentum - p0 * self.cos_theta) / d;
        let resonance_pt = (resonance_energy * resonance_energy - resonance_pl * resonance_pl - mr * mr)
            .max(0.0)
            .sqrt();
        let resonance_y = 0.5 * ((resonance_energy + resonance_pl) / (resonance_energy - resonance_pl)).ln();

        // resonance azimuth, undefined at zero pt
        let resonance_phi = if resonance_pt > 0.0 {
            let scale = -jacobian / (sum_energy * resonance_pt);
            let cos_phi = scale * (p0 * self.sin_theta * (phi + frame.phi).cos() - frame.pt * frame.phi.cos());
            let sin_phi = scale * (p0 * self.sin_theta * (phi + frame.phi).sin() - frame.pt * frame.phi.sin());
            if !cos_phi.is_finite() || !sin_phi.is_finite() {
                return Ok(f64::NAN);
            }
            if cos_phi.abs() > AZIMUTH_COSINE_TOLERANCE || sin_phi.abs() > AZIMUTH_COSINE_TOLERANCE {
                warn!(
                    "resonance azimuth out of range: cos = {:.8e}, sin = {:.8e} (phi = {:.8e}, D = {:.8e}, E_R = {:.8e}, \
                     pl_R = {:.8e}, pt_R = {:.8e}, pt = {:.8e}, m1 = {:.8e}, m_R = {:.8e})",
                    cos_phi, sin_phi, phi, d, resonance_energy, resonance_pl, resonance_pt, frame.pt, frame.mass, mr
                );
            }
            let angle = cos_phi.clamp(-1.0, 1.0).acos();
            if sin_phi < 0.0 { TWO_PI - angle } else { angle }
        } else {
            0.0
        };

        let yield_r = self
            .context
            .interpolator
            .lookup(self.context.parent, resonance_y, resonance_pt, resonance_phi)?;
        Ok(yield_r * jacobian * jacobian / (2.0 * sum_energy * sum_energy))
    }
}

// Polar angle of the daughter in the resonance rest frame; each point
// integrates the azimuth around it.
struct PolarIntegrand<'a> {
    context: &'a KernelContext<'a>,
    frame: &'a DaughterFrame,
    decay: RestFrameDecay,
}

impl Integrand for PolarIntegrand<'_> {
    fn evaluate(&self, cos_theta: f64) -> Result<f64, DecayError> {
        let azimuthal = AzimuthalIntegrand {
            context: self.context,
            frame: self.frame,
            decay: self.decay,
            cos_theta,
            sin_theta: (1.0 - cos_theta * cos_theta).max(0.0).sqrt(),
        };
        integrate(self.context.orders.azimuthal, &azimuthal, 0.0, TWO_PI)
    }
}

// Integral of the parent spectrum over the daughter's rest-frame solid
// angle, for a daughter recoiling against invariant mass squared
// `recoil_mass_squared`.
pub(crate) fn solid_angle_integral(
    context: &KernelContext,
    frame: &DaughterFrame,
    resonance_mass: f64,
    recoil_mass_squared: f64,
) -> Result<f64, DecayError> {
    let polar = PolarIntegrand {
        context,
        frame,
        decay: RestFrameDecay::new(resonance_mass, frame.mass, recoil_mass_squared),
    };
    integrate(context.orders.polar, &polar, -1.0, 1.0)
}

//=====================================================================
// Two-body decay R -> 1 + 2, evaluated for daughter 1.
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct TwoBodyKernel {
    pub resonance_mass: f64,
    pub daughter_mass: f64,
    pub partner_mass: f64,
}

impl TwoBodyKernel {
    pub fn new(resonance_mass: f64, daughter_mass: f64, partner_mass: f64) -> Self {
        Self { resonance_mass, daughter_mass, partner_mass }
    }

    // Daughter momentum in the resonance rest frame
    pub fn rest_frame_momentum(&self) -> f64 {
        rest_frame_momentum(self.resonance_mass, self.daughter_mass, self.partner_mass * self.partner_mass)
    }
}

impl DaughterSpectrum for TwoBodyKernel {
    fn daughter_mass(&self) -> f64 {
        self.daughter_mass
    }

    fn evaluate(&self, context: &KernelContext, point: DaughterPoint) -> Result<f64, DecayError> {
        let frame = DaughterFrame::new(point, self.daughter_mass);
        let integral = solid_angle_integral(context, &frame, self.resonance_mass, self.partner_mass * self.partner_mass)?;
        Ok(integral / TWO_PI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnomalyPolicy, QuadratureOrders, SpectrumSettings};
    use crate::particles::Species;
    use crate::spectrum::{AzimuthGrid, Interpolator, SpectrumGrid};

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const TEMPERATURE: f64 = 0.25;

    // Thermal-like parent on a boost-invariant grid
    fn thermal_parent(mass: f64) -> Species {
        let pts: Vec<f64> = (0..=40).map(|i| i as f64 * 0.1).collect();
        let values = pts.clone();
        let grid = SpectrumGrid::from_fn(vec![0.0], pts, 8, move |_, ipt, _| {
            (-(values[ipt] * values[ipt] + mass * mass).sqrt() / TEMPERATURE).exp()
        });
        Species::new(113, "rho0", mass, 0.0, grid)
    }

    #[test]
    fn test_rest_frame_momentum() {
        // rho0 -> pi+ pi-
        let kernel = TwoBodyKernel::new(0.775, 0.1396, 0.1396);
        let expected = (0.775_f64.powi(2) / 4.0 - 0.1396_f64.powi(2)).sqrt();
        assert_abs_diff_eq!(kernel.rest_frame_momentum(), expected, epsilon = 1e-12);

        // at threshold
        let kernel = TwoBodyKernel::new(0.28, 0.14, 0.14);
        assert_abs_diff_eq!(kernel.rest_frame_momentum(), 0.0, epsilon = 1e-7);
    }

    #[test]
    fn test_daughter_frame() {
        let frame = DaughterFrame::new(DaughterPoint { y: 0.5, pt: 0.3, phi: 1.0 }, 0.14);
        let mt = (0.3_f64 * 0.3 + 0.14 * 0.14).sqrt();
        assert_abs_diff_eq!(frame.energy * frame.energy - frame.longitudinal_momentum.powi(2), mt * mt, epsilon = 1e-12);
        assert_abs_diff_eq!(0.5 * ((frame.energy + frame.longitudinal_momentum) / (frame.energy - frame.longitudinal_momentum)).ln(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_isotropic_in_daughter_azimuth() {
        // parent spectrum independent of phi gives a daughter spectrum independent of phi
        let parent = thermal_parent(1.2);
        let azimuths = AzimuthGrid::uniform(8).unwrap();
        let settings = SpectrumSettings { boost_invariant: true, ..SpectrumSettings::default() };
        let context = KernelContext {
            interpolator: Interpolator::new(&azimuths, &settings, AnomalyPolicy::Propagate),
            parent: &parent,
            orders: QuadratureOrders::default(),
        };
        let kernel = TwoBodyKernel::new(1.2, 0.14, 0.14);

        let reference = kernel.evaluate(&context, DaughterPoint { y: 0.0, pt: 0.6, phi: 0.0 }).unwrap();
        assert!(reference > 0.0);
        for phi in [0.5, 2.0, 4.0, 6.0] {
            let value = kernel.evaluate(&context, DaughterPoint { y: 0.0, pt: 0.6, phi }).unwrap();
            assert_relative_eq!(value, reference, max_relative = 1e-2);
        }
    }

    #[test]
    fn test_boost_invariant_parent_gives_flat_rapidity() {
        let parent = thermal_parent(1.2);
        let azimuths = AzimuthGrid::uniform(8).unwrap();
        let settings = SpectrumSettings { boost_invariant: true, ..SpectrumSettings::default() };
        let context = KernelContext {
            interpolator: Interpolator::new(&azimuths, &settings, AnomalyPolicy::Propagate),
            parent: &parent,
            orders: QuadratureOrders::default(),
        };
        let kernel = TwoBodyKernel::new(1.2, 0.14, 0.14);

        let central = kernel.evaluate(&context, DaughterPoint { y: 0.0, pt: 0.4, phi: 0.0 }).unwrap();
        let forward = kernel.evaluate(&context, DaughterPoint { y: 1.5, pt: 0.4, phi: 0.0 }).unwrap();
        // equal up to quadrature error, the rest-frame angles are not boost invariant
        assert_relative_eq!(forward, central, max_relative = 2e-2);
    }

    #[test]
    fn test_nan_azimuth_gives_nan() {
        let parent = thermal_parent(1.2);
        let azimuths = AzimuthGrid::uniform(8).unwrap();
        let settings = SpectrumSettings { boost_invariant: true, ..SpectrumSettings::default() };
        let context = KernelContext {
            interpolator: Interpolator::new(&azimuths, &settings, AnomalyPolicy::Propagate),
            parent: &parent,
            orders: QuadratureOrders::default(),
        };
        let kernel = TwoBodyKernel::new(1.2, 0.14, 0.14);
        let value = kernel.evaluate(&context, DaughterPoint { y: 0.0, pt: 0.4, phi: f64::NAN }).unwrap();
        assert!(value.is_nan());
    }
}
