use log::debug;

use crate::errors::DecayError;
use crate::particles::Species;

//=====================================================================
// Masses a decay is evaluated with once the daughters fit inside the
// resonance. `daughter` is the species being fed, `partners` the other
// daughters of the channel in channel order. `steps` counts the
// widening steps it took to get there.
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct DecayMasses {
    pub resonance: f64,
    pub daughter: f64,
    pub partners: Vec<f64>,
    pub steps: usize,
}

impl DecayMasses {
    pub fn daughter_sum(&self) -> f64 {
        self.daughter + self.partners.iter().sum::<f64>()
    }

    pub fn widened(&self) -> bool {
        self.steps > 0
    }
}

// Widen the resonance and narrow the daughters until the daughter masses
// no longer exceed the resonance mass. Each step moves the resonance up
// by a quarter of its width and every daughter down by half of its own,
// never below zero. Fails when a step makes no progress.
pub fn widen_to_threshold(resonance: &Species, daughter: &Species, partners: &[&Species]) -> Result<DecayMasses, DecayError> {
    let mut masses = DecayMasses {
        resonance: resonance.mass,
        daughter: daughter.mass,
        partners: partners.iter().map(|p| p.mass).collect(),
        steps: 0,
    };

    while masses.daughter_sum() > masses.resonance {
        let gap = masses.resonance - masses.daughter_sum();

        masses.resonance += 0.25 * resonance.width;
        masses.daughter = (masses.daughter - 0.5 * daughter.width).max(0.0);
        for (mass, partner) in masses.partners.iter_mut().zip(partners) {
            *mass = (*mass - 0.5 * partner.width).max(0.0);
        }
        masses.steps += 1;

        if masses.resonance - masses.daughter_sum() <= gap {
            return Err(DecayError::BelowThreshold {
                resonance: resonance.name.clone(),
                mass: resonance.mass,
                daughter_mass_sum: daughter.mass + partners.iter().map(|p| p.mass).sum::<f64>(),
            });
        }
    }

    if masses.widened() {
        debug!(
            "{} -> {}: widened to m_R = {:.5} GeV, daughter masses {:.5} + {:?} after {} steps",
            resonance.name, daughter.name, masses.resonance, masses.daughter, masses.partners, masses.steps
        );
    }
    Ok(masses)
}
