use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::Display;

use crate::errors::DecayError;
use crate::spectrum::SpectrumGrid;

//=====================================================================
// Baryon number class of a species.
//=====================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, TryFromPrimitive, IntoPrimitive)]
#[repr(i32)]
pub enum BaryonClass {
    AntiBaryon = -1,
    Meson = 0,
    Baryon = 1,
}

impl BaryonClass {
    pub fn from_baryon_number(id: i32, baryon: i32) -> Result<Self, DecayError> {
        BaryonClass::try_from(baryon).map_err(|_| DecayError::UnknownBaryonClass { id, baryon })
    }
}

//=====================================================================
// One particle species: its identity and quantum numbers, mass and
// width (GeV), and its momentum spectrum. Antiparticles are separate
// species carrying the negated id.
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub id: i32,
    pub name: String,
    pub mass: f64,
    pub width: f64,
    pub baryon: BaryonClass,
    pub charge: i32,
    pub strangeness: i32,
    pub grid: SpectrumGrid,
}

impl Species {
    // A neutral, non-strange meson. Use `with_quantum_numbers` for anything else.
    pub fn new(id: i32, name: impl Into<String>, mass: f64, width: f64, grid: SpectrumGrid) -> Self {
        Self {
            id,
            name: name.into(),
            mass,
            width,
            baryon: BaryonClass::Meson,
            charge: 0,
            strangeness: 0,
            grid,
        }
    }

    pub fn with_quantum_numbers(mut self, baryon: i32, charge: i32, strangeness: i32) -> Result<Self, DecayError> {
        self.baryon = BaryonClass::from_baryon_number(self.id, baryon)?;
        self.charge = charge;
        self.strangeness = strangeness;
        Ok(self)
    }

    // Neutral non-strange mesons are fed by both a baryon and its antibaryon.
    pub fn is_self_conjugate_meson(&self) -> bool {
        self.baryon == BaryonClass::Meson && self.charge == 0 && self.strangeness == 0
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}, m={} GeV, {})", self.name, self.id, self.mass, self.baryon)
    }
}
