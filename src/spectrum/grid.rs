use std::ops::Deref;

use crate::errors::DecayError;
use crate::spectrum::TWO_PI;

//=====================================================================
// Azimuthal nodes shared by every spectrum grid in a particle table.
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct AzimuthGrid ( pub Vec<f64> );

impl Deref for AzimuthGrid {
    type Target = Vec<f64>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AzimuthGrid {
    pub fn new(nodes: Vec<f64>) -> Result<Self, DecayError> {
        let invalid = |reason: String| DecayError::InvalidGrid { name: "azimuth grid".to_string(), reason };

        if nodes.len() < 2 {
            return Err(invalid(format!("need at least 2 azimuth nodes, got {}", nodes.len())));
        }
        if let Some(phi) = nodes.iter().find(|phi| !(0.0..=TWO_PI).contains(*phi)) {
            return Err(invalid(format!("azimuth node {} is outside of [0, 2π]", phi)));
        }
        if nodes.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(invalid("azimuth nodes must be strictly increasing".to_string()));
        }
        Ok(Self(nodes))
    }

    // n equally spaced nodes starting at 0, with 2π left out.
    pub fn uniform(n: usize) -> Result<Self, DecayError> {
        Self::new((0..n).map(|i| i as f64 * TWO_PI / n as f64).collect())
    }
}

//=====================================================================
// Differential yield of one species on a (rapidity, pt, phi) grid.
//
// The rapidity axis holds pseudorapidity when the cascade runs in
// pseudorapidity mode. Azimuth nodes are not stored here, every grid
// uses the shared `AzimuthGrid` of its particle table. Values are kept
// in a flat vector, phi running fastest.
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumGrid {
    pub rapidities: Vec<f64>,
    pub transverse_momenta: Vec<f64>,
    pub n_phi: usize,
    pub values: Vec<f64>,
}

impl SpectrumGrid {
    // Grid with every yield set to zero.
    pub fn new(rapidities: Vec<f64>, transverse_momenta: Vec<f64>, n_phi: usize) -> Self {
        let n_values = rapidities.len() * transverse_momenta.len() * n_phi;
        Self { rapidities, transverse_momenta, n_phi, values: vec![0.0; n_values] }
    }

    // Grid filled from a function of the (y, pt, phi) indices.
    pub fn from_fn<F>(rapidities: Vec<f64>, transverse_momenta: Vec<f64>, n_phi: usize, f: F) -> Self
    where
        F: Fn(usize, usize, usize) -> f64,
    {
        let mut grid = Self::new(rapidities, transverse_momenta, n_phi);
        for iy in 0..grid.n_y() {
            for ipt in 0..grid.n_pt() {
                for iphi in 0..n_phi {
                    let index = grid.index(iy, ipt, iphi);
                    grid.values[index] = f(iy, ipt, iphi);
                }
            }
        }
        grid
    }

    #[inline]
    pub fn n_y(&self) -> usize {
        self.rapidities.len()
    }

    #[inline]
    pub fn n_pt(&self) -> usize {
        self.transverse_momenta.len()
    }

    #[inline]
    pub fn n_cells(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn index(&self, iy: usize, ipt: usize, iphi: usize) -> usize {
        (iy * self.n_pt() + ipt) * self.n_phi + iphi
    }

    // Inverse of `index`
    #[inline]
    pub fn cell(&self, index: usize) -> (usize, usize, usize) {
        let iphi = index % self.n_phi;
        let ipt = (index / self.n_phi) % self.n_pt();
        let iy = index / (self.n_phi * self.n_pt());
        (iy, ipt, iphi)
    }

    #[inline]
    pub fn get(&self, iy: usize, ipt: usize, iphi: usize) -> f64 {
        self.values[self.index(iy, ipt, iphi)]
    }

    #[inline]
    pub fn add(&mut self, iy: usize, ipt: usize, iphi: usize, value: f64) {
        let index = self.index(iy, ipt, iphi);
        self.values[index] += value;
    }

    pub fn max_pt(&self) -> f64 {
        self.transverse_momenta.last().copied().unwrap_or(0.0)
    }

    // Largest |y| covered by the rapidity axis.
    pub fn rapidity_half_range(&self) -> f64 {
        match (self.rapidities.first(), self.rapidities.last()) {
            (Some(first), Some(last)) => first.abs().max(last.abs()),
            _ => 0.0,
        }
    }

    pub fn validate(&self, name: &str, n_azimuths: usize) -> Result<(), DecayError> {
        let invalid = |reason: String| DecayError::InvalidGrid { name: name.to_string(), reason };

        if self.rapidities.is_empty() {
            return Err(invalid("no rapidity nodes".to_string()));
        }
        if self.rapidities.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(invalid("rapidity nodes must be strictly increasing".to_string()));
        }
        if self.n_pt() < 2 {
            return Err(invalid(format!("need at least 2 pt nodes, got {}", self.n_pt())));
        }
        if self.transverse_momenta.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(invalid("pt nodes must be strictly increasing".to_string()));
        }
        if self.n_phi != n_azimuths {
            return Err(invalid(format!("{} azimuth cells but the table has {} azimuth nodes", self.n_phi, n_azimuths)));
        }
        let expected = self.n_y() * self.n_pt() * self.n_phi;
        if self.values.len() != expected {
            return Err(invalid(format!("expected {} values, got {}", expected, self.values.len())));
        }
        Ok(())
    }
}

impl std::fmt::Display for SpectrumGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpectrumGrid({} y x {} pt x {} phi)", self.n_y(), self.n_pt(), self.n_phi)
    }
}
