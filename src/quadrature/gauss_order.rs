use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::{Display, EnumIter};

use crate::errors::DecayError;

//=====================================================================
// Point counts for which Gauss-Legendre rules are available. Anything
// else is a configuration error.
//=====================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, TryFromPrimitive, IntoPrimitive)]
#[repr(usize)]
pub enum GaussOrder {
    #[strum(to_string = "4-point")]
    Four = 4,
    #[strum(to_string = "8-point")]
    Eight = 8,
    #[strum(to_string = "10-point")]
    Ten = 10,
    #[strum(to_string = "12-point")]
    Twelve = 12,
    #[strum(to_string = "16-point")]
    Sixteen = 16,
    #[strum(to_string = "20-point")]
    Twenty = 20,
    #[strum(to_string = "48-point")]
    FortyEight = 48,
}

impl GaussOrder {
    pub fn from_points(points: usize) -> Result<Self, DecayError> {
        GaussOrder::try_from(points).map_err(|_| DecayError::UnsupportedOrder(points))
    }

    #[inline]
    pub fn points(self) -> usize {
        self.into()
    }
}
