//=====================================================================
// One decay channel: resonance id, daughter ids and branching ratio.
//
// The multiplicity code carries the daughter count in its absolute
// value. Channels with a single daughter are placeholders for stable
// entries and never feed anything.
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct DecayChannel {
    pub resonance: i32,
    pub multiplicity: i32,
    pub daughters: Vec<i32>,
    pub branching_ratio: f64,
}

impl DecayChannel {
    pub fn new(resonance: i32, daughters: Vec<i32>, branching_ratio: f64) -> Self {
        Self {
            resonance,
            multiplicity: daughters.len() as i32,
            daughters,
            branching_ratio,
        }
    }

    pub fn with_multiplicity(resonance: i32, multiplicity: i32, daughters: Vec<i32>, branching_ratio: f64) -> Self {
        Self { resonance, multiplicity, daughters, branching_ratio }
    }

    #[inline]
    pub fn daughter_count(&self) -> usize {
        self.multiplicity.unsigned_abs() as usize
    }

    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.daughter_count() == 1
    }

    // Daughters recoiling against the one in `slot`, in channel order
    pub fn recoil_partners(&self, slot: usize) -> impl Iterator<Item = i32> + '_ {
        self.daughters
            .iter()
            .enumerate()
            .filter(move |(other, _)| *other != slot)
            .map(|(_, daughter)| *daughter)
    }
}

impl std::fmt::Display for DecayChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let daughters = self.daughters.iter().map(|d| d.to_string()).collect::<Vec<String>>().join(" + ");
        write!(f, "{} -> {} (BR={})", self.resonance, daughters, self.branching_ratio)
    }
}
