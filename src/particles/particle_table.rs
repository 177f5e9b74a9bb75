use std::collections::HashMap;

use log::debug;

use crate::errors::DecayError;
use crate::particles::{BaryonClass, DecayChannel, Species};
use crate::spectrum::AzimuthGrid;

//=====================================================================
// One (parent -> daughter) contribution the cascade has to fold in:
// channel index, parent species index and the daughter slot inside the
// channel. `conjugate` marks feeds where the parent is the conjugate of
// the listed resonance.
//=====================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feed {
    pub channel: usize,
    pub parent: usize,
    pub slot: usize,
    pub conjugate: bool,
}

//=====================================================================
// Species registry and decay table.
//
// Species are stored in processing order: index 0 is processed first,
// and every parent has to come before each of its daughters. The order
// is checked once here so the cascade can rely on it.
//=====================================================================
#[derive(Debug, Clone)]
pub struct ParticleTable {
    species: Vec<Species>,
    channels: Vec<DecayChannel>,
    azimuths: AzimuthGrid,
    index_by_id: HashMap<i32, usize>,
}

impl ParticleTable {
    pub fn new(species: Vec<Species>, channels: Vec<DecayChannel>, azimuths: AzimuthGrid) -> Result<Self, DecayError> {
        // index species by id
        let mut index_by_id = HashMap::with_capacity(species.len());
        for (index, s) in species.iter().enumerate() {
            if index_by_id.insert(s.id, index).is_some() {
                return Err(DecayError::DuplicateSpecies { id: s.id });
            }
            s.grid.validate(&s.name, azimuths.len())?;
        }

        // channels reference known species with a supported shape
        for (index, channel) in channels.iter().enumerate() {
            let declared = channel.daughter_count();
            if !(1..=4).contains(&declared) {
                return Err(DecayError::UnsupportedMultiplicity { channel: index, daughters: declared });
            }
            if channel.daughters.len() != declared {
                return Err(DecayError::DaughterCountMismatch {
                    channel: index,
                    declared,
                    listed: channel.daughters.len(),
                });
            }
            if !(0.0..=1.0).contains(&channel.branching_ratio) {
                return Err(DecayError::InvalidBranchingRatio {
                    channel: index,
                    branching_ratio: channel.branching_ratio,
                });
            }
            for id in std::iter::once(channel.resonance).chain(channel.daughters.iter().copied()) {
                if !index_by_id.contains_key(&id) {
                    return Err(DecayError::UnknownSpecies { id });
                }
            }
        }

        let table = Self { species, channels, azimuths, index_by_id };

        // every feed must read an already finished parent
        for daughter in 0..table.species.len() {
            for feed in table.feeds(daughter) {
                if feed.parent >= daughter {
                    return Err(DecayError::ProcessingOrder {
                        parent: table.species[feed.parent].name.clone(),
                        daughter: table.species[daughter].name.clone(),
                        channel: feed.channel,
                    });
                }
            }
        }

        Ok(table)
    }

    #[inline]
    pub fn species(&self) -> &[Species] {
        &self.species
    }

    #[inline]
    pub fn channels(&self) -> &[DecayChannel] {
        &self.channels
    }

    #[inline]
    pub fn azimuths(&self) -> &AzimuthGrid {
        &self.azimuths
    }

    pub fn index_of(&self, id: i32) -> Option<usize> {
        self.index_by_id.get(&id).copied()
    }

    pub fn species_by_id(&self, id: i32) -> Option<&Species> {
        self.index_of(id).map(|index| &self.species[index])
    }

    pub(crate) fn species_mut(&mut self, index: usize) -> &mut Species {
        &mut self.species[index]
    }

    pub fn into_species(self) -> Vec<Species> {
        self.species
    }

    //=====================================================================
    // All feeds into the species at `daughter`, in channel order.
    //
    // Baryons pick up the listed resonance, antibaryons the conjugate of
    // the listed resonance for the conjugated daughter. Mesons from a
    // baryon decay are fed by the baryon and, through the conjugated
    // channel, by the antibaryon: a self-conjugate meson by both at the
    // same slot, any other meson by whichever of the two produces its own
    // sign. Mesons from meson decays only take the listed channel.
    //=====================================================================
    pub fn feeds(&self, daughter: usize) -> Vec<Feed> {
        let species = &self.species[daughter];
        let part = species.id;
        let mut feeds = Vec::new();

        for (channel_index, channel) in self.channels.iter().enumerate() {
            if channel.is_trivial() {
                continue;
            }
            let Some(parent) = self.index_of(channel.resonance) else {
                continue;
            };
            let parent_is_baryon = self.species[parent].baryon == BaryonClass::Baryon;

            for (slot, &listed) in channel.daughters.iter().enumerate() {
                let mut push = |conjugate: bool| {
                    let id = if conjugate { -channel.resonance } else { channel.resonance };
                    match self.index_of(id) {
                        Some(parent) => feeds.push(Feed { channel: channel_index, parent, slot, conjugate }),
                        None => debug!(
                            "conjugate resonance {} of channel {} is not in the table, skipping its feed into {}",
                            id, channel_index, species.name
                        ),
                    }
                };

                match species.baryon {
                    BaryonClass::Baryon => {
                        if listed == part {
                            push(false);
                        }
                    }
                    BaryonClass::AntiBaryon => {
                        if listed == -part {
                            push(true);
                        }
                    }
                    BaryonClass::Meson if parent_is_baryon => {
                        if species.is_self_conjugate_meson() {
                            if listed == part {
                                push(false);
                                push(true);
                            }
                        } else {
                            if listed == part {
                                push(false);
                            }
                            if listed == -part {
                                push(true);
                            }
                        }
                    }
                    BaryonClass::Meson => {
                        if listed == part {
                            push(false);
                        }
                    }
                }
            }
        }
        feeds
    }
}
