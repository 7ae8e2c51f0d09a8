use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::registry::ContactId;

/// Picks one id out of the live set. Implementations must draw uniformly.
pub trait Selector {
    fn choose(&mut self, ids: &[ContactId]) -> Option<ContactId>;
}

impl<F> Selector for F
where
    F: FnMut(&[ContactId]) -> Option<ContactId>,
{
    fn choose(&mut self, ids: &[ContactId]) -> Option<ContactId> {
        self(ids)
    }
}

pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    pub fn from_entropy() -> RandomSelector {
        RandomSelector {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> RandomSelector {
        RandomSelector {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn new(seed: Option<u64>) -> RandomSelector {
        match seed {
            Some(seed) => RandomSelector::seeded(seed),
            None => RandomSelector::from_entropy(),
        }
    }
}

impl Selector for RandomSelector {
    fn choose(&mut self, ids: &[ContactId]) -> Option<ContactId> {
        if ids.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..ids.len());
        Some(ids[idx])
    }
}
