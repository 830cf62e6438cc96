//! Seeded split of each owner's sessions into two halves.

use indexmap::IndexMap;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument, warn};

use playstyle_cluster::MedoidId;

use crate::domain::{OwnerId, SessionKey};
use crate::histogram::LabelHistogram;

/// Label histograms of an owner's two session halves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistogramPair {
    /// The first `floor(n / 2)` shuffled sessions.
    pub half_a: LabelHistogram,
    /// The remaining sessions.
    pub half_b: LabelHistogram,
}

/// Per-owner histogram pairs, in first-seen owner order.
pub type OwnerProfiles = IndexMap<OwnerId, HistogramPair>;

/// Split every owner's sessions into two halves and histogram each half.
///
/// With `Some(seed)` the result is reproducible; with `None` the generator is
/// seeded from OS entropy. See [`split_with_rng`].
#[instrument(skip(labels), fields(sessions = labels.len()))]
pub fn split(labels: &IndexMap<SessionKey, Vec<MedoidId>>, seed: Option<u64>) -> OwnerProfiles {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    split_with_rng(labels, &mut rng)
}

/// Split with a caller-owned generator.
///
/// Sessions are grouped by owner in first-seen order, keeping input order
/// within each owner. The generator then shuffles each owner's sessions in
/// turn; the first `floor(n / 2)` go to half A and the rest to half B, so B
/// gets the extra session when `n` is odd. An owner with a single session ends
/// up with an empty half A.
pub fn split_with_rng(
    labels: &IndexMap<SessionKey, Vec<MedoidId>>,
    rng: &mut ChaCha8Rng,
) -> OwnerProfiles {
    let mut by_owner: IndexMap<&OwnerId, Vec<&[MedoidId]>> = IndexMap::new();
    for (key, sequence) in labels {
        by_owner.entry(&key.owner).or_default().push(sequence.as_slice());
    }

    by_owner
        .into_iter()
        .map(|(owner, mut sessions)| {
            if sessions.len() < 2 {
                warn!(%owner, sessions = sessions.len(), "owner has fewer than two sessions");
            }
            sessions.shuffle(rng);

            let mid = sessions.len() / 2;
            let (a, b) = sessions.split_at(mid);
            let pair = HistogramPair {
                half_a: LabelHistogram::from_labels(a.iter().copied().flatten()),
                half_b: LabelHistogram::from_labels(b.iter().copied().flatten()),
            };
            debug!(%owner, half_a = a.len(), half_b = b.len(), "owner split");
            (owner.clone(), pair)
        })
        .collect()
}
