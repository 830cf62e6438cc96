//! Split-half re-identification stability for per-owner cluster label profiles.
//!
//! Each owner's sessions are randomly halved, each half becomes a label
//! histogram, and the owner's first half must find its own second half among
//! every other profile. The fraction of owners for which that works is the
//! stability score.

mod compositional;
mod config;
mod domain;
mod error;
mod histogram;
mod metric;
mod split;

pub use compositional::{
    EPS, aitchison_distance, aitchison_mean, aitchison_similarity, clr, total_variation_distance,
};
pub use config::{StabilityConfig, StabilityReport};
pub use domain::{OwnerId, SessionId, SessionKey};
pub use error::StabilityError;
pub use histogram::{LabelHistogram, manhattan_distance};
pub use metric::{StabilityScore, stability_metric};
pub use split::{HistogramPair, OwnerProfiles, split, split_with_rng};
