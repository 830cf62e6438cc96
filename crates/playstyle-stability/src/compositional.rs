//! Distances and means for compositional style profiles.
//!
//! A composition is a vector of non-negative parts, such as a normalized label
//! histogram laid out over a fixed label order. Only the compositional mean
//! closes its inputs to sum to one; the distances use the parts as given.

use crate::error::StabilityError;

/// Smoothing added to every part before taking logarithms.
pub const EPS: f64 = 1e-12;

fn check_pair(p: &[f64], q: &[f64]) -> Result<(), StabilityError> {
    if p.len() != q.len() {
        return Err(StabilityError::LengthMismatch {
            left: p.len(),
            right: q.len(),
        });
    }
    if p.is_empty() {
        return Err(StabilityError::EmptyInput { what: "composition" });
    }
    Ok(())
}

fn closure(x: &[f64]) -> Result<Vec<f64>, StabilityError> {
    if x.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(StabilityError::DegenerateComposition);
    }
    let total: f64 = x.iter().sum();
    if total <= 0.0 {
        return Err(StabilityError::DegenerateComposition);
    }
    Ok(x.iter().map(|v| v / total).collect())
}

/// Half the L1 distance between two distributions.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`StabilityError::LengthMismatch`] | `p` and `q` differ in length |
/// | [`StabilityError::EmptyInput`] | both are empty |
pub fn total_variation_distance(p: &[f64], q: &[f64]) -> Result<f64, StabilityError> {
    check_pair(p, q)?;
    Ok(0.5 * p.iter().zip(q).map(|(a, b)| (a - b).abs()).sum::<f64>())
}

/// Centred log-ratio transform: `ln(x + EPS)` minus its mean.
///
/// Parts are used as given, without closing them first. The [`EPS`] smoothing
/// keeps zero parts finite.
///
/// # Errors
///
/// [`StabilityError::EmptyInput`] for an empty slice,
/// [`StabilityError::DegenerateComposition`] for a negative or non-finite part.
pub fn clr(x: &[f64]) -> Result<Vec<f64>, StabilityError> {
    if x.is_empty() {
        return Err(StabilityError::EmptyInput { what: "composition" });
    }
    if x.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(StabilityError::DegenerateComposition);
    }
    let logs: Vec<f64> = x.iter().map(|v| (v + EPS).ln()).collect();
    let mean = logs.iter().sum::<f64>() / logs.len() as f64;
    Ok(logs.into_iter().map(|l| l - mean).collect())
}

/// Euclidean distance between CLR transforms.
///
/// # Errors
///
/// Same conditions as [`total_variation_distance`] and [`clr`].
pub fn aitchison_distance(p: &[f64], q: &[f64]) -> Result<f64, StabilityError> {
    check_pair(p, q)?;
    let (cp, cq) = (clr(p)?, clr(q)?);
    Ok(cp
        .iter()
        .zip(&cq)
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt())
}

/// `exp(-d)` of the Aitchison distance; one for identical compositions.
///
/// # Errors
///
/// Same conditions as [`aitchison_distance`].
pub fn aitchison_similarity(p: &[f64], q: &[f64]) -> Result<f64, StabilityError> {
    Ok((-aitchison_distance(p, q)?).exp())
}

/// Compositional mean: closure of the exponentiated mean CLR vector.
///
/// Each composition is closed to sum to one before its CLR is taken.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`StabilityError::EmptyInput`] | no compositions, or an empty one |
/// | [`StabilityError::LengthMismatch`] | compositions differ in length |
/// | [`StabilityError::DegenerateComposition`] | a composition cannot be closed |
pub fn aitchison_mean<C: AsRef<[f64]>>(compositions: &[C]) -> Result<Vec<f64>, StabilityError> {
    let first = compositions
        .first()
        .ok_or(StabilityError::EmptyInput { what: "composition list" })?
        .as_ref();
    let dim = first.len();
    if dim == 0 {
        return Err(StabilityError::EmptyInput { what: "composition" });
    }

    let mut sum = vec![0.0; dim];
    for c in compositions {
        let c = c.as_ref();
        if c.len() != dim {
            return Err(StabilityError::LengthMismatch {
                left: dim,
                right: c.len(),
            });
        }
        for (s, v) in sum.iter_mut().zip(clr(&closure(c)?)?) {
            *s += v;
        }
    }

    let n = compositions.len() as f64;
    let mu: Vec<f64> = sum.iter().map(|s| (s / n).exp()).collect();
    closure(&mu)
}
