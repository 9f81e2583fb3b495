//! Code for sorting `VariantEvaluation` records by rank for reporting.

use super::VariantEvaluation;

/// Helper wrapper that allows to sort `VariantEvaluation` by rank:
/// gene-score-contributing variants first, then descending variant score,
/// then the natural ordering.
///
/// The rank key is captured at wrap time so that sorting does not recompute
/// scores per comparison.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ByRank {
    /// Whether the variant contributes to its gene's score.
    pub contributes: bool,
    /// The combined variant score.
    pub score: f32,
    /// The wrapped evaluation.
    pub evaluation: VariantEvaluation,
}

impl From<VariantEvaluation> for ByRank {
    fn from(val: VariantEvaluation) -> Self {
        Self {
            contributes: val.contributes_to_gene_score(),
            score: val.variant_score(),
            evaluation: val,
        }
    }
}

impl PartialEq for ByRank {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for ByRank {}

impl PartialOrd for ByRank {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByRank {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .contributes
            .cmp(&self.contributes)
            .then_with(|| other.score.total_cmp(&self.score))
            .then_with(|| self.evaluation.cmp(&other.evaluation))
    }
}
