//! Computational pathogenicity predictions and the derived pathogenicity
//! score.
//!
//! Predictor tools are only trained for certain consequence categories, so
//! score selection is a cascade over priority tables rather than an
//! average: within a valid category the most pathogenic available signal
//! dominates.

/// Computational predictors that can contribute a pathogenicity score.
#[derive(
    serde::Serialize,
    serde::Deserialize,
    Clone,
    Copy,
    Debug,
    strum_macros::Display,
    strum_macros::EnumIter,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PathogenicitySource {
    /// MutationTaster.
    MutationTaster,
    /// PolyPhen-2.
    Polyphen,
    /// SIFT.
    Sift,
    /// CADD (already rescaled to `[0, 1]` upstream).
    Cadd,
    /// REMM (regulatory variants, `[0, 1]`).
    Remm,
}

/// Predictors considered for missense variants, in priority order; on exact
/// score ties the earlier predictor wins.
pub const MISSENSE_PRIORITY: &[PathogenicitySource] = &[
    PathogenicitySource::MutationTaster,
    PathogenicitySource::Polyphen,
    PathogenicitySource::Sift,
    PathogenicitySource::Cadd,
];

/// Predictors considered for all attached scores, in priority order.
pub const FULL_PRIORITY: &[PathogenicitySource] = &[
    PathogenicitySource::MutationTaster,
    PathogenicitySource::Polyphen,
    PathogenicitySource::Sift,
    PathogenicitySource::Cadd,
    PathogenicitySource::Remm,
];

/// SIFT scores below this raw value count as damaging (SIFT is
/// lower-is-worse).
pub const SIFT_THRESHOLD: f32 = 0.06;
/// PolyPhen-2 scores above this value count as damaging.
pub const POLYPHEN_THRESHOLD: f32 = 0.5;
/// MutationTaster scores above this value count as damaging.
pub const MUTATION_TASTER_THRESHOLD: f32 = 0.94;
/// Threshold for the general-purpose predictors (CADD, REMM) on the
/// normalized scale.
pub const GENERAL_THRESHOLD: f32 = 0.5;

/// A single predictor score: source plus the predictor's raw value.
///
/// Normalization onto the common "higher is more pathogenic" `[0, 1]` scale
/// and the pass/fail threshold are baked in per source.
#[derive(
    serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, derive_new::new,
)]
pub struct PathogenicityScore {
    /// The predictor the score stems from.
    pub source: PathogenicitySource,
    /// The raw value on the predictor's own scale.
    pub raw_score: f32,
}

impl PathogenicityScore {
    /// The score normalized onto the common `[0, 1]` scale where higher is
    /// more pathogenic.
    pub fn score(&self) -> f32 {
        let normalized = match self.source {
            PathogenicitySource::Sift => 1f32 - self.raw_score,
            _ => self.raw_score,
        };
        normalized.clamp(0f32, 1f32)
    }

    /// Whether the score passes the predictor's own damaging threshold.
    pub fn passes_threshold(&self) -> bool {
        match self.source {
            PathogenicitySource::Sift => self.raw_score < SIFT_THRESHOLD,
            PathogenicitySource::Polyphen => self.raw_score > POLYPHEN_THRESHOLD,
            PathogenicitySource::MutationTaster => self.raw_score > MUTATION_TASTER_THRESHOLD,
            PathogenicitySource::Cadd | PathogenicitySource::Remm => {
                self.score() > GENERAL_THRESHOLD
            }
        }
    }
}

/// ClinVar clinical significance, tracked alongside the predicted scores
/// but never part of the numeric score selection.
#[derive(
    serde::Serialize,
    serde::Deserialize,
    Clone,
    Copy,
    Debug,
    strum_macros::Display,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum ClinVarSignificance {
    /// Pathogenic.
    #[strum(serialize = "Pathogenic")]
    Pathogenic,
    /// Likely pathogenic.
    #[strum(serialize = "Likely pathogenic")]
    LikelyPathogenic,
    /// Uncertain significance.
    #[strum(serialize = "Uncertain significance")]
    UncertainSignificance,
    /// Likely benign.
    #[strum(serialize = "Likely benign")]
    LikelyBenign,
    /// Benign.
    #[strum(serialize = "Benign")]
    Benign,
}

/// Aggregated pathogenicity data for one variant: at most one predicted
/// score per source, plus optional ClinVar significance.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PathogenicityData {
    /// ClinVar clinical significance, if any.
    clinvar: Option<ClinVarSignificance>,
    /// Predicted scores by source.
    scores: indexmap::IndexMap<PathogenicitySource, PathogenicityScore>,
}

impl PathogenicityData {
    /// Construct without any data.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Construct from predicted scores; re-adding a source replaces the
    /// earlier value.
    pub fn new(
        clinvar: Option<ClinVarSignificance>,
        scores: impl IntoIterator<Item = PathogenicityScore>,
    ) -> Self {
        let mut result = PathogenicityData {
            clinvar,
            scores: Default::default(),
        };
        for score in scores {
            result.scores.insert(score.source, score);
        }
        result
    }

    /// Construct from predicted scores only.
    pub fn from_scores(scores: impl IntoIterator<Item = PathogenicityScore>) -> Self {
        Self::new(None, scores)
    }

    /// ClinVar clinical significance, if any.
    pub fn clinvar(&self) -> Option<ClinVarSignificance> {
        self.clinvar
    }

    /// Whether any predicted (non-ClinVar) score is attached.
    pub fn has_predicted_score(&self) -> bool {
        !self.scores.is_empty()
    }

    /// The predicted score from `source`, if any.
    pub fn predicted_score(&self, source: PathogenicitySource) -> Option<&PathogenicityScore> {
        self.scores.get(&source)
    }

    /// All predicted scores in insertion order.
    pub fn predicted_scores(&self) -> impl Iterator<Item = &PathogenicityScore> {
        self.scores.values()
    }

    /// Select the most pathogenic attached score among `sources`.
    ///
    /// Selection is by maximum normalized score; on exact ties the source
    /// listed earlier in `sources` wins.
    pub fn best_score_of(&self, sources: &[PathogenicitySource]) -> Option<&PathogenicityScore> {
        let mut best: Option<&PathogenicityScore> = None;
        for source in sources {
            if let Some(candidate) = self.scores.get(source) {
                match best {
                    Some(current) if candidate.score() <= current.score() => (),
                    _ => best = Some(candidate),
                }
            }
        }
        best
    }

    /// The most pathogenic attached score over all predictors, normalized;
    /// `None` when no predicted score is attached.
    pub fn overall_score(&self) -> Option<f32> {
        self.best_score_of(FULL_PRIORITY)
            .map(PathogenicityScore::score)
    }

    /// Whether at least one attached predictor calls the variant damaging
    /// by its own threshold.
    pub fn is_predicted_pathogenic(&self) -> bool {
        self.scores
            .values()
            .any(PathogenicityScore::passes_threshold)
    }
}
