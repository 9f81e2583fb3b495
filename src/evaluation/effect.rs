//! Variant consequence categories and their default pathogenicity scores.
//!
//! The default scores are a static policy table used when no predictor
//! fired for a variant; keeping them in one `match` keeps the scoring
//! cascade auditable per category.

/// The predicted molecular consequence of a variant, as supplied by the
/// upstream transcript annotation stage.
#[derive(
    serde::Serialize,
    serde::Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum VariantEffect {
    /// Frameshift that elongates the protein.
    FrameshiftElongation,
    /// Frameshift that truncates the protein.
    FrameshiftTruncation,
    /// Frameshift of unspecified direction.
    FrameshiftVariant,
    /// Loss of the start codon.
    StartLost,
    /// Gain of a stop codon.
    StopGained,
    /// Loss of the stop codon.
    StopLost,
    /// Change to the splice acceptor site.
    SpliceAcceptorVariant,
    /// Change to the splice donor site.
    SpliceDonorVariant,
    /// Change within the splice region.
    SpliceRegionVariant,
    /// Amino acid substitution.
    MissenseVariant,
    /// In-frame deletion.
    InframeDeletion,
    /// In-frame insertion.
    InframeInsertion,
    /// Truncation of a transcript feature.
    FeatureTruncation,
    /// Synonymous coding change.
    SynonymousVariant,
    /// Change within a regulatory region.
    RegulatoryRegionVariant,
    /// Intron variant of a coding transcript.
    CodingTranscriptIntronVariant,
    /// Variant upstream of a gene.
    UpstreamGeneVariant,
    /// Variant downstream of a gene.
    DownstreamGeneVariant,
    /// Intergenic variant.
    IntergenicVariant,
    /// Unclassified sequence variant (the default).
    #[default]
    SequenceVariant,
}

/// Default score assumed for missense variants without predictor data; also
/// the bar an effect category must reach to count as inherently pathogenic.
pub const DEFAULT_MISSENSE_SCORE: f32 = 0.6;

/// Score for categories without inherent severity.
pub const NON_PATHOGENIC_SCORE: f32 = 0.0;

impl VariantEffect {
    /// The fixed default pathogenicity score for this category, used when
    /// no predictor fired.
    pub fn default_pathogenicity_score(&self) -> f32 {
        match self {
            VariantEffect::SpliceAcceptorVariant | VariantEffect::SpliceDonorVariant => 1.0,
            VariantEffect::FrameshiftElongation
            | VariantEffect::FrameshiftTruncation
            | VariantEffect::FrameshiftVariant
            | VariantEffect::StartLost
            | VariantEffect::StopGained => 0.95,
            VariantEffect::SpliceRegionVariant => 0.9,
            VariantEffect::InframeDeletion
            | VariantEffect::InframeInsertion
            | VariantEffect::FeatureTruncation => 0.85,
            VariantEffect::StopLost => 0.7,
            VariantEffect::MissenseVariant | VariantEffect::RegulatoryRegionVariant => {
                DEFAULT_MISSENSE_SCORE
            }
            VariantEffect::SynonymousVariant => 0.1,
            VariantEffect::CodingTranscriptIntronVariant
            | VariantEffect::UpstreamGeneVariant
            | VariantEffect::DownstreamGeneVariant
            | VariantEffect::IntergenicVariant
            | VariantEffect::SequenceVariant => NON_PATHOGENIC_SCORE,
        }
    }

    /// Whether predictors trained on missense variants apply to this
    /// category.
    pub fn is_missense_like(&self) -> bool {
        matches!(self, VariantEffect::MissenseVariant)
    }

    /// Whether the category by itself implies pathogenicity, without any
    /// predictor evidence.
    pub fn is_inherently_pathogenic(&self) -> bool {
        self.default_pathogenicity_score() >= DEFAULT_MISSENSE_SCORE
    }
}
