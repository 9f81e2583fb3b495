//! Population frequency annotations and the derived frequency score.

/// Population databases that can contribute an allele frequency observation.
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
pub enum FrequencySource {
    /// Locally maintained frequency database.
    Local,
    /// 1000 Genomes phase 3.
    KGenomes,
    /// TOPMed.
    TopMed,
    /// ESP (all populations).
    EspAll,
    /// ExAC (all populations).
    ExacAll,
    /// UK Biobank.
    UkBiobank,
    /// gnomAD exomes.
    GnomadExomes,
    /// gnomAD genomes.
    GnomadGenomes,
}

/// A dbSNP "reference SNP" identifier.
#[derive(
    serde::Serialize,
    serde::Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_new::new,
)]
pub struct RsId(pub u32);

impl std::fmt::Display for RsId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rs{}", self.0)
    }
}

/// A single allele frequency observation: source plus frequency as a
/// percentage in `[0, 100]`.
#[derive(
    serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, derive_new::new,
)]
pub struct Frequency {
    /// The population database the observation stems from.
    pub source: FrequencySource,
    /// Allele frequency as a percentage.
    pub frequency: f32,
}

/// Frequency above which a variant counts as common, in percent.  The
/// frequency score saturates at 0 here.
pub const COMMON_FREQUENCY_CUTOFF: f32 = 2.0;

/// Aggregated population frequency data for one variant.
///
/// Holds an optional rs ID plus at most one frequency per source; re-adding
/// a source replaces the earlier value.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FrequencyData {
    /// The rs ID, if any.
    rs_id: Option<RsId>,
    /// Frequencies by source.
    frequencies: indexmap::IndexMap<FrequencySource, Frequency>,
}

impl FrequencyData {
    /// Construct without any data.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Construct from an optional rs ID and frequency observations.
    pub fn new(rs_id: Option<RsId>, frequencies: impl IntoIterator<Item = Frequency>) -> Self {
        let mut result = FrequencyData {
            rs_id,
            frequencies: Default::default(),
        };
        for frequency in frequencies {
            result.frequencies.insert(frequency.source, frequency);
        }
        result
    }

    /// The rs ID, if any.
    pub fn rs_id(&self) -> Option<RsId> {
        self.rs_id
    }

    /// Whether any frequency observation is attached.
    pub fn has_frequency_data(&self) -> bool {
        !self.frequencies.is_empty()
    }

    /// The observation for `source`, if any.
    pub fn frequency(&self, source: FrequencySource) -> Option<&Frequency> {
        self.frequencies.get(&source)
    }

    /// All attached observations in insertion order.
    pub fn frequencies(&self) -> impl Iterator<Item = &Frequency> {
        self.frequencies.values()
    }

    /// The maximum frequency over all attached sources; 0 when empty.
    pub fn max_frequency(&self) -> f32 {
        self.frequencies
            .values()
            .map(|frequency| frequency.frequency)
            .fold(0f32, f32::max)
    }

    /// The maximum frequency over the given sources only; 0 when none of
    /// them is attached.
    pub fn max_frequency_for_sources(&self, sources: &[FrequencySource]) -> f32 {
        sources
            .iter()
            .filter_map(|source| self.frequencies.get(source))
            .map(|frequency| frequency.frequency)
            .fold(0f32, f32::max)
    }

    /// Derive the frequency score in `[0, 1]`.
    ///
    /// Absent data (or all-zero frequencies) score 1.0 ("rare by default");
    /// otherwise the score falls off monotonically with the maximum
    /// observed frequency and saturates at 0 for frequencies at or above
    /// [`COMMON_FREQUENCY_CUTOFF`].
    pub fn score(&self) -> f32 {
        let max = self.max_frequency();
        if max <= 0f32 {
            1f32
        } else if max >= COMMON_FREQUENCY_CUTOFF {
            0f32
        } else {
            (1.13533f32 - 0.13533f32 * max.exp()).clamp(0f32, 1f32)
        }
    }
}
