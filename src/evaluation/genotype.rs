//! Per-sample genotype calls as consumed from upstream call records.

use itertools::Itertools;

/// A single allele call within a sample genotype.
///
/// The variant order is the canonical display sort order, so deriving `Ord`
/// here is load-bearing for [`SampleGenotype`] rendering.
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
pub enum AlleleCall {
    /// No call could be made for the allele.
    #[strum(serialize = ".")]
    NoCall,
    /// Call of an alternate allele other than the one considered.
    #[strum(serialize = "-")]
    OtherAlt,
    /// Call of the reference allele.
    #[strum(serialize = "0")]
    Ref,
    /// Call of the considered alternate allele.
    #[strum(serialize = "1")]
    Alt,
}

/// The genotype of a single sample: up to two allele calls, stored in
/// canonical (sorted) order.
#[derive(
    serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct SampleGenotype {
    /// The allele calls, canonically ordered; empty for the "no genotype"
    /// sentinel.
    calls: Vec<AlleleCall>,
}

impl SampleGenotype {
    /// Construct a diploid genotype from two calls.
    pub fn of(a: AlleleCall, b: AlleleCall) -> Self {
        let mut calls = vec![a, b];
        calls.sort();
        SampleGenotype { calls }
    }

    /// Construct the heterozygous `0/1` genotype.
    pub fn het() -> Self {
        Self::of(AlleleCall::Ref, AlleleCall::Alt)
    }

    /// Construct the homozygous reference `0/0` genotype.
    pub fn hom_ref() -> Self {
        Self::of(AlleleCall::Ref, AlleleCall::Ref)
    }

    /// Construct the homozygous alternate `1/1` genotype.
    pub fn hom_alt() -> Self {
        Self::of(AlleleCall::Alt, AlleleCall::Alt)
    }

    /// Construct the `./.` genotype.
    pub fn no_call() -> Self {
        Self::of(AlleleCall::NoCall, AlleleCall::NoCall)
    }

    /// Construct the empty genotype, the sentinel returned when a sample is
    /// unknown.
    pub fn empty() -> Self {
        SampleGenotype { calls: vec![] }
    }

    /// Whether this is the empty sentinel genotype.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// The allele calls in canonical order.
    pub fn calls(&self) -> &[AlleleCall] {
        &self.calls
    }
}

impl std::fmt::Display for SampleGenotype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.calls.iter().join("/"))
    }
}

/// Ordered mapping from sample name to genotype; insertion order is
/// preserved and significant for display.
pub type SampleGenotypes = indexmap::IndexMap<String, SampleGenotype>;

/// Name used for the synthetic sample substituted when no genotypes were
/// supplied.
pub const DEFAULT_SAMPLE_NAME: &str = "sample";

/// The single-sample heterozygous genotype map used as a default.
pub fn single_sample_het_genotypes() -> SampleGenotypes {
    let mut genotypes = SampleGenotypes::new();
    genotypes.insert(DEFAULT_SAMPLE_NAME.to_string(), SampleGenotype::het());
    genotypes
}

/// Render the canonical genotype string for a genotype map, e.g.,
/// `"0/1:0/0"`, samples in map order.
pub fn genotype_string(genotypes: &SampleGenotypes) -> String {
    genotypes.values().join(":")
}
