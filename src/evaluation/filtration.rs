//! Bookkeeping of pass/fail outcomes from independently run variant
//! filters, partitioned by inheritance mode.
//!
//! Storage is a single total map from mode to a small outcome record; the
//! "any mode" bucket is just one more key and only the derivation rules
//! treat it specially.

use std::collections::BTreeSet;

/// The filters a pipeline may run against a variant.
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
pub enum FilterType {
    /// Call quality filter.
    Quality,
    /// Population frequency filter.
    Frequency,
    /// Predicted pathogenicity filter.
    Pathogenicity,
    /// Variant effect / consequence filter.
    VariantEffect,
    /// Genomic interval filter.
    Interval,
    /// Known-variant filter.
    KnownVariant,
    /// Gene panel membership filter.
    GenePanel,
    /// Inheritance mode compatibility filter.
    Inheritance,
}

/// The outcome of running one filter against one variant.
#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FilterResult {
    /// The filter that ran.
    pub filter_type: FilterType,
    /// Whether the variant passed it.
    pub passed: bool,
}

impl FilterResult {
    /// Construct a passing result.
    pub fn pass(filter_type: FilterType) -> Self {
        FilterResult {
            filter_type,
            passed: true,
        }
    }

    /// Construct a failing result.
    pub fn fail(filter_type: FilterType) -> Self {
        FilterResult {
            filter_type,
            passed: false,
        }
    }
}

/// Aggregate filter status of a variant for some scope.
#[derive(
    serde::Serialize,
    serde::Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    strum_macros::Display,
    PartialEq,
    Eq,
    Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterStatus {
    /// No filter result was ever recorded for the scope.
    #[default]
    Unfiltered,
    /// Results exist and none failed.
    Passed,
    /// At least one failure exists.
    Failed,
}

/// Mendelian inheritance modes under which filter and contribution outcomes
/// are tracked separately.
#[derive(
    serde::Serialize,
    serde::Deserialize,
    enum_map::Enum,
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
pub enum ModeOfInheritance {
    /// No particular mode; the default bucket for unscoped results.
    #[default]
    Any,
    /// Autosomal dominant.
    AutosomalDominant,
    /// Autosomal recessive.
    AutosomalRecessive,
    /// X-linked dominant.
    XDominant,
    /// X-linked recessive.
    XRecessive,
    /// Mitochondrial.
    Mitochondrial,
}

/// Pass/fail filter-type sets recorded for one mode bucket.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ModeOutcome {
    /// Filter types that passed in this bucket.
    pub passed: BTreeSet<FilterType>,
    /// Filter types that failed in this bucket.
    pub failed: BTreeSet<FilterType>,
}

impl ModeOutcome {
    /// Whether any result was recorded in this bucket.
    pub fn is_empty(&self) -> bool {
        self.passed.is_empty() && self.failed.is_empty()
    }
}

/// Accumulated filter results for one variant, partitioned by inheritance
/// mode.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterResults {
    /// The outcome buckets, keyed by mode.
    outcomes: enum_map::EnumMap<ModeOfInheritance, ModeOutcome>,
}

impl FilterResults {
    /// Record a result under the default "any mode" bucket.
    pub fn record(&mut self, result: FilterResult) {
        self.record_for_modes(result, [ModeOfInheritance::Any]);
    }

    /// Record a result under each of the given mode buckets.
    ///
    /// The last write per bucket wins: a pass removes any earlier failure
    /// of the same filter type for that bucket and vice versa.
    pub fn record_for_modes(
        &mut self,
        result: FilterResult,
        modes: impl IntoIterator<Item = ModeOfInheritance>,
    ) {
        for mode in modes {
            tracing::trace!(
                "recording {:?} result for {} under {}",
                result.filter_type,
                if result.passed { "pass" } else { "fail" },
                mode
            );
            let outcome = &mut self.outcomes[mode];
            if result.passed {
                outcome.failed.remove(&result.filter_type);
                outcome.passed.insert(result.filter_type);
            } else {
                outcome.passed.remove(&result.filter_type);
                outcome.failed.insert(result.filter_type);
            }
        }
    }

    /// Whether any result was ever recorded, in any bucket.
    pub fn filtered(&self) -> bool {
        self.outcomes.values().any(|outcome| !outcome.is_empty())
    }

    /// Filter types that passed in the "any mode" bucket.
    pub fn passed_types(&self) -> BTreeSet<FilterType> {
        self.outcomes[ModeOfInheritance::Any].passed.clone()
    }

    /// Filter types that failed in the "any mode" bucket.
    pub fn failed_types(&self) -> BTreeSet<FilterType> {
        self.outcomes[ModeOfInheritance::Any].failed.clone()
    }

    /// Filter types that failed for `mode`: the mode's own bucket unioned
    /// with the "any mode" bucket, so a mode never explicitly filtered
    /// inherits the global outcome.
    pub fn failed_types_for_mode(&self, mode: ModeOfInheritance) -> BTreeSet<FilterType> {
        let mut failed = self.outcomes[ModeOfInheritance::Any].failed.clone();
        if mode != ModeOfInheritance::Any {
            failed.extend(self.outcomes[mode].failed.iter().copied());
        }
        failed
    }

    /// Filter types that passed for `mode`, excluding anything that failed
    /// for it.
    pub fn passed_types_for_mode(&self, mode: ModeOfInheritance) -> BTreeSet<FilterType> {
        let mut passed = self.outcomes[ModeOfInheritance::Any].passed.clone();
        if mode != ModeOfInheritance::Any {
            passed.extend(self.outcomes[mode].passed.iter().copied());
        }
        let failed = self.failed_types_for_mode(mode);
        passed.difference(&failed).copied().collect()
    }

    /// True exactly when no filter has failed in the "any mode" bucket.
    pub fn passed_overall(&self) -> bool {
        self.outcomes[ModeOfInheritance::Any].failed.is_empty()
    }

    /// Whether the given filter passed in the "any mode" bucket.
    pub fn passed_filter(&self, filter_type: FilterType) -> bool {
        let outcome = &self.outcomes[ModeOfInheritance::Any];
        outcome.passed.contains(&filter_type) && !outcome.failed.contains(&filter_type)
    }
}
