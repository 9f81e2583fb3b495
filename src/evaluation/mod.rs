//! The central variant evaluation aggregate: one record per called allele,
//! combining variant identity, genotype calls, annotation aggregates,
//! filter bookkeeping, and the derived scores and orderings.
//!
//! An evaluation is constructed once by the ingest stage with its identity
//! fixed; later pipeline stages attach frequency data, pathogenicity data,
//! filter results, and per-mode contribution flags in place.  Each
//! evaluation is owned and mutated by exactly one stage at a time; score
//! and status queries are pure functions of the current state.

pub mod effect;
pub mod filtration;
pub mod frequency;
pub mod genotype;
pub mod pathogenicity;
pub mod sorting;

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::common::{chromosome_name, GenomeAssembly};

use self::effect::VariantEffect;
use self::filtration::{FilterResult, FilterResults, FilterStatus, FilterType, ModeOfInheritance};
use self::frequency::FrequencyData;
use self::genotype::{genotype_string, single_sample_het_genotypes, SampleGenotype, SampleGenotypes};
use self::pathogenicity::{PathogenicityData, MISSENSE_PRIORITY};

/// Supporting code for `VariantEvaluation`.
pub mod variant_evaluation {
    /// Error type for `VariantEvaluationBuilder::build()`.
    #[derive(thiserror::Error, Debug, Clone)]
    pub enum Error {
        /// The gene symbol was explicitly supplied but empty.
        #[error("variant gene symbol cannot be empty")]
        EmptyGeneSymbol,
    }
}

/// Gene symbol sentinel used when no symbol was supplied.
pub const UNKNOWN_GENE_SYMBOL: &str = ".";

/// One called allele under evaluation.
///
/// Identity (assembly, chromosome, position, ref, alt) is fixed at
/// construction and drives equality, hashing, and the natural ordering;
/// annotation state is attached afterwards by the pipeline stages.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug)]
pub struct VariantEvaluation {
    /// The genome assembly coordinates refer to.
    assembly: GenomeAssembly,
    /// Chromosome number (1..=22 autosomes, 23=X, 24=Y, 25=MT).
    chromosome: i32,
    /// Chromosome display name.
    chromosome_name: String,
    /// 1-based position.
    position: i32,
    /// Reference allele sequence.
    reference: String,
    /// Alternate allele sequence.
    alternative: String,
    /// 0-based index of this alternate allele at a multi-allelic site.
    alt_allele_id: i32,
    /// Call quality.
    quality: f32,
    /// Gene symbol; `"."` when unknown.
    gene_symbol: String,
    /// Opaque gene identifier; empty when unknown.
    gene_id: String,
    /// The annotated consequence category; refinable after construction.
    variant_effect: VariantEffect,
    /// Per-sample genotype calls, in input order.
    sample_genotypes: SampleGenotypes,
    /// Attached population frequency data.
    frequency_data: FrequencyData,
    /// Attached pathogenicity prediction data.
    pathogenicity_data: PathogenicityData,
    /// Accumulated filter outcomes.
    filter_results: FilterResults,
    /// Inheritance modes this variant is compatible with, as supplied by
    /// the inheritance analysis stage.
    compatible_modes: BTreeSet<ModeOfInheritance>,
    /// Modes under which this variant contributes to its gene's score.
    contributing_modes: BTreeSet<ModeOfInheritance>,
    /// Whether the variant is on the external allow-list; forces maximal
    /// scores.
    white_listed: bool,
}

impl VariantEvaluation {
    /// Start building an evaluation from the required identity fields.
    pub fn builder(
        chromosome: i32,
        position: i32,
        reference: &str,
        alternative: &str,
    ) -> VariantEvaluationBuilder {
        VariantEvaluationBuilder::new(chromosome, position, reference, alternative)
    }

    /// The genome assembly.
    pub fn assembly(&self) -> GenomeAssembly {
        self.assembly
    }

    /// The chromosome number.
    pub fn chromosome(&self) -> i32 {
        self.chromosome
    }

    /// The chromosome display name, e.g., `"X"` for chromosome 23.
    pub fn chromosome_name(&self) -> &str {
        &self.chromosome_name
    }

    /// The 1-based position.
    pub fn position(&self) -> i32 {
        self.position
    }

    /// The reference allele sequence.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// The alternate allele sequence.
    pub fn alternative(&self) -> &str {
        &self.alternative
    }

    /// The 0-based alternate allele index at a multi-allelic site.
    pub fn alt_allele_id(&self) -> i32 {
        self.alt_allele_id
    }

    /// The call quality.
    pub fn quality(&self) -> f32 {
        self.quality
    }

    /// The gene symbol (`"."` when unknown).
    pub fn gene_symbol(&self) -> &str {
        &self.gene_symbol
    }

    /// The gene identifier (empty when unknown).
    pub fn gene_id(&self) -> &str {
        &self.gene_id
    }

    /// The current consequence category.
    pub fn variant_effect(&self) -> VariantEffect {
        self.variant_effect
    }

    /// Refine the consequence category after construction.
    pub fn set_variant_effect(&mut self, variant_effect: VariantEffect) {
        self.variant_effect = variant_effect;
    }

    /// The per-sample genotype calls in input order.
    pub fn sample_genotypes(&self) -> &SampleGenotypes {
        &self.sample_genotypes
    }

    /// The genotype of `sample`; the empty genotype for unknown samples.
    pub fn sample_genotype(&self, sample: &str) -> SampleGenotype {
        self.sample_genotypes
            .get(sample)
            .cloned()
            .unwrap_or_else(SampleGenotype::empty)
    }

    /// The canonical genotype string, samples in input order.
    pub fn genotype_string(&self) -> String {
        genotype_string(&self.sample_genotypes)
    }

    /// The attached frequency data.
    pub fn frequency_data(&self) -> &FrequencyData {
        &self.frequency_data
    }

    /// Replace the attached frequency data.
    pub fn set_frequency_data(&mut self, frequency_data: FrequencyData) {
        self.frequency_data = frequency_data;
    }

    /// The attached pathogenicity data.
    pub fn pathogenicity_data(&self) -> &PathogenicityData {
        &self.pathogenicity_data
    }

    /// Replace the attached pathogenicity data.
    pub fn set_pathogenicity_data(&mut self, pathogenicity_data: PathogenicityData) {
        self.pathogenicity_data = pathogenicity_data;
    }

    /// Whether the variant is on the external allow-list.
    pub fn is_white_listed(&self) -> bool {
        self.white_listed
    }

    /// Set the allow-list flag.
    pub fn set_white_listed(&mut self, white_listed: bool) {
        if white_listed != self.white_listed {
            tracing::trace!(
                "variant {}:{}{}>{} white-list flag set to {}",
                self.chromosome_name,
                self.position,
                self.reference,
                self.alternative,
                white_listed
            );
        }
        self.white_listed = white_listed;
    }

    // -- scoring -----------------------------------------------------------

    /// The frequency score in `[0, 1]`; 1.0 when white-listed.
    pub fn frequency_score(&self) -> f32 {
        if self.white_listed {
            1f32
        } else {
            self.frequency_data.score()
        }
    }

    /// The pathogenicity score in `[0, 1]`.
    ///
    /// Cascade: white-listed variants score 1.0; missense-like variants use
    /// the most pathogenic score among the missense-trained predictors;
    /// otherwise the most pathogenic attached score of any predictor; when
    /// no predictor fired, the static per-category default.
    pub fn pathogenicity_score(&self) -> f32 {
        if self.white_listed {
            return 1f32;
        }
        if self.variant_effect.is_missense_like() {
            if let Some(best) = self.pathogenicity_data.best_score_of(MISSENSE_PRIORITY) {
                return best.score();
            }
        }
        self.pathogenicity_data
            .overall_score()
            .unwrap_or_else(|| self.variant_effect.default_pathogenicity_score())
    }

    /// The combined variant score: frequency score times pathogenicity
    /// score, in `[0, 1]`.  Independent of filter outcomes.
    pub fn variant_score(&self) -> f32 {
        self.frequency_score() * self.pathogenicity_score()
    }

    /// Whether the variant is predicted pathogenic: white-listed, or an
    /// inherently pathogenic category, or (for missense-like categories) no
    /// contradicting predictor evidence.
    pub fn is_predicted_pathogenic(&self) -> bool {
        if self.white_listed {
            return true;
        }
        if self.variant_effect.is_missense_like() {
            // A missense variant counts as potentially pathogenic unless
            // the attached predictors unanimously say otherwise.
            if self.pathogenicity_data.has_predicted_score() {
                self.pathogenicity_data.is_predicted_pathogenic()
            } else {
                true
            }
        } else {
            self.variant_effect.is_inherently_pathogenic()
        }
    }

    // -- filters and inheritance modes -------------------------------------

    /// Record a filter outcome under the default "any mode" bucket.
    pub fn add_filter_result(&mut self, result: FilterResult) {
        self.filter_results.record(result);
    }

    /// Record a filter outcome under each of the given mode buckets.
    pub fn add_filter_result_for_modes(
        &mut self,
        result: FilterResult,
        modes: impl IntoIterator<Item = ModeOfInheritance>,
    ) {
        self.filter_results.record_for_modes(result, modes);
    }

    /// The raw filter bookkeeping.
    pub fn filter_results(&self) -> &FilterResults {
        &self.filter_results
    }

    /// True exactly when no filter has failed in the "any mode" bucket.
    pub fn passed_filters(&self) -> bool {
        self.filter_results.passed_overall()
    }

    /// Whether the given filter passed in the "any mode" bucket.
    pub fn passed_filter(&self, filter_type: FilterType) -> bool {
        self.filter_results.passed_filter(filter_type)
    }

    /// Filter types that failed in the "any mode" bucket.
    pub fn failed_filter_types(&self) -> BTreeSet<FilterType> {
        self.filter_results.failed_types()
    }

    /// Filter types that passed in the "any mode" bucket.
    pub fn passed_filter_types(&self) -> BTreeSet<FilterType> {
        self.filter_results.passed_types()
    }

    /// Filter types that failed for `mode`, including a derived
    /// `Inheritance` failure when the variant is not compatible with the
    /// mode.
    pub fn failed_filter_types_for_mode(&self, mode: ModeOfInheritance) -> BTreeSet<FilterType> {
        let mut failed = self.filter_results.failed_types_for_mode(mode);
        if !self.is_compatible_with(mode) {
            failed.insert(FilterType::Inheritance);
        }
        failed
    }

    /// Aggregate filter status over the "any mode" scope.
    pub fn filter_status(&self) -> FilterStatus {
        self.filter_status_for_mode(ModeOfInheritance::Any)
    }

    /// Aggregate filter status for `mode`; total over all modes.
    pub fn filter_status_for_mode(&self, mode: ModeOfInheritance) -> FilterStatus {
        if !self.filter_results.filtered() {
            FilterStatus::Unfiltered
        } else if self.failed_filter_types_for_mode(mode).is_empty() {
            FilterStatus::Passed
        } else {
            FilterStatus::Failed
        }
    }

    /// Replace the compatible inheritance mode set.
    pub fn set_compatible_inheritance_modes(&mut self, modes: BTreeSet<ModeOfInheritance>) {
        self.compatible_modes = modes;
    }

    /// The compatible inheritance mode set.
    pub fn compatible_inheritance_modes(&self) -> &BTreeSet<ModeOfInheritance> {
        &self.compatible_modes
    }

    /// Whether the variant is compatible with `mode`; `Any` is always
    /// compatible.
    pub fn is_compatible_with(&self, mode: ModeOfInheritance) -> bool {
        mode == ModeOfInheritance::Any || self.compatible_modes.contains(&mode)
    }

    /// Flag the variant as contributing to its gene's score under `mode`.
    pub fn set_contributes_to_gene_score_under_mode(&mut self, mode: ModeOfInheritance) {
        self.contributing_modes.insert(mode);
    }

    /// Whether the variant contributes to its gene's score under any mode.
    pub fn contributes_to_gene_score(&self) -> bool {
        !self.contributing_modes.is_empty()
    }

    /// Whether the variant contributes to its gene's score under `mode`.
    pub fn contributes_to_gene_score_under_mode(&self, mode: ModeOfInheritance) -> bool {
        if mode == ModeOfInheritance::Any {
            self.contributes_to_gene_score()
        } else {
            self.contributing_modes.contains(&mode)
        }
    }

    // -- ordering ----------------------------------------------------------

    /// Compare by rank for reporting: contributing variants first, then
    /// descending variant score, then the natural ordering.
    ///
    /// This is a strict total deterministic order over any finite variant
    /// collection, independent of insertion order.
    pub fn compare_by_rank(&self, other: &Self) -> std::cmp::Ordering {
        other
            .contributes_to_gene_score()
            .cmp(&self.contributes_to_gene_score())
            .then_with(|| other.variant_score().total_cmp(&self.variant_score()))
            .then_with(|| self.cmp(other))
    }
}

impl PartialEq for VariantEvaluation {
    fn eq(&self, other: &Self) -> bool {
        self.assembly == other.assembly
            && self.chromosome == other.chromosome
            && self.position == other.position
            && self.reference == other.reference
            && self.alternative == other.alternative
    }
}

impl Eq for VariantEvaluation {}

impl std::hash::Hash for VariantEvaluation {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.assembly.hash(state);
        self.chromosome.hash(state);
        self.position.hash(state);
        self.reference.hash(state);
        self.alternative.hash(state);
    }
}

impl PartialOrd for VariantEvaluation {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VariantEvaluation {
    /// The natural ordering: chromosome, position, ref, alt ascending
    /// (assembly as a final tie-break so ordering stays consistent with
    /// identity equality).
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.chromosome
            .cmp(&other.chromosome)
            .then_with(|| self.position.cmp(&other.position))
            .then_with(|| self.reference.cmp(&other.reference))
            .then_with(|| self.alternative.cmp(&other.alternative))
            .then_with(|| self.assembly.cmp(&other.assembly))
    }
}

/// Render a float with at least one decimal place so that whole numbers
/// come out as, e.g., `0.0` rather than `0`.
fn format_float(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

impl std::fmt::Display for VariantEvaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "VariantEvaluation{{assembly={} chr={} pos={} ref={} alt={} qual={} {}{} score={} {} \
             failedFilters=[{}] passedFilters=[{}] compatibleWith=[{}] sampleGenotypes={{{}}}}}",
            self.assembly,
            self.chromosome,
            self.position,
            self.reference,
            self.alternative,
            format_float(self.quality),
            self.variant_effect,
            if self.contributes_to_gene_score() {
                " *"
            } else {
                ""
            },
            format_float(self.variant_score()),
            self.filter_status(),
            self.failed_filter_types().iter().join(", "),
            self.passed_filter_types().iter().join(", "),
            self.compatible_modes.iter().join(", "),
            self.sample_genotypes
                .iter()
                .map(|(name, genotype)| format!("{}={}", name, genotype))
                .join(", "),
        )
    }
}

/// Builder for [`VariantEvaluation`].
///
/// Identity fields are required up front; everything else is optional and
/// validated in [`VariantEvaluationBuilder::build`].
#[derive(Debug, Clone)]
pub struct VariantEvaluationBuilder {
    assembly: GenomeAssembly,
    chromosome: i32,
    chromosome_name: Option<String>,
    position: i32,
    reference: String,
    alternative: String,
    alt_allele_id: i32,
    quality: f32,
    gene_symbol: Option<String>,
    gene_id: String,
    variant_effect: VariantEffect,
    sample_genotypes: Option<SampleGenotypes>,
    frequency_data: FrequencyData,
    pathogenicity_data: PathogenicityData,
    filter_results: Vec<FilterResult>,
    white_listed: bool,
}

impl VariantEvaluationBuilder {
    /// Construct with the required identity fields.
    pub fn new(chromosome: i32, position: i32, reference: &str, alternative: &str) -> Self {
        VariantEvaluationBuilder {
            assembly: Default::default(),
            chromosome,
            chromosome_name: None,
            position,
            reference: reference.to_string(),
            alternative: alternative.to_string(),
            alt_allele_id: 0,
            quality: 0f32,
            gene_symbol: None,
            gene_id: String::new(),
            variant_effect: Default::default(),
            sample_genotypes: None,
            frequency_data: FrequencyData::empty(),
            pathogenicity_data: PathogenicityData::empty(),
            filter_results: Vec::new(),
            white_listed: false,
        }
    }

    /// Set the genome assembly.
    pub fn assembly(mut self, assembly: GenomeAssembly) -> Self {
        self.assembly = assembly;
        self
    }

    /// Override the chromosome display name (e.g., for unplaced contigs).
    pub fn chromosome_name(mut self, chromosome_name: &str) -> Self {
        self.chromosome_name = Some(chromosome_name.to_string());
        self
    }

    /// Set the 0-based alternate allele index.
    pub fn alt_allele_id(mut self, alt_allele_id: i32) -> Self {
        self.alt_allele_id = alt_allele_id;
        self
    }

    /// Set the call quality.
    pub fn quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }

    /// Set the gene symbol; validated to be non-empty in `build()`, and
    /// only the first comma-separated token of a multi-gene string is kept.
    pub fn gene_symbol(mut self, gene_symbol: &str) -> Self {
        self.gene_symbol = Some(gene_symbol.to_string());
        self
    }

    /// Set the gene identifier.
    pub fn gene_id(mut self, gene_id: &str) -> Self {
        self.gene_id = gene_id.to_string();
        self
    }

    /// Set the initial consequence category.
    pub fn variant_effect(mut self, variant_effect: VariantEffect) -> Self {
        self.variant_effect = variant_effect;
        self
    }

    /// Set the sample genotype map; an empty map is replaced by the
    /// single-sample heterozygous default in `build()`.
    pub fn sample_genotypes(mut self, sample_genotypes: SampleGenotypes) -> Self {
        self.sample_genotypes = Some(sample_genotypes);
        self
    }

    /// Seed the frequency data.
    pub fn frequency_data(mut self, frequency_data: FrequencyData) -> Self {
        self.frequency_data = frequency_data;
        self
    }

    /// Seed the pathogenicity data.
    pub fn pathogenicity_data(mut self, pathogenicity_data: PathogenicityData) -> Self {
        self.pathogenicity_data = pathogenicity_data;
        self
    }

    /// Seed filter results (recorded under the "any mode" bucket).
    pub fn filter_results(mut self, filter_results: impl IntoIterator<Item = FilterResult>) -> Self {
        self.filter_results.extend(filter_results);
        self
    }

    /// Set the allow-list flag.
    pub fn white_listed(mut self, white_listed: bool) -> Self {
        self.white_listed = white_listed;
        self
    }

    /// Validate and build the evaluation.
    pub fn build(self) -> Result<VariantEvaluation, variant_evaluation::Error> {
        let gene_symbol = match self.gene_symbol {
            None => UNKNOWN_GENE_SYMBOL.to_string(),
            Some(symbol) if symbol.is_empty() => {
                return Err(variant_evaluation::Error::EmptyGeneSymbol)
            }
            Some(symbol) => symbol
                .split(',')
                .next()
                .unwrap_or(UNKNOWN_GENE_SYMBOL)
                .to_string(),
        };

        let sample_genotypes = match self.sample_genotypes {
            Some(genotypes) if !genotypes.is_empty() => genotypes,
            _ => single_sample_het_genotypes(),
        };

        let mut filter_results = FilterResults::default();
        for result in self.filter_results {
            filter_results.record(result);
        }

        Ok(VariantEvaluation {
            assembly: self.assembly,
            chromosome: self.chromosome,
            chromosome_name: self
                .chromosome_name
                .unwrap_or_else(|| chromosome_name(self.chromosome)),
            position: self.position,
            reference: self.reference,
            alternative: self.alternative,
            alt_allele_id: self.alt_allele_id,
            quality: self.quality,
            gene_symbol,
            gene_id: self.gene_id,
            variant_effect: self.variant_effect,
            sample_genotypes,
            frequency_data: self.frequency_data,
            pathogenicity_data: self.pathogenicity_data,
            filter_results,
            compatible_modes: BTreeSet::new(),
            contributing_modes: BTreeSet::new(),
            white_listed: self.white_listed,
        })
    }
}
