//! Evaluation and ranking core for sequence variant prioritization.
//!
//! This crate implements the scoring and bookkeeping that turns a called
//! sequence variant plus externally supplied annotations (population
//! frequencies, computational pathogenicity predictions, filter outcomes,
//! inheritance-mode compatibility) into a single comparable variant score
//! and a deterministic rank order for reporting.
//!
//! The central type is [`evaluation::VariantEvaluation`].  An upstream
//! pipeline constructs one evaluation per called allele, attaches annotation
//! data stage by stage, and finally sorts the collection with the natural or
//! rank-based ordering.  Parsing of variant call files, annotation lookup,
//! and inheritance analysis are the callers' concern.

pub mod common;
pub mod evaluation;
