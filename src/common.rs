//! Common functionality: genome assemblies and chromosome naming.

/// Definition of canonical chromosome names, indexed by chromosome number
/// minus one (1..=22 autosomes, 23=X, 24=Y, 25=MT).
pub const CHROMS: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "X", "Y", "MT",
];

/// Return the display name for a chromosome number.
///
/// Numbers outside the conventional 1..=25 range render as the number
/// itself so that display code stays total.
pub fn chromosome_name(chromosome: i32) -> String {
    if chromosome >= 1 && chromosome as usize <= CHROMS.len() {
        CHROMS[chromosome as usize - 1].to_string()
    } else {
        chromosome.to_string()
    }
}

/// Select the genome assembly that coordinates refer to.
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
    PartialOrd,
    Ord,
    Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum GenomeAssembly {
    /// GRCh37 / hg19
    #[default]
    #[strum(serialize = "hg19")]
    Hg19,
    /// GRCh38 / hg38
    #[strum(serialize = "hg38")]
    Hg38,
}

impl GenomeAssembly {
    /// The GRC name of the assembly, e.g., `"GRCh37"`.
    pub fn grc_name(&self) -> String {
        match self {
            GenomeAssembly::Hg19 => String::from("GRCh37"),
            GenomeAssembly::Hg38 => String::from("GRCh38"),
        }
    }
}

impl std::str::FromStr for GenomeAssembly {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_ascii_lowercase();
        if s == "hg19" || s == "grch37" {
            Ok(GenomeAssembly::Hg19)
        } else if s == "hg38" || s == "grch38" {
            Ok(GenomeAssembly::Hg38)
        } else {
            Err(anyhow::anyhow!("unknown genome assembly: {}", s))
        }
    }
}

/// The version of the `seqvar-prio` package.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
