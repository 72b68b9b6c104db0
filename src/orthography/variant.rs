use std::fmt;
use std::str::FromStr;

use crate::error::PrepError;

/// Transcript writing systems carried by the corpus JSON records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrthographicVariant {
    /// Romanized Tâi-lô with diacritic tone marks.
    Tailo,
    /// Romanized Tâi-lô with numeric tone marks.
    TailoNumeric,
    /// Mixed Han character / romanized Taiwanese.
    SinicizedTaiwanese,
}

impl OrthographicVariant {
    pub const ALL: [OrthographicVariant; 3] = [
        OrthographicVariant::Tailo,
        OrthographicVariant::TailoNumeric,
        OrthographicVariant::SinicizedTaiwanese,
    ];

    /// Command-line tag for this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            OrthographicVariant::Tailo => "tailo",
            OrthographicVariant::TailoNumeric => "tailonum",
            OrthographicVariant::SinicizedTaiwanese => "taiwen",
        }
    }

    /// Key of the transcript in each corpus JSON record.
    pub fn transcript_field(&self) -> &'static str {
        match self {
            OrthographicVariant::Tailo => "台羅",
            OrthographicVariant::TailoNumeric => "台羅數字調",
            OrthographicVariant::SinicizedTaiwanese => "漢羅台文",
        }
    }

    pub fn requires_tokenizer(&self) -> bool {
        matches!(self, OrthographicVariant::SinicizedTaiwanese)
    }
}

impl fmt::Display for OrthographicVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.transcript_field(), self.tag())
    }
}

impl FromStr for OrthographicVariant {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|variant| variant.tag().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PrepError::UnknownVariant(s.to_string()))
    }
}
