mod orthography;
mod rules;
mod tailo;
mod tailo_numeric;
mod taiwen;
mod variant;

pub use orthography::Orthography;
pub use rules::{TranscriptNormalizer, TranscriptValidator};
pub use tailo::TailoRules;
pub use tailo_numeric::TailoNumericRules;
pub use taiwen::TaiwenRules;
pub use variant::OrthographicVariant;
