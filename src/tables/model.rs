use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Highest score on the grading scale.
pub const MAX_SCORE: f64 = 20.0;

// ---------------------------------------------------------------------------
// GradeRow – one subject in the grade table
// ---------------------------------------------------------------------------

/// A subject with its score out of 20 and its weight (coefficient).
///
/// Only constructible through [`GradeRow::new`], so a row in hand always has
/// a score in `[0, 20]` and a finite positive weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGradeRow")]
pub struct GradeRow {
    label: String,
    score: f64,
    weight: f64,
}

#[derive(Deserialize)]
struct RawGradeRow {
    label: String,
    score: f64,
    weight: f64,
}

impl TryFrom<RawGradeRow> for GradeRow {
    type Error = CoreError;

    fn try_from(raw: RawGradeRow) -> CoreResult<Self> {
        GradeRow::new(raw.label, raw.score, raw.weight)
    }
}

impl GradeRow {
    pub fn new(label: impl Into<String>, score: f64, weight: f64) -> CoreResult<Self> {
        let label = label.into();
        if !(0.0..=MAX_SCORE).contains(&score) {
            return Err(CoreError::domain(format!(
                "score for '{label}' must lie in [0, {MAX_SCORE}], got {score}"
            )));
        }
        if !(weight.is_finite() && weight > 0.0) {
            return Err(CoreError::domain(format!(
                "weight for '{label}' must be a positive number, got {weight}"
            )));
        }
        Ok(GradeRow {
            label,
            score,
            weight,
        })
    }

    /// Row from built-in seed data; values are checked in debug builds.
    pub(crate) fn seeded(label: &str, score: f64, weight: f64) -> Self {
        debug_assert!((0.0..=MAX_SCORE).contains(&score) && weight > 0.0);
        GradeRow {
            label: label.to_string(),
            score,
            weight,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

// ---------------------------------------------------------------------------
// BeadCatalog – bead name → unit price
// ---------------------------------------------------------------------------

/// Bead catalog keyed by name. Names are unique by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BeadCatalog {
    prices: BTreeMap<String, f64>,
}

impl BeadCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, price)` pairs, validating each; later duplicates
    /// overwrite earlier ones.
    pub fn from_entries<I, S>(entries: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut catalog = Self::new();
        for (name, price) in entries {
            catalog.upsert(name, price)?;
        }
        Ok(catalog)
    }

    /// Catalog from built-in seed data; entries are checked in debug builds.
    pub(crate) fn seeded(entries: &[(&str, f64)]) -> Self {
        let prices = entries
            .iter()
            .map(|&(name, price)| {
                debug_assert!(!name.trim().is_empty() && price.is_finite() && price >= 0.0);
                (name.to_string(), price)
            })
            .collect();
        BeadCatalog { prices }
    }

    /// Insert or update a bead. Returns the previous price, if any.
    pub fn upsert(&mut self, name: impl Into<String>, unit_price: f64) -> CoreResult<Option<f64>> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(CoreError::domain("bead name cannot be empty"));
        }
        if !(unit_price.is_finite() && unit_price >= 0.0) {
            return Err(CoreError::domain(format!(
                "unit price for '{name}' must be a non-negative number, got {unit_price}"
            )));
        }
        Ok(self.prices.insert(name, unit_price))
    }

    /// Remove a bead. Returns its price if it was present.
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.prices.remove(name.trim())
    }

    /// Names are matched after trimming, as stored by [`BeadCatalog::upsert`].
    pub fn price(&self, name: &str) -> Option<f64> {
        self.prices.get(name.trim()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.prices.iter().map(|(name, price)| (name.as_str(), *price))
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ProjectLine – a quantity of one bead in the current project
// ---------------------------------------------------------------------------

/// `bead_name` is not checked against the catalog here; references are
/// resolved when the project is priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProjectLine")]
pub struct ProjectLine {
    bead_name: String,
    quantity: u32,
}

#[derive(Deserialize)]
struct RawProjectLine {
    bead_name: String,
    quantity: u32,
}

impl TryFrom<RawProjectLine> for ProjectLine {
    type Error = CoreError;

    fn try_from(raw: RawProjectLine) -> CoreResult<Self> {
        ProjectLine::new(raw.bead_name, raw.quantity)
    }
}

impl ProjectLine {
    pub fn new(bead_name: impl Into<String>, quantity: u32) -> CoreResult<Self> {
        let bead_name = bead_name.into().trim().to_string();
        if bead_name.is_empty() {
            return Err(CoreError::domain("project line needs a bead name"));
        }
        if quantity == 0 {
            return Err(CoreError::domain(format!(
                "quantity of '{bead_name}' must be positive"
            )));
        }
        Ok(ProjectLine {
            bead_name,
            quantity,
        })
    }

    /// Line from built-in seed data; checked in debug builds.
    pub(crate) fn seeded(bead_name: &str, quantity: u32) -> Self {
        debug_assert!(!bead_name.trim().is_empty() && quantity > 0);
        ProjectLine {
            bead_name: bead_name.to_string(),
            quantity,
        }
    }

    pub fn bead_name(&self) -> &str {
        &self.bead_name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_row_validates_score_and_weight() {
        assert!(GradeRow::new("Maths", 20.0, 2.0).is_ok());
        assert!(GradeRow::new("Maths", 0.0, 0.5).is_ok());
        assert!(GradeRow::new("Maths", 20.5, 1.0).is_err());
        assert!(GradeRow::new("Maths", -1.0, 1.0).is_err());
        assert!(GradeRow::new("Maths", f64::NAN, 1.0).is_err());
        assert!(GradeRow::new("Maths", 12.0, 0.0).is_err());
        assert!(GradeRow::new("Maths", 12.0, f64::INFINITY).is_err());
    }

    #[test]
    fn grade_row_deserialization_is_validated() {
        let ok: GradeRow =
            serde_json::from_str(r#"{"label":"SVT","score":14.5,"weight":2}"#).unwrap();
        assert_eq!(ok.score(), 14.5);
        let bad = serde_json::from_str::<GradeRow>(r#"{"label":"SVT","score":25,"weight":2}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn catalog_upsert_and_remove() {
        let mut catalog = BeadCatalog::new();
        assert_eq!(catalog.upsert("Rocaille", 0.02).unwrap(), None);
        assert_eq!(catalog.upsert(" Rocaille ", 0.03).unwrap(), Some(0.02));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.price("Rocaille"), Some(0.03));
        assert_eq!(catalog.remove("Rocaille"), Some(0.03));
        assert!(catalog.is_empty());
        assert_eq!(catalog.remove("Rocaille"), None);
    }

    #[test]
    fn catalog_lookups_trim_like_upsert() {
        let mut catalog = BeadCatalog::new();
        catalog.upsert(" Nacre ", 1.2).unwrap();
        assert_eq!(catalog.price("Nacre"), Some(1.2));
        assert_eq!(catalog.price("  Nacre\t"), Some(1.2));
        assert_eq!(catalog.remove(" Nacre "), Some(1.2));
        assert!(catalog.is_empty());
    }

    #[test]
    fn catalog_rejects_bad_entries() {
        let mut catalog = BeadCatalog::new();
        assert!(catalog.upsert("", 1.0).is_err());
        assert!(catalog.upsert("Perle", -0.5).is_err());
        assert!(catalog.upsert("Perle", f64::NAN).is_err());
        assert!(catalog.is_empty());
    }

    #[test]
    fn catalog_serializes_as_map() {
        let catalog = BeadCatalog::from_entries([("b", 0.5), ("a", 0.25)]).unwrap();
        let json = serde_json::to_string(&catalog).unwrap();
        assert_eq!(json, r#"{"a":0.25,"b":0.5}"#);
    }

    #[test]
    fn project_line_rejects_zero_quantity() {
        assert!(ProjectLine::new("Rocaille", 0).is_err());
        assert!(ProjectLine::new("  ", 3).is_err());
        let line = ProjectLine::new("Rocaille", 3).unwrap();
        assert_eq!((line.bead_name(), line.quantity()), ("Rocaille", 3));
        assert!(serde_json::from_str::<ProjectLine>(r#"{"bead_name":"x","quantity":0}"#).is_err());
    }
}
