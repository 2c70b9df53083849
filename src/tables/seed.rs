//! Built-in datasets used the first time a session touches a table.

use super::model::{BeadCatalog, GradeRow, ProjectLine};
use crate::kernel::affine::Point;

/// Subjects of the default grade table, each at score 10 with weight 1.
pub const DEFAULT_SUBJECTS: [&str; 11] = [
    "Français",
    "Mathématiques",
    "Histoire-Géographie",
    "Anglais",
    "Espagnol",
    "Physique-Chimie",
    "SVT",
    "SES",
    "EPS",
    "Philosophie",
    "Enseignement scientifique",
];

/// Default bead catalog: name and unit price in euros.
pub const DEFAULT_BEADS: [(&str, f64); 8] = [
    ("Rocaille 2mm", 0.02),
    ("Perle en verre 6mm", 0.15),
    ("Perle en bois 8mm", 0.10),
    ("Perle heishi", 0.05),
    ("Perle lettre", 0.08),
    ("Fermoir mousqueton", 0.50),
    ("Anneau de jonction", 0.03),
    ("Fil élastique (m)", 0.20),
];

/// Default project: a beaded bracelet.
pub const DEFAULT_PROJECT: [(&str, u32); 4] = [
    ("Rocaille 2mm", 60),
    ("Perle lettre", 5),
    ("Perle en verre 6mm", 4),
    ("Fil élastique (m)", 1),
];

pub fn default_grades() -> Vec<GradeRow> {
    DEFAULT_SUBJECTS
        .iter()
        .map(|label| GradeRow::seeded(label, 10.0, 1.0))
        .collect()
}

pub fn default_catalog() -> BeadCatalog {
    BeadCatalog::seeded(&DEFAULT_BEADS)
}

pub fn default_project() -> Vec<ProjectLine> {
    DEFAULT_PROJECT
        .iter()
        .map(|&(name, qty)| ProjectLine::seeded(name, qty))
        .collect()
}

/// Starting points of the affine checker: f(x) = 2x + 1.
pub fn default_points() -> Vec<Point> {
    vec![Point::new(0.0, 1.0), Point::new(1.0, 3.0), Point::new(2.0, 5.0)]
}
