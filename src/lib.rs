//! Calculators for a small maths companion: probability, arithmetic
//! sequences, affine functions, grade averages and craft pricing.
//!
//! - [`kernel`]: pure numeric functions
//! - [`tables`]: validated rows, weighted averages, project pricing
//! - [`session`]: per-user in-memory tables
//! - [`app`]: one request in, one structured response out

pub mod app;
pub mod error;
pub mod kernel;
pub mod session;
pub mod settings;
pub mod tables;

pub use error::{CoreError, CoreResult, ErrorKind, ErrorReport};
pub use kernel::affine::{detect_affine, fit_affine, AffineAnalysis, AffineFit, Point};
pub use kernel::probability::{
    binomial_pmf, combinations, probability_tree, simple_probability, ProbabilityTree,
};
pub use kernel::sequence::{
    detect_arithmetic_sequence, parse_terms, project_terms, SequenceAnalysis,
};
pub use session::Session;
pub use tables::grades::{classify_average, weighted_average, Mention};
pub use tables::model::{BeadCatalog, GradeRow, ProjectLine};
pub use tables::pricing::{price_project, Labor, PricingPolicy, Quote, QuoteLine};
