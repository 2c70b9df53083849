use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ErrorReport};
use crate::kernel::affine::{detect_affine, AffineAnalysis, Point};
use crate::kernel::probability::{
    binomial_pmf, combinations, probability_tree, simple_probability, ProbabilityTree,
};
use crate::kernel::sequence::{
    detect_arithmetic_sequence, parse_terms, project_terms, SequenceAnalysis,
};
use crate::session::Session;
use crate::settings::Settings;
use crate::tables::grades::{classify_average, weighted_average, Mention};
use crate::tables::loader::{load_catalog_file, parse_catalog_csv, parse_grades_csv};
use crate::tables::model::{BeadCatalog, GradeRow, ProjectLine};
use crate::tables::pricing::{price_project, Labor, PricingPolicy, Quote};

// ---------------------------------------------------------------------------
// Requests and responses
// ---------------------------------------------------------------------------

/// One user action.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    SimpleProbability {
        favorable: u64,
        total: u64,
    },
    Combinations {
        n: u64,
        k: u64,
    },
    Binomial {
        n: u64,
        k: u64,
        p: f64,
    },
    ProbabilityTree {
        p_a: f64,
        p_b_given_a: f64,
        p_b_given_not_a: f64,
    },
    /// Whitespace-separated terms, e.g. `"2 5 8 11"`.
    AnalyzeSequence {
        text: String,
    },
    AnalyzeAffine {
        points: Vec<Point>,
    },
    /// Averages `rows`, or the session's grade table when absent.
    GradeAverage {
        #[serde(default)]
        rows: Option<Vec<GradeRow>>,
    },
    GetGrades,
    SetGrades {
        rows: Vec<GradeRow>,
    },
    ImportGrades {
        csv: String,
    },
    GetCatalog,
    UpsertBead {
        name: String,
        unit_price: f64,
    },
    RemoveBead {
        name: String,
    },
    ImportCatalog {
        csv: String,
    },
    GetProject,
    SetProject {
        lines: Vec<ProjectLine>,
    },
    /// Missing fields fall back to the configured rate and pricing policy.
    QuoteProject {
        #[serde(default)]
        hourly_rate: Option<f64>,
        #[serde(default)]
        duration_hours: f64,
        #[serde(default)]
        multiplier: Option<f64>,
        #[serde(default)]
        flat: Option<f64>,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Probability {
        probability: f64,
    },
    /// Exact count as a decimal string.
    Combinations {
        combinations: String,
    },
    Tree(ProbabilityTree),
    Sequence {
        #[serde(flatten)]
        analysis: SequenceAnalysis,
        /// First terms of the sequence, only when it is arithmetic.
        projection: Vec<f64>,
    },
    Affine(AffineAnalysis),
    Average {
        average: f64,
        mention: Mention,
    },
    Grades {
        grades: Vec<GradeRow>,
    },
    Catalog {
        catalog: BeadCatalog,
    },
    Bead {
        name: String,
        previous_price: Option<f64>,
    },
    Project {
        project: Vec<ProjectLine>,
    },
    Quote(Quote),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Ok { result: Payload },
    Error { error: ErrorReport },
}

impl From<CoreResult<Payload>> for Response {
    fn from(result: CoreResult<Payload>) -> Self {
        match result {
            Ok(result) => Response::Ok { result },
            Err(err) => Response::Error {
                error: ErrorReport::from(&err),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// App: settings + one session
// ---------------------------------------------------------------------------

pub struct App {
    pub settings: Settings,
    pub session: Session,
}

impl Default for App {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            session: Session::new(),
        }
    }
}

impl App {
    /// Build an app from settings, loading the catalog seed file if one is
    /// configured.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let session = match &settings.catalog_file {
            Some(path) => {
                let catalog = load_catalog_file(path)?;
                log::info!("catalog seed: {} entries from {}", catalog.len(), path.display());
                Session::with_catalog_seed(catalog)
            }
            None => Session::new(),
        };
        Ok(Self { settings, session })
    }

    /// Handle a single request against the current session.
    pub fn handle(&mut self, request: Request) -> Response {
        log::debug!("request: {request:?}");
        let response = Response::from(self.dispatch(request));
        if let Response::Error { error } = &response {
            log::warn!("rejected ({:?}): {}", error.kind, error.detail);
        }
        response
    }

    fn dispatch(&mut self, request: Request) -> CoreResult<Payload> {
        let abs_tol = self.settings.abs_tol;
        match request {
            Request::SimpleProbability { favorable, total } => Ok(Payload::Probability {
                probability: simple_probability(favorable, total)?,
            }),
            Request::Combinations { n, k } => Ok(Payload::Combinations {
                combinations: combinations(n, k)?.to_string(),
            }),
            Request::Binomial { n, k, p } => Ok(Payload::Probability {
                probability: binomial_pmf(n, k, p)?,
            }),
            Request::ProbabilityTree {
                p_a,
                p_b_given_a,
                p_b_given_not_a,
            } => Ok(Payload::Tree(probability_tree(
                p_a,
                p_b_given_a,
                p_b_given_not_a,
            )?)),
            Request::AnalyzeSequence { text } => {
                let terms = parse_terms(&text)?;
                let analysis = detect_arithmetic_sequence(&terms, abs_tol)?;
                let projection = if analysis.is_arithmetic {
                    project_terms(
                        analysis.first_term,
                        analysis.common_difference,
                        self.settings.projection_len,
                    )
                } else {
                    Vec::new()
                };
                Ok(Payload::Sequence {
                    analysis,
                    projection,
                })
            }
            Request::AnalyzeAffine { points } => {
                Ok(Payload::Affine(detect_affine(&points, abs_tol)?))
            }
            Request::GradeAverage { rows } => {
                let average = match rows {
                    Some(rows) => weighted_average(&rows)?,
                    None => weighted_average(self.session.get_grades())?,
                };
                Ok(Payload::Average {
                    average,
                    mention: classify_average(average),
                })
            }
            Request::GetGrades => Ok(self.grades_payload()),
            Request::SetGrades { rows } => {
                self.session.set_grades(rows);
                Ok(self.grades_payload())
            }
            Request::ImportGrades { csv } => {
                let rows = parse_grades_csv(&csv)?;
                self.session.set_grades(rows);
                Ok(self.grades_payload())
            }
            Request::GetCatalog => Ok(self.catalog_payload()),
            Request::UpsertBead { name, unit_price } => {
                let previous_price = self.session.upsert_catalog_entry(&name, unit_price)?;
                Ok(Payload::Bead {
                    name: name.trim().to_string(),
                    previous_price,
                })
            }
            Request::RemoveBead { name } => {
                let name = name.trim().to_string();
                match self.session.remove_catalog_entry(&name) {
                    Some(price) => Ok(Payload::Bead {
                        name,
                        previous_price: Some(price),
                    }),
                    None => Err(CoreError::NotInCatalog { name }),
                }
            }
            Request::ImportCatalog { csv } => {
                let catalog = parse_catalog_csv(&csv)?;
                self.session.replace_catalog(catalog);
                Ok(self.catalog_payload())
            }
            Request::GetProject => Ok(self.project_payload()),
            Request::SetProject { lines } => {
                self.session.set_project(lines);
                Ok(self.project_payload())
            }
            Request::QuoteProject {
                hourly_rate,
                duration_hours,
                multiplier,
                flat,
            } => {
                let labor = Labor {
                    hourly_rate: hourly_rate.unwrap_or(self.settings.hourly_rate),
                    duration_hours,
                };
                let defaults = self.settings.pricing;
                let policy = PricingPolicy {
                    multiplier: multiplier.unwrap_or(defaults.multiplier),
                    flat: flat.unwrap_or(defaults.flat),
                };
                let (catalog, project) = self.session.catalog_and_project();
                Ok(Payload::Quote(price_project(catalog, project, labor, policy)?))
            }
        }
    }

    fn grades_payload(&mut self) -> Payload {
        Payload::Grades {
            grades: self.session.get_grades().to_vec(),
        }
    }

    fn catalog_payload(&mut self) -> Payload {
        Payload::Catalog {
            catalog: self.session.get_catalog().clone(),
        }
    }

    fn project_payload(&mut self) -> Payload {
        Payload::Project {
            project: self.session.get_project().to_vec(),
        }
    }
}
