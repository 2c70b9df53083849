use crate::tables::model::{BeadCatalog, GradeRow, ProjectLine};
use crate::tables::seed;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Mutable tables of one user session, held in memory only.
///
/// Each table is seeded independently the first time it is read or edited.
/// The session is an explicit value: whoever serves a user owns one.
#[derive(Debug, Clone)]
pub struct Session {
    /// Catalog used when `catalog` is first touched.
    catalog_seed: BeadCatalog,

    catalog: Option<BeadCatalog>,
    project: Option<Vec<ProjectLine>>,
    grades: Option<Vec<GradeRow>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_catalog_seed(seed::default_catalog())
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session whose catalog starts from `catalog_seed` instead of the
    /// built-in bead list.
    pub fn with_catalog_seed(catalog_seed: BeadCatalog) -> Self {
        Self {
            catalog_seed,
            catalog: None,
            project: None,
            grades: None,
        }
    }

    // -- catalog --

    pub fn get_catalog(&mut self) -> &BeadCatalog {
        self.catalog_mut()
    }

    /// Insert or update a bead; returns the previous price.
    pub fn upsert_catalog_entry(
        &mut self,
        name: &str,
        unit_price: f64,
    ) -> crate::CoreResult<Option<f64>> {
        let previous = self.catalog_mut().upsert(name, unit_price)?;
        let name = name.trim();
        log::info!("catalog: {name} = {unit_price} (was {previous:?})");
        Ok(previous)
    }

    /// Remove a bead. Project lines naming it are left in place and will
    /// fail to resolve when the project is priced.
    pub fn remove_catalog_entry(&mut self, name: &str) -> Option<f64> {
        let name = name.trim();
        let removed = self.catalog_mut().remove(name);
        if removed.is_some() {
            let dangling = self
                .project
                .as_ref()
                .map(|lines| lines.iter().filter(|l| l.bead_name() == name).count())
                .unwrap_or(0);
            log::info!("catalog: removed {name} ({dangling} project line(s) now dangling)");
        } else {
            log::debug!("catalog: remove of unknown bead {name} ignored");
        }
        removed
    }

    /// Replace the catalog wholesale (CSV import).
    pub fn replace_catalog(&mut self, catalog: BeadCatalog) {
        log::info!("catalog: replaced with {} entries", catalog.len());
        self.catalog = Some(catalog);
    }

    fn catalog_mut(&mut self) -> &mut BeadCatalog {
        seeded_catalog(&mut self.catalog, &self.catalog_seed)
    }

    // -- project --

    pub fn get_project(&mut self) -> &[ProjectLine] {
        seeded_project(&mut self.project)
    }

    pub fn set_project(&mut self, lines: Vec<ProjectLine>) {
        log::info!("project: {} line(s)", lines.len());
        self.project = Some(lines);
    }

    // -- grades --

    pub fn get_grades(&mut self) -> &[GradeRow] {
        self.grades.get_or_insert_with(|| {
            log::debug!("seeding grade table with default subjects");
            seed::default_grades()
        })
    }

    pub fn set_grades(&mut self, rows: Vec<GradeRow>) {
        log::info!("grades: {} row(s)", rows.len());
        self.grades = Some(rows);
    }

    /// Catalog and project together, both seeded if needed.
    pub fn catalog_and_project(&mut self) -> (&BeadCatalog, &[ProjectLine]) {
        let catalog = seeded_catalog(&mut self.catalog, &self.catalog_seed);
        let project = seeded_project(&mut self.project);
        (&*catalog, project.as_slice())
    }
}

// -- first-touch seeding --

fn seeded_catalog<'a>(
    slot: &'a mut Option<BeadCatalog>,
    catalog_seed: &BeadCatalog,
) -> &'a mut BeadCatalog {
    slot.get_or_insert_with(|| {
        log::debug!("seeding catalog with {} entries", catalog_seed.len());
        catalog_seed.clone()
    })
}

fn seeded_project(slot: &mut Option<Vec<ProjectLine>>) -> &mut Vec<ProjectLine> {
    slot.get_or_insert_with(|| {
        log::debug!("seeding project with default lines");
        seed::default_project()
    })
}
