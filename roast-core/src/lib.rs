pub mod locale;
pub mod progression;

use roast_database::Database;

use crate::locale::LocaleStore;
use crate::progression::ProgressionService;

pub type Error = anyhow::Error;

/// Handles shared by every consumer of the progression views.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Database,
    pub locale: LocaleStore,
}

impl AppState {
    pub fn progression(&self) -> ProgressionService<'_> {
        ProgressionService::new(&self.db)
    }
}
