// 🎛️ Language Controller - explicit application state
// One store, replaced wholesale; overlapping loads resolved last-write-wins

use crate::criteria::FilterCriteria;
use crate::filter::apply_criteria;
use crate::language::{Language, UiStrings};
use crate::loader::{DataSource, LoadError};
use crate::record::{BeachRecord, RecordStore};
use crate::render::{render_table, TableView};
use tracing::{debug, error, info};

// ============================================================================
// LOAD SEQUENCING
// ============================================================================

/// A load request; only the most recently issued ticket may apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub seq: u64,
    pub language: Language,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { count: usize },
    /// Load failed; the store was emptied
    Failed,
    /// A newer load was issued after this one; response dropped
    Stale,
}

// ============================================================================
// DIRECTORY
// ============================================================================

pub struct Directory {
    language: Language,
    store: RecordStore,
    criteria: FilterCriteria,
    last_issued: u64,
    pending: Option<LoadTicket>,
}

impl Directory {
    pub fn new(language: Language) -> Self {
        Directory {
            language,
            store: RecordStore::new(),
            criteria: FilterCriteria::default(),
            last_issued: 0,
            pending: None,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn strings(&self) -> &'static UiStrings {
        self.language.strings()
    }

    pub fn records(&self) -> &[BeachRecord] {
        self.store.records()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    pub fn criteria_mut(&mut self) -> &mut FilterCriteria {
        &mut self.criteria
    }

    pub fn reset_criteria(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    pub fn begin_load(&mut self, language: Language) -> LoadTicket {
        self.last_issued += 1;
        let ticket = LoadTicket {
            seq: self.last_issued,
            language,
        };
        self.pending = Some(ticket);
        debug!(seq = ticket.seq, language = %language, "load issued");
        ticket
    }

    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<BeachRecord>, LoadError>,
    ) -> LoadOutcome {
        if ticket.seq != self.last_issued {
            debug!(
                seq = ticket.seq,
                latest = self.last_issued,
                "dropping stale load response"
            );
            return LoadOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(records) => {
                let count = records.len();
                self.store.replace(records);
                info!(language = %ticket.language, count, "beach data loaded");
                LoadOutcome::Applied { count }
            }
            Err(err) => {
                error!(language = %ticket.language, error = ?err, "beach data load failed");
                self.store.clear();
                LoadOutcome::Failed
            }
        }
    }

    /// Load the active language synchronously
    pub fn load_from(&mut self, source: &dyn DataSource) -> LoadOutcome {
        let ticket = self.begin_load(self.language);
        let result = source.load(ticket.language);
        self.complete_load(ticket, result)
    }

    /// Flip the language and start loading its data.
    ///
    /// The store is emptied until the new load lands, so records of the
    /// old language never show under the new language's headers.
    pub fn toggle(&mut self) -> LoadTicket {
        self.language = self.language.toggle();
        self.store.clear();
        info!(language = %self.language, "language switched");
        self.begin_load(self.language)
    }

    pub fn visible(&self) -> Vec<BeachRecord> {
        apply_criteria(self.store.records(), &self.criteria)
    }

    pub fn render(&self) -> TableView {
        render_table(&self.visible(), self.language)
    }
}

impl Default for Directory {
    fn default() -> Self {
        Directory::new(Language::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::Presence;
    use crate::language::{JA, ZH};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn beach(name: &str, lifeguard: bool) -> BeachRecord {
        BeachRecord {
            name: name.to_string(),
            address: String::new(),
            open_time: String::new(),
            has_lifeguard: lifeguard,
            has_shower: false,
            is_free: true,
            note: String::new(),
        }
    }

    struct MemorySource {
        data: HashMap<Language, Vec<BeachRecord>>,
    }

    impl DataSource for MemorySource {
        fn load(&self, language: Language) -> Result<Vec<BeachRecord>, LoadError> {
            self.data.get(&language).cloned().ok_or_else(|| LoadError::Io {
                path: PathBuf::from(language.data_file_name()),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            })
        }
    }

    fn source() -> MemorySource {
        let mut data = HashMap::new();
        data.insert(Language::Zh, vec![beach("翡翠海滩", true), beach("日落海滩", false)]);
        data.insert(Language::Ja, vec![beach("エメラルドビーチ", true)]);
        MemorySource { data }
    }

    fn io_error() -> LoadError {
        LoadError::Io {
            path: PathBuf::from("beaches.json"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "boom"),
        }
    }

    #[test]
    fn test_initial_load_renders_all() {
        let mut dir = Directory::new(Language::Zh);
        assert_eq!(dir.load_from(&source()), LoadOutcome::Applied { count: 2 });

        let view = dir.render();
        assert_eq!(view.count, 2);
        assert!(!view.no_results_visible);
    }

    #[test]
    fn test_failed_load_clears_store() {
        let mut dir = Directory::new(Language::Zh);
        dir.load_from(&source());

        let ticket = dir.begin_load(Language::Zh);
        assert_eq!(dir.complete_load(ticket, Err(io_error())), LoadOutcome::Failed);
        assert!(dir.records().is_empty());

        let view = dir.render();
        assert_eq!(view.count, 0);
        assert!(view.no_results_visible);
    }

    #[test]
    fn test_toggle_round_trip_restores_strings() {
        let mut dir = Directory::new(Language::Zh);
        let src = source();
        dir.load_from(&src);
        assert_eq!(dir.strings(), &ZH);

        let ticket = dir.toggle();
        assert_eq!(ticket.language, Language::Ja);
        assert_eq!(dir.strings(), &JA);
        dir.complete_load(ticket, src.load(ticket.language));
        assert_eq!(dir.records()[0].name, "エメラルドビーチ");

        let ticket = dir.toggle();
        dir.complete_load(ticket, src.load(ticket.language));
        assert_eq!(dir.language(), Language::Zh);
        assert_eq!(dir.strings(), &ZH);
        assert_eq!(dir.records().len(), 2);
    }

    #[test]
    fn test_toggle_empties_store_until_load_lands() {
        let mut dir = Directory::new(Language::Zh);
        dir.load_from(&source());

        dir.toggle();
        assert!(dir.is_loading());
        assert!(dir.records().is_empty());
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut dir = Directory::new(Language::Zh);
        let src = source();

        let to_ja = dir.toggle();
        let back_to_zh = dir.toggle();

        // Newer request answers first, then the older one arrives late
        let outcome = dir.complete_load(back_to_zh, src.load(back_to_zh.language));
        assert_eq!(outcome, LoadOutcome::Applied { count: 2 });
        assert_eq!(dir.complete_load(to_ja, src.load(to_ja.language)), LoadOutcome::Stale);

        assert_eq!(dir.language(), Language::Zh);
        assert_eq!(dir.records()[0].name, "翡翠海滩");
        assert!(!dir.is_loading());
    }

    #[test]
    fn test_older_response_before_newer_is_still_stale() {
        let mut dir = Directory::new(Language::Zh);
        let src = source();

        let first = dir.toggle();
        let second = dir.toggle();

        assert_eq!(dir.complete_load(first, src.load(first.language)), LoadOutcome::Stale);
        assert!(dir.is_loading());
        assert_eq!(
            dir.complete_load(second, src.load(second.language)),
            LoadOutcome::Applied { count: 2 }
        );
    }

    #[test]
    fn test_criteria_survive_toggle() {
        let mut dir = Directory::new(Language::Zh);
        let src = source();
        dir.load_from(&src);
        dir.criteria_mut().lifeguard = Presence::No;
        assert_eq!(dir.render().count, 1);

        let ticket = dir.toggle();
        dir.complete_load(ticket, src.load(ticket.language));
        assert_eq!(dir.criteria().lifeguard, Presence::No);
        assert_eq!(dir.render().count, 0);

        dir.reset_criteria();
        assert_eq!(dir.render().count, 1);
    }
}
