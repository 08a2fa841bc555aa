// Beach Directory - Core Library
// Filter-and-render engine shared by the terminal UI and the web server

pub mod record;
pub mod language;
pub mod criteria;
pub mod filter;
pub mod render;
pub mod maplink;
pub mod loader;
pub mod controller;
pub mod input;
pub mod logging;

#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use record::{BeachRecord, RecordStore};
pub use language::{Language, LanguageParseError, UiStrings, JA, ZH};
pub use criteria::{build_predicate, CriteriaError, FeeFilter, FilterCriteria, Presence};
pub use filter::{apply_criteria, filter_records};
pub use render::{
    criteria_query, escape_html, render_page, render_table, Badge, BadgeKind, TableView,
};
pub use maplink::{map_search_url, open_map, BrowserLauncher, MapLinkError, SystemBrowser};
pub use loader::{parse_records, DataSource, FileSource, LoadError};
pub use controller::{Directory, LoadOutcome, LoadTicket};
pub use input::{Control, Dispatch, InputBinding, InputEvent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
