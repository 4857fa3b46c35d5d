//! Application state management for mortydex.
//!
//! This module contains the core `App` struct that owns the character
//! collection, the two filter values, the load state machine and the
//! navigation state. It orchestrates store hydration at startup, the
//! once-per-session catalog fetch, write-through persistence on every
//! state change, and the background task channel.

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::config::Config;
use crate::filter;
use crate::models::Character;
use crate::store::{Store, CHARACTERS_KEY, FILTER_BY_NAME_KEY, FILTER_BY_SPECIES_KEY};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// A fetch produces a single message; 8 leaves headroom for retries.
const CHANNEL_BUFFER_SIZE: usize = 8;

/// Number of rows to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

// ============================================================================
// State Types
// ============================================================================

/// Collection load state machine. The automatic transition
/// `Empty -> Loading -> Populated` happens at most once per session;
/// `Failed` is left only by a user-initiated retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Empty,
    Loading,
    Populated,
    Failed,
}

/// Client-side navigation state: the list view, or a detail view
/// carrying the raw string identifier it was navigated with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(String),
}

/// Overall application input state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    EditingName,
    EnteringId,
    ShowingHelp,
    Quitting,
}

/// Result types from the background fetch task.
enum FetchResult {
    /// The full character collection, aggregated across all pages
    Characters(Vec<Character>),
    /// The fetch failed; the message is surfaced in the status bar
    Error(String),
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    api: ApiClient,
    store: Store,

    // UI state
    pub state: AppState,
    pub route: Route,
    pub selection: usize,
    pub id_input: String,
    pub status_message: Option<String>,

    // Collection and filter state
    pub load: LoadState,
    pub characters: Vec<Character>,
    pub filter_name: String,
    pub filter_species: String,

    // The automatic fetch fires at most once per session
    fetch_attempted: bool,

    // Background task channel
    fetch_rx: mpsc::Receiver<FetchResult>,
    fetch_tx: mpsc::Sender<FetchResult>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::new(config.api_base_url())?;

        let store_dir = config.store_dir()?;
        debug!(?store_dir, "Store directory configured");
        let store = Store::new(store_dir);

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Ok(Self {
            config,
            api,
            store,

            state: AppState::Normal,
            route: Route::List,
            selection: 0,
            id_input: String::new(),
            status_message: None,

            load: LoadState::Empty,
            characters: Vec::new(),
            filter_name: String::new(),
            filter_species: String::new(),

            fetch_attempted: false,

            fetch_rx: rx,
            fetch_tx: tx,
        })
    }

    // =========================================================================
    // Startup
    // =========================================================================

    /// Hydrate collection and filter state from the persistent store.
    /// Runs once at startup, before the first fetch decision.
    pub fn hydrate(&mut self) {
        self.characters = self.store.get(CHARACTERS_KEY, Vec::new());
        self.filter_name = self.store.get(FILTER_BY_NAME_KEY, String::new());
        self.filter_species = self.store.get(FILTER_BY_SPECIES_KEY, String::new());

        self.load = if self.characters.is_empty() {
            LoadState::Empty
        } else {
            LoadState::Populated
        };

        debug!(
            characters = self.characters.len(),
            filter_name = %self.filter_name,
            filter_species = %self.filter_species,
            "Hydrated state from store"
        );
    }

    /// Whether the automatic startup fetch should run: only when the
    /// hydrated collection is empty and no attempt has been made yet.
    pub fn should_fetch(&self) -> bool {
        self.characters.is_empty() && !self.fetch_attempted
    }

    /// Kick off the once-per-session catalog fetch if the collection is
    /// empty. Safe to call unconditionally after hydration.
    pub fn start_initial_fetch(&mut self) {
        if !self.should_fetch() {
            debug!("Skipping fetch - collection already populated or fetch already attempted");
            return;
        }
        self.fetch_attempted = true;
        self.spawn_fetch();
    }

    /// User-initiated retry after a failed fetch.
    pub fn retry_fetch(&mut self) {
        if self.load != LoadState::Failed {
            return;
        }
        self.spawn_fetch();
    }

    fn spawn_fetch(&mut self) {
        info!("Starting background catalog fetch");
        self.load = LoadState::Loading;
        self.status_message = Some("Fetching characters...".to_string());

        let api = self.api.clone();
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let result = match api.fetch_all_characters().await {
                Ok(characters) => FetchResult::Characters(characters),
                Err(e) => FetchResult::Error(e.to_string()),
            };
            if tx.send(result).await.is_err() {
                debug!("Fetch result dropped - receiver gone");
            }
        });
    }

    // =========================================================================
    // Background Task Results
    // =========================================================================

    /// Drain and apply results from the background fetch task.
    /// Called from the main loop on every tick.
    pub fn check_background_tasks(&mut self) {
        // Collect all pending results first to avoid borrow conflicts
        let mut results = Vec::new();
        while let Ok(result) = self.fetch_rx.try_recv() {
            results.push(result);
        }

        for result in results {
            match result {
                FetchResult::Characters(data) => {
                    info!(count = data.len(), "Catalog fetch complete");
                    self.apply_fetched(data);
                    self.status_message = None;
                }
                FetchResult::Error(message) => {
                    warn!(error = %message, "Catalog fetch failed");
                    self.load = LoadState::Failed;
                    self.status_message =
                        Some(format!("Fetch failed: {} - press [r] to retry", message));
                }
            }
        }
    }

    /// Sort the fetched collection by name and replace the owned
    /// collection wholesale, mirroring it to the store.
    fn apply_fetched(&mut self, mut data: Vec<Character>) {
        filter::sort_by_name(&mut data);
        self.set_characters(data);
    }

    // =========================================================================
    // State Setters (write-through to the store)
    // =========================================================================

    fn set_characters(&mut self, characters: Vec<Character>) {
        self.characters = characters;
        self.store.set(CHARACTERS_KEY, &self.characters);
        self.load = LoadState::Populated;
        self.clamp_selection();
    }

    pub fn set_filter_name(&mut self, value: String) {
        self.filter_name = value;
        self.store.set(FILTER_BY_NAME_KEY, &self.filter_name);
        self.selection = 0;
    }

    pub fn set_filter_species(&mut self, value: String) {
        self.filter_species = value;
        self.store.set(FILTER_BY_SPECIES_KEY, &self.filter_species);
        self.selection = 0;
    }

    /// Cycle the species filter through the options derived from the
    /// collection, with the empty string (no constraint) as the first stop.
    pub fn cycle_species(&mut self, forward: bool) {
        let mut options = vec![String::new()];
        options.extend(filter::species_options(&self.characters));

        let current = options
            .iter()
            .position(|s| *s == self.filter_species)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };
        self.set_filter_species(options[next].clone());
    }

    // =========================================================================
    // Derived State
    // =========================================================================

    /// The visible list: the collection narrowed by both filters.
    pub fn filtered(&self) -> Vec<&Character> {
        filter::apply(&self.characters, &self.filter_name, &self.filter_species)
    }

    /// Resolve a raw route parameter against the FULL collection.
    ///
    /// The parameter must parse as an integer AND round-trip to the exact
    /// same string, so non-canonical forms like "02" or "+2" miss instead
    /// of being silently coerced.
    pub fn resolve_character(&self, param: &str) -> Option<&Character> {
        let id: i64 = param.parse().ok()?;
        if id.to_string() != param {
            return None;
        }
        self.characters.iter().find(|c| c.id == id)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Open the detail route for the currently selected list row.
    pub fn open_selected(&mut self) {
        let id = self.filtered().get(self.selection).map(|c| c.id);
        if let Some(id) = id {
            self.route = Route::Detail(id.to_string());
        }
    }

    /// Open the detail route for a raw, user-typed identifier.
    pub fn open_id(&mut self, raw: String) {
        self.route = Route::Detail(raw);
    }

    /// Return to the list route.
    pub fn go_back(&mut self) {
        self.route = Route::List;
    }

    pub fn select_next(&mut self) {
        let len = self.filtered().len();
        if len > 0 && self.selection + 1 < len {
            self.selection += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selection = self.selection.saturating_sub(1);
    }

    pub fn select_page_down(&mut self) {
        let len = self.filtered().len();
        if len > 0 {
            self.selection = (self.selection + PAGE_SCROLL_SIZE).min(len - 1);
        }
    }

    pub fn select_page_up(&mut self) {
        self.selection = self.selection.saturating_sub(PAGE_SCROLL_SIZE);
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered().len();
        if len == 0 {
            self.selection = 0;
        } else if self.selection >= len {
            self.selection = len - 1;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn character(id: i64, name: &str, species: &str) -> Character {
        Character {
            id,
            name: name.to_string(),
            species: species.to_string(),
            ..Default::default()
        }
    }

    fn test_app() -> (TempDir, App) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = Config {
            // Unroutable address so accidental fetches fail fast
            api_base_url: Some("http://127.0.0.1:9/api".to_string()),
            store_dir: Some(dir.path().to_path_buf()),
        };
        let app = App::new(config).expect("Failed to create app");
        (dir, app)
    }

    #[test]
    fn test_hydrate_empty_store() {
        let (_dir, mut app) = test_app();
        app.hydrate();
        assert_eq!(app.load, LoadState::Empty);
        assert!(app.characters.is_empty());
        assert!(app.filter_name.is_empty());
        assert!(app.filter_species.is_empty());
        assert!(app.should_fetch());
    }

    #[test]
    fn test_hydrate_populated_store_skips_fetch() {
        let (dir, mut app) = test_app();

        let seeded = vec![character(1, "Alpha", "X")];
        Store::new(dir.path().to_path_buf()).set(CHARACTERS_KEY, &seeded);

        app.hydrate();
        assert_eq!(app.load, LoadState::Populated);
        assert_eq!(app.characters.len(), 1);
        assert!(!app.should_fetch());
    }

    #[test]
    fn test_hydrate_restores_filters() {
        let (dir, mut app) = test_app();

        let store = Store::new(dir.path().to_path_buf());
        store.set(FILTER_BY_NAME_KEY, &"rick".to_string());
        store.set(FILTER_BY_SPECIES_KEY, &"Human".to_string());

        app.hydrate();
        assert_eq!(app.filter_name, "rick");
        assert_eq!(app.filter_species, "Human");
    }

    #[test]
    fn test_apply_fetched_sorts_and_persists() {
        let (dir, mut app) = test_app();
        app.hydrate();

        app.apply_fetched(vec![character(2, "Beta", "Y"), character(1, "Alpha", "X")]);

        let names: Vec<&str> = app.characters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
        assert_eq!(app.load, LoadState::Populated);

        // Mirrored to the store
        let persisted: Vec<Character> =
            Store::new(dir.path().to_path_buf()).get(CHARACTERS_KEY, Vec::new());
        assert_eq!(persisted.len(), 2);
        assert_eq!(persisted[0].name, "Alpha");
    }

    #[tokio::test]
    async fn test_initial_fetch_attempted_once() {
        let (_dir, mut app) = test_app();
        app.hydrate();

        assert!(app.should_fetch());
        app.start_initial_fetch();
        assert_eq!(app.load, LoadState::Loading);
        assert!(!app.should_fetch());

        // A second call must not re-arm the fetch
        app.start_initial_fetch();
        assert!(!app.should_fetch());
    }

    #[tokio::test]
    async fn test_fetch_failure_surfaces_and_retry_rearms() {
        let (_dir, mut app) = test_app();
        app.hydrate();

        app.fetch_tx
            .try_send(FetchResult::Error("connection refused".to_string()))
            .expect("Failed to queue fetch result");
        app.check_background_tasks();

        assert_eq!(app.load, LoadState::Failed);
        let message = app.status_message.clone().expect("Expected a status banner");
        assert!(message.contains("connection refused"));
        assert!(message.contains("[r]"));

        // Retry is user-initiated and only valid from Failed
        app.retry_fetch();
        assert_eq!(app.load, LoadState::Loading);
    }

    #[tokio::test]
    async fn test_retry_is_noop_unless_failed() {
        let (_dir, mut app) = test_app();
        app.hydrate();

        app.retry_fetch();
        assert_eq!(app.load, LoadState::Empty);
    }

    #[test]
    fn test_set_filters_write_through() {
        let (dir, mut app) = test_app();
        app.hydrate();
        app.set_characters(vec![character(1, "Alpha", "X"), character(2, "Beta", "Y")]);

        app.set_filter_name("al".to_string());
        app.set_filter_species(String::new());

        let visible: Vec<&str> = app.filtered().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(visible, vec!["Alpha"]);

        let store = Store::new(dir.path().to_path_buf());
        assert_eq!(store.get(FILTER_BY_NAME_KEY, String::new()), "al");
    }

    #[test]
    fn test_resolve_character_requires_canonical_id() {
        let (_dir, mut app) = test_app();
        app.set_characters(vec![
            character(1, "Rick", "Human"),
            character(2, "Morty", "Human"),
        ]);

        assert_eq!(app.resolve_character("2").map(|c| c.name.as_str()), Some("Morty"));
        assert!(app.resolve_character("02").is_none());
        assert!(app.resolve_character("+2").is_none());
        assert!(app.resolve_character("3").is_none());
        assert!(app.resolve_character("morty").is_none());
    }

    #[test]
    fn test_resolve_uses_full_collection_not_filtered() {
        let (_dir, mut app) = test_app();
        app.set_characters(vec![
            character(1, "Rick", "Human"),
            character(2, "Morty", "Human"),
        ]);
        app.set_filter_name("rick".to_string());

        assert_eq!(app.filtered().len(), 1);
        // Morty is filtered out of the list but still resolvable by id
        assert!(app.resolve_character("2").is_some());
    }

    #[test]
    fn test_cycle_species() {
        let (_dir, mut app) = test_app();
        app.set_characters(vec![
            character(1, "Rick", "Human"),
            character(2, "Birdperson", "Bird-Person"),
        ]);

        assert_eq!(app.filter_species, "");
        app.cycle_species(true);
        assert_eq!(app.filter_species, "Bird-Person");
        app.cycle_species(true);
        assert_eq!(app.filter_species, "Human");
        app.cycle_species(true);
        assert_eq!(app.filter_species, "");
        app.cycle_species(false);
        assert_eq!(app.filter_species, "Human");
    }

    #[test]
    fn test_open_selected_navigates_with_canonical_id() {
        let (_dir, mut app) = test_app();
        app.set_characters(vec![
            character(1, "Alpha", "X"),
            character(2, "Beta", "Y"),
        ]);
        app.selection = 1;
        app.open_selected();
        assert_eq!(app.route, Route::Detail("2".to_string()));

        app.go_back();
        assert_eq!(app.route, Route::List);
    }

    #[test]
    fn test_selection_clamped_to_filtered_list() {
        let (_dir, mut app) = test_app();
        app.set_characters(vec![
            character(1, "Alpha", "X"),
            character(2, "Beta", "Y"),
        ]);
        app.selection = 1;
        app.set_filter_name("alpha".to_string());
        // Setter resets selection; navigation stays in range
        assert_eq!(app.selection, 0);
        app.select_next();
        assert_eq!(app.selection, 0);
    }
}
