#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::sync::{Arc, Mutex, OnceLock};

use anyhow::{Context, Result};
use reqwest::Client;
use state::InitCell;

use crate::sheets::SheetsClient;

/// Default REST endpoint for the spreadsheet service.
const DEFAULT_ENDPOINT: &str = "https://sheets.googleapis.com/v4";

/// Default A1-notation range holding the course block.
const DEFAULT_RANGE: &str = "engenharia_de_software!A2:K";

/// Spreadsheet credentials loaded from the environment, if available.
#[derive(Clone)]
struct SheetsEnv {
    /// Identifier of the spreadsheet holding the course roster.
    spreadsheet_id: String,
    /// OAuth bearer token sent with every Sheets request.
    access_token:   String,
}

impl SheetsEnv {
    /// Builds a credential bundle from environment-provided values.
    fn new(spreadsheet_id: String, access_token: String) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.trim().to_owned(),
            access_token:   access_token.trim().to_owned(),
        }
    }
}

/// Anchor cells for the two graded columns written back to the sheet.
///
/// Both anchors sit one row below the header block, so value `i` of each
/// column lands on the same sheet row as student `i`.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    /// Anchor cell for the situation column.
    situation_cell:   String,
    /// Anchor cell for the final-exam score column.
    final_grade_cell: String,
}

impl OutputLayout {
    /// Creates a layout from the two anchor cells.
    pub fn new(situation_cell: impl Into<String>, final_grade_cell: impl Into<String>) -> Self {
        Self {
            situation_cell:   situation_cell.into(),
            final_grade_cell: final_grade_cell.into(),
        }
    }

    /// Returns the anchor cell for the situation column.
    pub fn situation_cell(&self) -> &str {
        &self.situation_cell
    }

    /// Returns the anchor cell for the final-exam score column.
    pub fn final_grade_cell(&self) -> &str {
        &self.final_grade_cell
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new("G4", "H4")
    }
}

/// Runtime configuration shared across the crate.
pub struct ConfigState {
    /// Spreadsheet credentials, if configured.
    sheets_env:  Option<SheetsEnv>,
    /// Lazily constructed Sheets REST client.
    sheets:      InitCell<SheetsClient>,
    /// Shared reqwest HTTP client reused across network helpers.
    http_client: Client,
    /// Base endpoint for the spreadsheet REST surface.
    endpoint:    String,
    /// A1-notation range holding the course block.
    range:       String,
    /// Anchor cells for the graded output columns.
    layout:      OutputLayout,
}

impl ConfigState {
    /// Construct a new configuration instance by reading the environment.
    fn new() -> Result<Self> {
        let sheets_env = match (
            std::env::var("PAUTA_SPREADSHEET_ID").ok(),
            std::env::var("PAUTA_ACCESS_TOKEN").ok(),
        ) {
            (Some(id), Some(token)) if !id.trim().is_empty() && !token.trim().is_empty() => {
                Some(SheetsEnv::new(id, token))
            }
            _ => None,
        };

        let http_client = Client::builder()
            // Avoid macOS dynamic store lookups that fail in sandboxed environments.
            .no_proxy()
            .build()
            .context("Failed to construct shared HTTP client")?;

        let endpoint = std::env::var("PAUTA_SHEETS_ENDPOINT")
            .map(|value| value.trim().trim_end_matches('/').to_owned())
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let range = std::env::var("PAUTA_RANGE").unwrap_or_else(|_| DEFAULT_RANGE.to_string());

        let layout = OutputLayout::new(
            std::env::var("PAUTA_SITUATION_CELL").unwrap_or_else(|_| "G4".to_string()),
            std::env::var("PAUTA_FINAL_GRADE_CELL").unwrap_or_else(|_| "H4".to_string()),
        );

        Ok(Self {
            sheets_env,
            sheets: InitCell::new(),
            http_client,
            endpoint,
            range,
            layout,
        })
    }

    /// Returns the configured Sheets client if credentials are available.
    pub fn sheets(&self) -> Option<SheetsClient> {
        if let Some(client) = self.sheets.try_get() {
            return Some(client.clone());
        }

        let creds = self.sheets_env.as_ref()?;
        let client = SheetsClient::new(
            self.http_client.clone(),
            self.endpoint.clone(),
            creds.spreadsheet_id.clone(),
            self.range.clone(),
            creds.access_token.clone(),
        );
        self.sheets.set(client);
        Some(self.sheets.get().clone())
    }

    /// Returns a clone of the shared reqwest HTTP client.
    pub fn http_client(&self) -> Client {
        self.http_client.clone()
    }

    /// Returns the configured spreadsheet endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the configured A1-notation source range.
    pub fn range(&self) -> &str {
        &self.range
    }

    /// Returns the anchor cells for the graded output columns.
    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }
}

/// Shared configuration handle used throughout the crate.
#[derive(Clone)]
pub struct ConfigHandle(Arc<ConfigState>);

impl std::ops::Deref for ConfigHandle {
    type Target = ConfigState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Global storage for the lazily constructed configuration state.
static CONFIG_SLOT: OnceLock<Mutex<Option<Arc<ConfigState>>>> = OnceLock::new();

/// Returns the mutex guarding the global configuration slot.
fn slot() -> &'static Mutex<Option<Arc<ConfigState>>> {
    CONFIG_SLOT.get_or_init(|| Mutex::new(None))
}

/// Ensure the global configuration has been initialized and return a handle.
pub fn ensure_initialized() -> Result<ConfigHandle> {
    let slot = slot();
    let mut guard = slot.lock().expect("config slot poisoned");
    if let Some(cfg) = guard.as_ref() {
        return Ok(ConfigHandle(Arc::clone(cfg)));
    }

    let cfg = ConfigState::new().map(Arc::new)?;
    *guard = Some(Arc::clone(&cfg));
    Ok(ConfigHandle(cfg))
}

/// Returns the active configuration, initializing it on demand.
pub fn get() -> ConfigHandle {
    ensure_initialized().expect("configuration initialization failed")
}

/// Returns the configured Sheets client, if credentials have been provided.
pub fn sheets_client() -> Option<SheetsClient> {
    get().sheets()
}

/// Returns a clone of the shared reqwest HTTP client.
pub fn http_client() -> Client {
    get().http_client()
}

/// Returns the configured A1-notation source range.
pub fn spreadsheet_range() -> String {
    get().range().to_string()
}

/// Returns the anchor cells for the graded output columns.
pub fn output_layout() -> OutputLayout {
    get().layout().clone()
}
