use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use typed_builder::TypedBuilder;

/// How the spreadsheet service interprets written values. `USER_ENTERED`
/// coerces numeric strings into numbers, matching what a user typing into the
/// sheet would get.
const VALUE_INPUT_OPTION: &str = "USER_ENTERED";

/// Raw rectangular cell block returned by the `values.get` endpoint.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    /// Range the service resolved the request to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    /// Row-major or column-major orientation of `values`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,

    /// Cell values; the field is absent entirely when the range is empty.
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

/// One value block to write, anchored at a target cell in A1 notation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct ValueUpdate {
    /// Anchor cell (or range) the block starts at.
    pub range: String,

    /// Values to write, row-major. Numbers survive as numbers under
    /// `USER_ENTERED`.
    pub values: Vec<Vec<Value>>,
}

/// Body of a `values:batchUpdate` request.
#[derive(Serialize, Deserialize, Debug, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateRequest {
    /// How the service should interpret incoming values.
    #[builder(default = VALUE_INPUT_OPTION.to_string(), setter(into))]
    pub value_input_option: String,

    /// Blocks to write in a single call.
    pub data: Vec<ValueUpdate>,
}

/// Subset of the `values:batchUpdate` response this tool cares about.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateResponse {
    /// Total number of cells the service reports as updated.
    #[serde(default)]
    pub total_updated_cells: u64,
}

/// External collaborator contract for the course spreadsheet: fetch the raw
/// roster rows, write the graded columns back. Implemented by [`SheetsClient`]
/// for the real service and by in-memory fakes in tests.
#[allow(async_fn_in_trait)]
pub trait SheetsGateway {
    /// Returns every row of the configured range, in sheet order.
    async fn fetch_rows(&self) -> Result<Vec<Vec<String>>>;

    /// Writes all blocks in a single batch call and returns how many cells
    /// the service updated.
    async fn write_rows(&self, updates: Vec<ValueUpdate>) -> Result<u64>;
}

/// reqwest-backed client for the two Sheets v4 REST calls this tool makes.
#[derive(Clone)]
pub struct SheetsClient {
    /// Shared HTTP client.
    client:         reqwest::Client,
    /// Base endpoint, overridable for proxies and tests.
    endpoint:       String,
    /// Target spreadsheet identifier.
    spreadsheet_id: String,
    /// A1-notation range holding the course block.
    range:          String,
    /// Bearer token sent with every request.
    access_token:   String,
}

impl SheetsClient {
    /// Creates a client for one spreadsheet and range.
    pub fn new(
        client: reqwest::Client,
        endpoint: String,
        spreadsheet_id: String,
        range: String,
        access_token: String,
    ) -> Self {
        Self {
            client,
            endpoint,
            spreadsheet_id,
            range,
            access_token,
        }
    }

    /// Retrieves the configured range from the spreadsheet service.
    pub async fn fetch_values(&self) -> Result<ValueRange> {
        let url = format!(
            "{}/spreadsheets/{}/values/{}",
            self.endpoint, self.spreadsheet_id, self.range
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .context("Failed to call the spreadsheet service")?
            .error_for_status()
            .context("Spreadsheet service returned error status")?;

        response
            .json()
            .await
            .context("Failed to deserialize spreadsheet values")
    }

    /// Writes one or more value blocks in a single batch call.
    pub async fn batch_update(&self, request: &BatchUpdateRequest) -> Result<BatchUpdateResponse> {
        let url = format!(
            "{}/spreadsheets/{}/values:batchUpdate",
            self.endpoint, self.spreadsheet_id
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(request)
            .send()
            .await
            .context("Failed to send spreadsheet updates")?
            .error_for_status()
            .context("Spreadsheet service rejected the update")?;

        response
            .json()
            .await
            .context("Failed to deserialize batch update response")
    }
}

impl SheetsGateway for SheetsClient {
    async fn fetch_rows(&self) -> Result<Vec<Vec<String>>> {
        Ok(self.fetch_values().await?.values)
    }

    async fn write_rows(&self, updates: Vec<ValueUpdate>) -> Result<u64> {
        let request = BatchUpdateRequest::builder().data(updates).build();
        let response = self.batch_update(&request).await?;
        Ok(response.total_updated_cells)
    }
}
