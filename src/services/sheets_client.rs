// src/services/sheets_client.rs
// DOCUMENTATION: Google Sheets export client
// PURPOSE: Locate the review spreadsheet and append one row per call

use crate::config::Config;
use crate::errors::ReviewsError;
use crate::models::ExportRow;
use crate::services::ports::ExportSink;
use crate::services::service_account::ServiceAccountAuth;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::OnceCell;

const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4";
const DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";
const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

/// Where rows go, as configured
#[derive(Debug, Clone)]
pub struct SheetTarget {
    pub spreadsheet_id: Option<String>,
    pub spreadsheet_name: String,
    pub worksheet_name: Option<String>,
}

impl SheetTarget {
    pub fn from_config(config: &Config) -> Self {
        Self {
            spreadsheet_id: config.spreadsheet_id.clone(),
            spreadsheet_name: config.spreadsheet_name.clone(),
            worksheet_name: config.worksheet_name.clone(),
        }
    }
}

/// Where rows go, after lookups
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSheet {
    pub spreadsheet_id: String,
    pub worksheet: String,
}

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

/// Google Sheets client
/// DOCUMENTATION: The spreadsheet and worksheet are resolved on first export
/// and reused for the lifetime of the process
pub struct SheetsClient {
    client: Client,
    auth: ServiceAccountAuth,
    target: SheetTarget,
    sheets_base_url: String,
    drive_base_url: String,
    resolved: OnceCell<ResolvedSheet>,
}

impl SheetsClient {
    pub fn new(client: Client, auth: ServiceAccountAuth, target: SheetTarget) -> Self {
        Self {
            client,
            auth,
            target,
            sheets_base_url: SHEETS_BASE_URL.to_string(),
            drive_base_url: DRIVE_BASE_URL.to_string(),
            resolved: OnceCell::new(),
        }
    }

    /// Point the client at different Sheets and Drive hosts (used by tests and proxies)
    pub fn with_base_urls(
        mut self,
        sheets_base_url: impl Into<String>,
        drive_base_url: impl Into<String>,
    ) -> Self {
        self.sheets_base_url = sheets_base_url.into().trim_end_matches('/').to_string();
        self.drive_base_url = drive_base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Resolve spreadsheet id and worksheet title once
    async fn resolve(&self, token: &str) -> Result<&ResolvedSheet, ReviewsError> {
        self.resolved
            .get_or_try_init(|| async move {
                let spreadsheet_id = match &self.target.spreadsheet_id {
                    Some(id) => id.clone(),
                    None => self.find_spreadsheet(token).await?,
                };

                let worksheet = match &self.target.worksheet_name {
                    Some(name) => name.clone(),
                    None => self.first_worksheet(token, &spreadsheet_id).await?,
                };

                log::info!(
                    "Exporting to spreadsheet {} worksheet '{}'",
                    spreadsheet_id,
                    worksheet
                );

                Ok::<_, ReviewsError>(ResolvedSheet {
                    spreadsheet_id,
                    worksheet,
                })
            })
            .await
    }

    /// Find the spreadsheet shared with the service account by its title
    async fn find_spreadsheet(&self, token: &str) -> Result<String, ReviewsError> {
        let request = drive_lookup_request(
            &self.client,
            &self.drive_base_url,
            &self.target.spreadsheet_name,
            token,
        );
        let list: DriveFileList = send_json(request, "drive lookup").await?;

        list.files.into_iter().next().map(|f| f.id).ok_or_else(|| {
            ReviewsError::Configuration(format!(
                "Spreadsheet '{}' not found or not shared with {}",
                self.target.spreadsheet_name,
                self.auth.client_email()
            ))
        })
    }

    /// Title of the spreadsheet's first worksheet
    async fn first_worksheet(
        &self,
        token: &str,
        spreadsheet_id: &str,
    ) -> Result<String, ReviewsError> {
        let url = spreadsheet_url(&self.sheets_base_url, &[spreadsheet_id])?;
        let request = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(&[("fields", "sheets.properties.title")]);
        let metadata: SpreadsheetMetadata = send_json(request, "spreadsheet metadata").await?;

        metadata
            .sheets
            .into_iter()
            .next()
            .map(|s| s.properties.title)
            .ok_or_else(|| {
                ReviewsError::Configuration(format!(
                    "Spreadsheet {} has no worksheets",
                    spreadsheet_id
                ))
            })
    }
}

#[async_trait]
impl ExportSink for SheetsClient {
    async fn append_row(&self, row: &ExportRow) -> Result<(), ReviewsError> {
        let token = self.auth.access_token().await?;
        let sheet = self.resolve(&token).await?;

        let request = append_request(&self.client, &self.sheets_base_url, sheet, &token, row)?;
        let response = request.send().await.map_err(|e| {
            log::error!("Sheets append request failed: {}", e);
            ReviewsError::UpstreamUnavailable("sheets append request failed".to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        if status == StatusCode::UNAUTHORIZED {
            self.auth.invalidate().await;
        }
        let body = response.text().await.unwrap_or_default();
        log::error!("Sheets append error {}: {}", status, body);
        Err(ReviewsError::UpstreamUnavailable(format!(
            "sheets append returned HTTP {}",
            status
        )))
    }
}

/// Send a request once and decode its JSON body
async fn send_json<T: serde::de::DeserializeOwned>(
    request: RequestBuilder,
    endpoint: &str,
) -> Result<T, ReviewsError> {
    let response = request.send().await.map_err(|e| {
        log::error!("Google {} request failed: {}", endpoint, e);
        ReviewsError::UpstreamUnavailable(format!("{} request failed", endpoint))
    })?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log::error!("Google {} error {}: {}", endpoint, status, body);
        return Err(ReviewsError::UpstreamUnavailable(format!(
            "{} returned HTTP {}",
            endpoint, status
        )));
    }

    response
        .json()
        .await
        .map_err(|e| ReviewsError::MalformedUpstreamResponse(format!("{}: {}", endpoint, e)))
}

/// `{base}/spreadsheets/{segments...}` with each segment percent-encoded
fn spreadsheet_url(base: &str, segments: &[&str]) -> Result<Url, ReviewsError> {
    let mut url = Url::parse(base)
        .map_err(|e| ReviewsError::Configuration(format!("Sheets base URL: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| ReviewsError::Configuration("Sheets base URL cannot be a base".to_string()))?
        .pop_if_empty()
        .push("spreadsheets")
        .extend(segments);
    Ok(url)
}

/// A1 range addressing the first cell of a worksheet
/// DOCUMENTATION: Titles are quoted so spaces and punctuation are safe
pub fn a1_range(worksheet: &str) -> String {
    format!("'{}'!A1", worksheet.replace('\'', "''"))
}

/// Drive query matching a spreadsheet by exact title
pub fn drive_query(spreadsheet_name: &str) -> String {
    let escaped = spreadsheet_name.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        escaped, SPREADSHEET_MIME_TYPE
    )
}

fn drive_lookup_request(
    client: &Client,
    drive_base_url: &str,
    spreadsheet_name: &str,
    token: &str,
) -> RequestBuilder {
    client
        .get(format!("{}/files", drive_base_url))
        .bearer_auth(token)
        .query(&[
            ("q", drive_query(spreadsheet_name).as_str()),
            ("fields", "files(id,name)"),
            ("pageSize", "1"),
        ])
}

/// Build the values:append request for one row
/// DOCUMENTATION: Values are stored RAW so review text is never parsed as a
/// formula, date or number
pub fn append_request(
    client: &Client,
    sheets_base_url: &str,
    sheet: &ResolvedSheet,
    token: &str,
    row: &ExportRow,
) -> Result<RequestBuilder, ReviewsError> {
    let range = format!("{}:append", a1_range(&sheet.worksheet));
    let url = spreadsheet_url(
        sheets_base_url,
        &[sheet.spreadsheet_id.as_str(), "values", range.as_str()],
    )?;

    Ok(client
        .post(url)
        .bearer_auth(token)
        .query(&[
            ("valueInputOption", "RAW"),
            ("insertDataOption", "INSERT_ROWS"),
        ])
        .json(&json!({ "values": [row.to_cells()] })))
}
