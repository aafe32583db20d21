//! Bulk CSV ingestion.
//!
//! An upload is staged in a temporary file, decoded, split into rows and written one row at a
//! time through the same service calls interactive requests use. Problems with a single row are
//! collected as `Row <n>: <message>` strings; only storage outages and unreadable files abort
//! the batch.

pub mod csv;


use std::{collections::HashMap, io::Write, str::FromStr};

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tempfile::NamedTempFile;

use crate::{
    model::{
        competitor::CreateCompetitorDto, pricing::CreatePricingDataDto, upload::IngestResultDto,
    },
    server::{
        data::competitor::CompetitorRepository,
        error::{
            ingest::IngestError,
            validation::{FieldErrors, ValidationError},
            Error,
        },
        service::{
            competitor::CompetitorService,
            ingest::csv::{parse_csv, parse_recorded_at, parse_trend_status, RowMap},
            pricing::PricingService,
        },
    },
};

/// Largest accepted upload, larger request bodies are refused before parsing.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
/// Number of row errors returned to the client.
pub const MAX_REPORTED_ERRORS: usize = 10;

const DEFAULT_CATEGORY: &str = "Technology";
const DEFAULT_PRICE_RANGE_MIN: Decimal = Decimal::ZERO;
const DEFAULT_PRICE_RANGE_MAX: Decimal = Decimal::ONE_HUNDRED;

/// Kind of record a bulk upload contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadRecordType {
    Competitors,
    Pricing,
}

impl FromStr for UploadRecordType {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "competitors" => Ok(Self::Competitors),
            "pricing" => Ok(Self::Pricing),
            _ => Err(IngestError::UnsupportedRecordType(s.to_string())),
        }
    }
}

/// Write the uploaded bytes to a temporary file, removed when the handle is dropped.
fn stage_upload(bytes: &[u8]) -> Result<NamedTempFile, IngestError> {
    let mut staged = NamedTempFile::new()?;
    staged.write_all(bytes)?;
    staged.flush()?;

    Ok(staged)
}

fn read_staged(staged: &NamedTempFile) -> Result<String, IngestError> {
    match std::fs::read_to_string(staged.path()) {
        Ok(raw) => Ok(raw),
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => Err(IngestError::UnreadableFile),
        Err(e) => Err(e.into()),
    }
}

/// Optional decimal cell, a present value which does not parse is a field error.
fn decimal_cell(errors: &mut FieldErrors, row: &RowMap, keys: &[&str]) -> Option<Decimal> {
    let raw = row.first_of(keys)?;

    match Decimal::from_str(raw) {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(keys[0], format!("\"{}\" is not a valid number", raw));
            None
        }
    }
}

/// Client-facing message for a failed row.
fn row_message(err: &Error) -> String {
    match err {
        Error::ValidationError(ValidationError::InvalidFields(fields)) => fields
            .iter()
            .map(|e| format!("{} {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; "),
        Error::NotFound(_) | Error::InvalidOperation(_) => err.to_string(),
        _ => "Failed to save row".to_string(),
    }
}

pub struct IngestService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> IngestService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stage, decode and ingest an uploaded file
    ///
    /// # Returns
    /// - `Ok(IngestResultDto)` - The pipeline ran to completion, row errors included
    /// - `Err(Error::IngestError)` - File too large, not UTF-8, empty or could not be staged
    /// - `Err(Error::StorageUnavailable)` - The database went away mid-batch
    pub async fn ingest_upload(
        &self,
        bytes: &[u8],
        record_type: UploadRecordType,
        acting_user_id: i32,
    ) -> Result<IngestResultDto, Error> {
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(IngestError::PayloadTooLarge.into());
        }

        let staged = stage_upload(bytes)?;
        let raw = read_staged(&staged)?;

        let result = self.ingest(&raw, record_type, acting_user_id).await;

        if let Err(e) = staged.close() {
            tracing::warn!("Failed to remove staged upload: {}", e);
        }

        result
    }

    /// Ingest CSV text, returning how many rows were written and the first row errors
    pub async fn ingest(
        &self,
        raw: &str,
        record_type: UploadRecordType,
        acting_user_id: i32,
    ) -> Result<IngestResultDto, Error> {
        let table = parse_csv(raw)?;
        let total_rows = table.rows.len();

        let competitor_ids = match record_type {
            UploadRecordType::Competitors => HashMap::new(),
            UploadRecordType::Pricing => self.competitor_ids_by_name().await?,
        };

        let mut records_processed = 0;
        let mut errors = Vec::new();

        for (index, row) in table.rows.iter().enumerate() {
            // Header is row 1
            let row_number = index + 2;

            let outcome = match record_type {
                UploadRecordType::Competitors => {
                    self.ingest_competitor(row, acting_user_id).await
                }
                UploadRecordType::Pricing => self.ingest_pricing(row, &competitor_ids).await,
            };

            match outcome {
                Ok(()) => records_processed += 1,
                Err(e @ Error::StorageUnavailable(_)) => {
                    tracing::error!(row = %row_number, "Aborting bulk upload: {}", e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::debug!(row = %row_number, "Skipping row: {}", e);
                    errors.push(format!("Row {}: {}", row_number, row_message(&e)));
                }
            }
        }

        tracing::info!(
            record_type = ?record_type,
            user_id = %acting_user_id,
            records_processed = %records_processed,
            total_rows = %total_rows,
            failed_rows = %errors.len(),
            "Bulk upload processed"
        );

        errors.truncate(MAX_REPORTED_ERRORS);

        Ok(IngestResultDto {
            records_processed,
            total_rows,
            errors,
            success: true,
        })
    }

    /// Lower-cased competitor names mapped to IDs, the lowest ID wins on duplicates
    async fn competitor_ids_by_name(&self) -> Result<HashMap<String, i32>, Error> {
        let mut ids = HashMap::new();

        for (id, name) in CompetitorRepository::new(self.db).get_names().await? {
            ids.entry(name.to_lowercase()).or_insert(id);
        }

        Ok(ids)
    }

    async fn ingest_competitor(&self, row: &RowMap, acting_user_id: i32) -> Result<(), Error> {
        let mut errors = FieldErrors::new();

        let price_range_min =
            decimal_cell(&mut errors, row, &["price_range_min", "pricerangemin", "min_price"]);
        let price_range_max =
            decimal_cell(&mut errors, row, &["price_range_max", "pricerangemax", "max_price"]);
        let market_share = decimal_cell(&mut errors, row, &["market_share", "marketshare"]);

        errors.into_result()?;

        let dto = CreateCompetitorDto {
            name: row.get("name").unwrap_or_default().to_string(),
            category: row
                .first_of(&["industry", "category"])
                .unwrap_or(DEFAULT_CATEGORY)
                .to_string(),
            price_range_min: price_range_min.unwrap_or(DEFAULT_PRICE_RANGE_MIN),
            price_range_max: price_range_max.unwrap_or(DEFAULT_PRICE_RANGE_MAX),
            market_share: market_share.unwrap_or(Decimal::ZERO),
            trend_status: Some(parse_trend_status(
                row.first_of(&["trend_status", "trendstatus", "trend"]),
            )),
        };

        CompetitorService::new(self.db)
            .create(dto, Some(acting_user_id))
            .await?;

        Ok(())
    }

    async fn ingest_pricing(
        &self,
        row: &RowMap,
        competitor_ids: &HashMap<String, i32>,
    ) -> Result<(), Error> {
        let mut errors = FieldErrors::new();
        let name = row.get("competitor");
        if name.is_none() {
            errors.push("competitor", "is required");
        }
        errors.into_result()?;
        let name = name.unwrap_or_default();

        let Some(&competitor_id) = competitor_ids.get(&name.to_lowercase()) else {
            return Err(Error::NotFound(format!("Competitor \"{}\"", name)));
        };

        let price = row
            .get("price")
            .and_then(|raw| Decimal::from_str(raw).ok())
            .unwrap_or(Decimal::ZERO);
        let recorded_at = row
            .first_of(&["date", "recorded_at"])
            .and_then(parse_recorded_at);

        PricingService::new(self.db)
            .create(CreatePricingDataDto {
                competitor_id,
                price,
                recorded_at,
            })
            .await?;

        Ok(())
    }
}
