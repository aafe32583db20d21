use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::pricing::{CreatePricingDataDto, PricingDataDto},
    server::{
        data::{competitor::CompetitorRepository, pricing::PricingRepository},
        error::{validation::FieldErrors, Error},
        model::db::PricingDataModel,
        service::{competitor::check_price, dashboard::round_money, retry::RetryContext},
    },
};

pub const DEFAULT_PRICING_LIMIT: u64 = 30;
pub const MAX_PRICING_LIMIT: u64 = 1000;

impl From<PricingDataModel> for PricingDataDto {
    fn from(p: PricingDataModel) -> Self {
        Self {
            id: p.id,
            competitor_id: p.competitor_id,
            price: p.price,
            recorded_at: p.recorded_at,
        }
    }
}

/// Interpret a raw `limit` query value: 30 when missing, invalid or not positive, capped at 1000.
pub fn resolve_limit(raw: Option<&str>) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|limit| *limit > 0)
        .map(|limit| limit.min(MAX_PRICING_LIMIT))
        .unwrap_or(DEFAULT_PRICING_LIMIT)
}

pub struct PricingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PricingService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Record a price observation for an existing competitor
    ///
    /// # Returns
    /// - `Ok(PricingDataDto)` - The stored observation
    /// - `Err(Error::ValidationError)` - Price is negative or too large to store
    /// - `Err(Error::NotFound)` - Competitor does not exist
    pub async fn create(&self, dto: CreatePricingDataDto) -> Result<PricingDataDto, Error> {
        let price = round_money(dto.price);

        let mut errors = FieldErrors::new();
        check_price(&mut errors, "price", price);
        errors.into_result()?;

        if CompetitorRepository::new(self.db)
            .get_by_id(dto.competitor_id)
            .await?
            .is_none()
        {
            return Err(Error::NotFound(format!("Competitor {}", dto.competitor_id)));
        }

        let recorded_at = dto.recorded_at.unwrap_or_else(|| Utc::now().naive_utc());

        let pricing = PricingRepository::new(self.db)
            .create(dto.competitor_id, price, recorded_at)
            .await?;

        Ok(pricing.into())
    }

    /// Up to `limit` observations for a competitor, most recent first
    ///
    /// An unknown competitor simply has no observations.
    pub async fn get_for_competitor(
        &self,
        competitor_id: i32,
        limit: u64,
    ) -> Result<Vec<PricingDataDto>, Error> {
        let db = self.db.clone();

        let observations = RetryContext::new()
            .execute_with_retry(
                &format!("pricing for competitor ID {}", competitor_id),
                || {
                    let db = db.clone();

                    Box::pin(async move {
                        Ok(PricingRepository::new(&db)
                            .get_recent_for_competitor(competitor_id, limit)
                            .await?)
                    })
                },
            )
            .await?;

        Ok(observations.into_iter().map(PricingDataDto::from).collect())
    }
}
