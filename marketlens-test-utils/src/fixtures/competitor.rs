//! Competitor fixtures.

use chrono::Utc;
use entity::sea_orm_active_enums::TrendStatus;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, model::CompetitorModel, TestContext};

impl TestContext {
    pub fn competitor(&self) -> CompetitorFixtures<'_> {
        CompetitorFixtures { setup: self }
    }
}

pub struct CompetitorFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> CompetitorFixtures<'a> {
    /// Insert a stable competitor priced 10.00-20.00 with a 5.00 market share.
    pub async fn insert_mock_competitor(&self, name: &str) -> Result<CompetitorModel, TestError> {
        self.insert_competitor(
            name,
            Decimal::new(1000, 2),
            Decimal::new(2000, 2),
            Decimal::new(500, 2),
            TrendStatus::Stable,
        )
        .await
    }

    /// Insert a competitor with explicit pricing, share and trend values and no owner.
    pub async fn insert_competitor(
        &self,
        name: &str,
        price_range_min: Decimal,
        price_range_max: Decimal,
        market_share: Decimal,
        trend_status: TrendStatus,
    ) -> Result<CompetitorModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Competitor::insert(entity::competitor::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                category: ActiveValue::Set("Technology".to_string()),
                price_range_min: ActiveValue::Set(price_range_min),
                price_range_max: ActiveValue::Set(price_range_max),
                market_share: ActiveValue::Set(market_share),
                trend_status: ActiveValue::Set(trend_status),
                created_by: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a competitor owned by the given user.
    pub async fn insert_competitor_owned_by(
        &self,
        name: &str,
        user_id: i32,
    ) -> Result<CompetitorModel, TestError> {
        let competitor = self.insert_mock_competitor(name).await?;

        Ok(
            entity::prelude::Competitor::update(entity::competitor::ActiveModel {
                id: ActiveValue::Unchanged(competitor.id),
                created_by: ActiveValue::Set(Some(user_id)),
                ..Default::default()
            })
            .exec(&self.setup.db)
            .await?,
        )
    }
}
