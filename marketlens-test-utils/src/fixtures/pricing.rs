//! Pricing observation fixtures.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, model::PricingDataModel, TestContext};

impl TestContext {
    pub fn pricing(&self) -> PricingFixtures<'_> {
        PricingFixtures { setup: self }
    }
}

pub struct PricingFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> PricingFixtures<'a> {
    /// Insert a pricing observation recorded at the provided UTC timestamp.
    pub async fn insert_pricing(
        &self,
        competitor_id: i32,
        price: Decimal,
        recorded_at: NaiveDateTime,
    ) -> Result<PricingDataModel, TestError> {
        Ok(
            entity::prelude::PricingData::insert(entity::pricing_data::ActiveModel {
                competitor_id: ActiveValue::Set(competitor_id),
                price: ActiveValue::Set(price),
                recorded_at: ActiveValue::Set(recorded_at),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
