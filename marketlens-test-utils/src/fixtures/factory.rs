//! Factory functions for in-memory database models.
//!
//! Pure functions returning models with standard test values, for unit tests that don't need
//! database interaction.

use chrono::{NaiveDateTime, Utc};
use entity::sea_orm_active_enums::{TrendStatus, UserRole};
use rust_decimal::Decimal;

use crate::{
    constant::TEST_PASSWORD_HASH,
    model::{CompetitorModel, PricingDataModel, UserModel},
};

/// Create a mock user model.
pub fn mock_user_model(id: i32, role: UserRole) -> UserModel {
    UserModel {
        id,
        username: format!("user{}", id),
        email: format!("user{}@example.com", id),
        password_hash: TEST_PASSWORD_HASH.to_string(),
        display_name: format!("User {}", id),
        role,
        is_active: true,
        password_change_required: false,
        created_at: Utc::now().naive_utc(),
        last_active_at: None,
    }
}

/// Create a mock competitor model priced 10.00-20.00 with a 5.00 market share.
pub fn mock_competitor_model(id: i32, name: &str, trend_status: TrendStatus) -> CompetitorModel {
    let now = Utc::now().naive_utc();

    CompetitorModel {
        id,
        name: name.to_string(),
        category: "Technology".to_string(),
        price_range_min: Decimal::new(1000, 2),
        price_range_max: Decimal::new(2000, 2),
        market_share: Decimal::new(500, 2),
        trend_status,
        created_by: None,
        created_at: now,
        updated_at: now,
    }
}

/// Create a mock pricing observation model.
pub fn mock_pricing_model(
    id: i32,
    competitor_id: i32,
    price: Decimal,
    recorded_at: NaiveDateTime,
) -> PricingDataModel {
    PricingDataModel {
        id,
        competitor_id,
        price,
        recorded_at,
    }
}
