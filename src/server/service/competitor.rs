//! Competitor CRUD with validation.
//!
//! Interactive requests and bulk ingestion both create competitors through
//! [`CompetitorService::create`] so they share the same validation rules.

use entity::sea_orm_active_enums::TrendStatus;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::competitor::{CompetitorDto, CreateCompetitorDto, UpdateCompetitorDto},
    server::{
        data::{
            competitor::{CompetitorRepository, CompetitorValues},
            pricing::PricingRepository,
        },
        error::{
            validation::{FieldErrors, ValidationError},
            Error,
        },
        model::db::CompetitorModel,
        service::{dashboard::round_money, retry::RetryContext},
    },
};

const MAX_NAME_LENGTH: usize = 255;

/// Largest amount a `DECIMAL(12, 2)` price column holds, `9999999999.99`.
pub const MAX_PRICE: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, 2);

impl From<CompetitorModel> for CompetitorDto {
    fn from(c: CompetitorModel) -> Self {
        Self {
            id: c.id,
            name: c.name,
            category: c.category,
            price_range_min: c.price_range_min,
            price_range_max: c.price_range_max,
            market_share: c.market_share,
            trend_status: c.trend_status,
            created_by: c.created_by,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Record a field error unless `price` fits between zero and [`MAX_PRICE`].
pub fn check_price(errors: &mut FieldErrors, field: &str, price: Decimal) {
    if price < Decimal::ZERO {
        errors.push(field, "must not be negative");
    } else if price > MAX_PRICE {
        errors.push(field, format!("must be at most {}", MAX_PRICE));
    }
}

/// Trim text, round decimals to 2 places and check every field.
///
/// All field errors are reported together, keyed by their request body names.
pub fn validate_competitor(values: CompetitorValues) -> Result<CompetitorValues, ValidationError> {
    let values = CompetitorValues {
        name: values.name.trim().to_string(),
        category: values.category.trim().to_string(),
        price_range_min: round_money(values.price_range_min),
        price_range_max: round_money(values.price_range_max),
        market_share: round_money(values.market_share),
        trend_status: values.trend_status,
    };

    let mut errors = FieldErrors::new();

    if values.name.is_empty() {
        errors.push("name", "is required");
    } else if values.name.chars().count() > MAX_NAME_LENGTH {
        errors.push(
            "name",
            format!("must be at most {} characters", MAX_NAME_LENGTH),
        );
    }

    if values.category.is_empty() {
        errors.push("category", "is required");
    }

    check_price(&mut errors, "priceRangeMin", values.price_range_min);
    check_price(&mut errors, "priceRangeMax", values.price_range_max);
    if values.price_range_min > values.price_range_max {
        errors.push("priceRangeMin", "must not exceed priceRangeMax");
    }

    if values.market_share < Decimal::ZERO || values.market_share > Decimal::ONE_HUNDRED {
        errors.push("marketShare", "must be between 0 and 100");
    }

    errors.into_result()?;

    Ok(values)
}

pub struct CompetitorService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CompetitorService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// All competitors, newest first
    pub async fn get_all(&self) -> Result<Vec<CompetitorDto>, Error> {
        let db = self.db.clone();

        let competitors = RetryContext::new()
            .execute_with_retry("list competitors", || {
                let db = db.clone();

                Box::pin(async move { Ok(CompetitorRepository::new(&db).get_all().await?) })
            })
            .await?;

        Ok(competitors.into_iter().map(CompetitorDto::from).collect())
    }

    pub async fn get(&self, competitor_id: i32) -> Result<CompetitorDto, Error> {
        let competitor = CompetitorRepository::new(self.db)
            .get_by_id(competitor_id)
            .await?
            .ok_or_else(|| not_found(competitor_id))?;

        Ok(competitor.into())
    }

    /// Validate and insert a competitor owned by `created_by`
    pub async fn create(
        &self,
        dto: CreateCompetitorDto,
        created_by: Option<i32>,
    ) -> Result<CompetitorDto, Error> {
        let values = validate_competitor(CompetitorValues {
            name: dto.name,
            category: dto.category,
            price_range_min: dto.price_range_min,
            price_range_max: dto.price_range_max,
            market_share: dto.market_share,
            trend_status: dto.trend_status.unwrap_or(TrendStatus::Stable),
        })?;

        let competitor = CompetitorRepository::new(self.db)
            .create(values, created_by)
            .await?;

        Ok(competitor.into())
    }

    /// Merge the provided fields into the stored competitor and validate the result as a whole
    pub async fn update(
        &self,
        competitor_id: i32,
        dto: UpdateCompetitorDto,
    ) -> Result<CompetitorDto, Error> {
        let competitor_repo = CompetitorRepository::new(self.db);

        let existing = competitor_repo
            .get_by_id(competitor_id)
            .await?
            .ok_or_else(|| not_found(competitor_id))?;

        let values = validate_competitor(CompetitorValues {
            name: dto.name.unwrap_or(existing.name),
            category: dto.category.unwrap_or(existing.category),
            price_range_min: dto.price_range_min.unwrap_or(existing.price_range_min),
            price_range_max: dto.price_range_max.unwrap_or(existing.price_range_max),
            market_share: dto.market_share.unwrap_or(existing.market_share),
            trend_status: dto.trend_status.unwrap_or(existing.trend_status),
        })?;

        let competitor = competitor_repo
            .update(competitor_id, values)
            .await?
            .ok_or_else(|| not_found(competitor_id))?;

        Ok(competitor.into())
    }

    /// Delete a competitor and its pricing observations in one transaction
    pub async fn delete(&self, competitor_id: i32) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        let removed_prices = PricingRepository::new(&txn)
            .delete_for_competitor(competitor_id)
            .await?;
        let result = CompetitorRepository::new(&txn)
            .delete(competitor_id)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(not_found(competitor_id));
        }

        txn.commit().await?;

        tracing::info!(
            competitor_id = %competitor_id,
            pricing_rows = %removed_prices.rows_affected,
            "Deleted competitor"
        );

        Ok(())
    }
}

fn not_found(competitor_id: i32) -> Error {
    Error::NotFound(format!("Competitor {}", competitor_id))
}

#[cfg(test)]
mod tests {
    mod into_dto {
        use entity::sea_orm_active_enums::TrendStatus;
        use marketlens_test_utils::prelude::*;

        use crate::model::competitor::CompetitorDto;

        #[test]
        fn copies_every_field() {
            let model = factory::mock_competitor_model(3, "Acme", TrendStatus::Declining);

            let dto = CompetitorDto::from(model.clone());

            assert_eq!(dto.id, 3);
            assert_eq!(dto.name, "Acme");
            assert_eq!(dto.price_range_max, model.price_range_max);
            assert_eq!(dto.trend_status, TrendStatus::Declining);
            assert_eq!(dto.created_by, None);
        }
    }

    mod validate {
        use entity::sea_orm_active_enums::TrendStatus;
        use rust_decimal::Decimal;

        use crate::server::{
            data::competitor::CompetitorValues,
            service::competitor::{validate_competitor, MAX_PRICE},
        };

        fn values() -> CompetitorValues {
            CompetitorValues {
                name: "  Acme  ".to_string(),
                category: "Retail".to_string(),
                price_range_min: Decimal::new(10005, 3),
                price_range_max: Decimal::new(20, 0),
                market_share: Decimal::new(50, 0),
                trend_status: TrendStatus::Stable,
            }
        }

        /// Expect trimmed text and 2-place decimals
        #[test]
        fn normalizes_valid_values() {
            let result = validate_competitor(values()).unwrap();

            assert_eq!(result.name, "Acme");
            assert_eq!(result.price_range_min, Decimal::new(1001, 2));
        }

        #[test]
        fn rejects_blank_name() {
            let err = validate_competitor(CompetitorValues {
                name: "   ".to_string(),
                ..values()
            })
            .unwrap_err();

            assert_eq!(err.field_errors()[0].field, "name");
        }

        #[test]
        fn max_price_matches_column_precision() {
            assert_eq!(MAX_PRICE, Decimal::new(999_999_999_999, 2));
            assert_eq!(MAX_PRICE.to_string(), "9999999999.99");
        }

        /// Expect prices beyond the column precision to be a field error
        #[test]
        fn rejects_price_above_column_range() {
            let err = validate_competitor(CompetitorValues {
                price_range_max: Decimal::new(10_000_000_000, 0),
                ..values()
            })
            .unwrap_err();

            assert_eq!(err.field_errors().len(), 1);
            assert_eq!(err.field_errors()[0].field, "priceRangeMax");
            assert_eq!(
                err.field_errors()[0].message,
                "must be at most 9999999999.99"
            );
        }

        /// Expect the largest storable price to be accepted
        #[test]
        fn accepts_max_price() {
            let result = validate_competitor(CompetitorValues {
                price_range_max: MAX_PRICE,
                ..values()
            })
            .unwrap();

            assert_eq!(result.price_range_max, MAX_PRICE);
        }

        #[test]
        fn rejects_inverted_range() {
            let err = validate_competitor(CompetitorValues {
                price_range_min: Decimal::new(30, 0),
                ..values()
            })
            .unwrap_err();

            assert_eq!(err.field_errors()[0].field, "priceRangeMin");
        }

        /// Expect every invalid field to be reported at once
        #[test]
        fn reports_all_invalid_fields() {
            let err = validate_competitor(CompetitorValues {
                name: String::new(),
                category: String::new(),
                price_range_min: Decimal::new(-1, 0),
                price_range_max: Decimal::new(10, 0),
                market_share: Decimal::new(101, 0),
                trend_status: TrendStatus::Growing,
            })
            .unwrap_err();

            let fields: Vec<&str> = err
                .field_errors()
                .iter()
                .map(|e| e.field.as_str())
                .collect();
            assert_eq!(
                fields,
                vec!["name", "category", "priceRangeMin", "marketShare"]
            );
        }

        #[test]
        fn accepts_share_bounds() {
            for share in [Decimal::ZERO, Decimal::ONE_HUNDRED] {
                let result = validate_competitor(CompetitorValues {
                    market_share: share,
                    ..values()
                });
                assert!(result.is_ok());
            }
        }
    }

    mod create {
        use entity::sea_orm_active_enums::{TrendStatus, UserRole};
        use marketlens_test_utils::prelude::*;
        use rust_decimal::Decimal;

        use crate::{
            model::competitor::CreateCompetitorDto,
            server::{error::Error, service::competitor::CompetitorService},
        };

        pub(super) fn dto(name: &str) -> CreateCompetitorDto {
            CreateCompetitorDto {
                name: name.to_string(),
                category: "SaaS".to_string(),
                price_range_min: Decimal::new(10, 0),
                price_range_max: Decimal::new(20, 0),
                market_share: Decimal::new(5, 0),
                trend_status: None,
            }
        }

        /// Expect a stable competitor owned by the acting user
        #[tokio::test]
        async fn creates_competitor() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;
            let user = test.user().insert_user("analyst", UserRole::Analyst).await?;

            let result = CompetitorService::new(&test.db)
                .create(dto("Acme"), Some(user.id))
                .await
                .unwrap();

            assert_eq!(result.trend_status, TrendStatus::Stable);
            assert_eq!(result.created_by, Some(user.id));

            Ok(())
        }

        /// Expect a validation error and nothing stored for invalid input
        #[tokio::test]
        async fn fails_validation() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;

            let service = CompetitorService::new(&test.db);
            let result = service
                .create(
                    CreateCompetitorDto {
                        market_share: Decimal::new(150, 0),
                        ..dto("Acme")
                    },
                    None,
                )
                .await;

            assert!(matches!(result, Err(Error::ValidationError(_))));
            assert!(service.get_all().await.unwrap().is_empty());

            Ok(())
        }
    }

    mod update {
        use entity::sea_orm_active_enums::TrendStatus;
        use marketlens_test_utils::prelude::*;
        use rust_decimal::Decimal;

        use crate::{
            model::competitor::UpdateCompetitorDto,
            server::{error::Error, service::competitor::CompetitorService},
        };

        /// Expect provided fields changed and the rest kept
        #[tokio::test]
        async fn applies_partial_update() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;
            let competitor = test.competitor().insert_mock_competitor("Acme").await?;

            let result = CompetitorService::new(&test.db)
                .update(
                    competitor.id,
                    UpdateCompetitorDto {
                        trend_status: Some(TrendStatus::Declining),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();

            assert_eq!(result.trend_status, TrendStatus::Declining);
            assert_eq!(result.name, "Acme");
            assert_eq!(result.price_range_min, competitor.price_range_min);

            Ok(())
        }

        /// Expect the merged record to be validated, min above the stored max fails
        #[tokio::test]
        async fn validates_merged_values() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;
            let competitor = test.competitor().insert_mock_competitor("Acme").await?;

            let result = CompetitorService::new(&test.db)
                .update(
                    competitor.id,
                    UpdateCompetitorDto {
                        price_range_min: Some(Decimal::new(50, 0)),
                        ..Default::default()
                    },
                )
                .await;

            assert!(matches!(result, Err(Error::ValidationError(_))));

            Ok(())
        }

        #[tokio::test]
        async fn fails_for_nonexistent_competitor() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;

            let result = CompetitorService::new(&test.db)
                .update(8, UpdateCompetitorDto::default())
                .await;

            assert!(matches!(result, Err(Error::NotFound(_))));

            Ok(())
        }
    }

    mod delete {
        use chrono::Utc;
        use entity::prelude::PricingData;
        use marketlens_test_utils::prelude::*;
        use rust_decimal::Decimal;
        use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

        use crate::server::{error::Error, service::competitor::CompetitorService};

        /// Expect no pricing rows to reference a deleted competitor
        #[tokio::test]
        async fn deletes_competitor_and_pricing() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;
            let acme = test.competitor().insert_mock_competitor("Acme").await?;
            let globex = test.competitor().insert_mock_competitor("Globex").await?;
            let now = Utc::now().naive_utc();
            test.pricing()
                .insert_pricing(acme.id, Decimal::new(1, 0), now)
                .await?;
            test.pricing()
                .insert_pricing(globex.id, Decimal::new(2, 0), now)
                .await?;

            let service = CompetitorService::new(&test.db);
            service.delete(acme.id).await.unwrap();

            let orphaned = PricingData::find()
                .filter(entity::pricing_data::Column::CompetitorId.eq(acme.id))
                .count(&test.db)
                .await?;
            assert_eq!(orphaned, 0);
            assert_eq!(PricingData::find().count(&test.db).await?, 1);
            assert!(matches!(service.get(acme.id).await, Err(Error::NotFound(_))));

            Ok(())
        }

        #[tokio::test]
        async fn fails_for_nonexistent_competitor() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;

            let result = CompetitorService::new(&test.db).delete(12).await;

            assert!(matches!(result, Err(Error::NotFound(_))));

            Ok(())
        }
    }
}
