pub use sea_orm_migration::prelude::*;

mod m20260301_000001_marketlens_user;
mod m20260301_000002_competitor;
mod m20260301_000003_pricing_data;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_marketlens_user::Migration),
            Box::new(m20260301_000002_competitor::Migration),
            Box::new(m20260301_000003_pricing_data::Migration),
        ]
    }
}
