//! Declarative test builder.
//!
//! `TestBuilder` queues table creation, fixtures and mock endpoints, all executed during the
//! final `build()` call.

use entity::sea_orm_active_enums::UserRole;
use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::app_tables, error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_app_tables: bool,

    // Database fixtures to insert
    users: Vec<(String, UserRole)>,
    competitors: Vec<String>,

    // Mock endpoints to create
    mail_endpoints: Vec<(String, usize)>, // (recipient, expected_requests)
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables, fixtures, or mock endpoints configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_app_tables: false,
            users: Vec::new(),
            competitors: Vec::new(),
            mail_endpoints: Vec::new(),
        }
    }

    /// Create the user, competitor and pricing tables.
    pub fn with_tables(mut self) -> Self {
        self.include_app_tables = true;
        self
    }

    /// Add a single entity table to the test database.
    ///
    /// ```no_run
    /// use marketlens_test_utils::TestBuilder;
    ///
    /// # async fn example() -> Result<(), marketlens_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(entity::prelude::User)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a user with the given username and role.
    pub fn with_user(mut self, username: impl Into<String>, role: UserRole) -> Self {
        self.users.push((username.into(), role));
        self
    }

    /// Insert a stable competitor with default pricing.
    pub fn with_competitor(mut self, name: impl Into<String>) -> Self {
        self.competitors.push(name.into());
        self
    }

    /// Add a mail API send endpoint expecting messages to `recipient`.
    pub fn with_mail_endpoint(mut self, recipient: impl Into<String>, expected_requests: usize) -> Self {
        self.mail_endpoints.push((recipient.into(), expected_requests));
        self
    }

    /// Build the test context.
    ///
    /// Executes all queued operations in the following order:
    /// 1. Creates database tables
    /// 2. Inserts database fixtures (users, then competitors)
    /// 3. Creates mock mail API endpoints
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_app_tables {
            all_tables.extend(app_tables());
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert database fixtures
        for (username, role) in self.users {
            setup.user().insert_user(&username, role).await?;
        }

        for name in self.competitors {
            setup.competitor().insert_mock_competitor(&name).await?;
        }

        // 3. Create mock endpoints
        let mut mocks: Vec<Mock> = Vec::new();

        for (recipient, expected) in self.mail_endpoints {
            mocks.push(setup.mail().create_send_endpoint(&recipient, expected));
        }

        // Store mocks in setup so they live as long as the test
        setup.mocks = mocks;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
