
use entity::sea_orm_active_enums::UserRole;
use marketlens_test_utils::prelude::*;
use sea_orm::EntityTrait;

use crate::server::{
    error::Error, service::user::UserService, util::test::TestContextExt,
};
