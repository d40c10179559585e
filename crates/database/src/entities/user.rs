use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per authenticated principal. Identity lives with the OIDC
/// provider; the only thing kept here is the selected-college pointer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// OIDC subject claim.
    #[sea_orm(primary_key, auto_increment = false)]
    pub subject: String,
    pub college_id: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
