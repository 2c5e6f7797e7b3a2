use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "candidates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub public_id: String,

    pub first_name: String,
    pub last_name: String,

    #[sea_orm(has_many, via = "candidate_interview")]
    pub interviews: HasMany<super::interview::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
