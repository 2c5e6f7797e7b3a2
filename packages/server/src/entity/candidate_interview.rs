use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Assignment of a candidate to an interview.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "candidate_interviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub candidate_id: i32,
    #[sea_orm(primary_key)]
    pub interview_id: i32,
    #[sea_orm(belongs_to, from = "candidate_id", to = "id")]
    pub candidate: BelongsTo<super::candidate::Entity>,
    #[sea_orm(belongs_to, from = "interview_id", to = "id")]
    pub interview: BelongsTo<super::interview::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
