use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "interviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub public_id: String,

    /// Last persisted result document: `{questions, score}`.
    /// NULL until the interview is scored for the first time.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub results: Option<serde_json::Value>,

    #[sea_orm(has_many, via = "candidate_interview")]
    pub candidates: HasMany<super::candidate::Entity>,

    #[sea_orm(has_many, via = "interview_question")]
    pub questions: HasMany<super::question::Entity>,

    #[sea_orm(has_many)]
    pub videos: HasMany<super::video::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
