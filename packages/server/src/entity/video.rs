use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Recorded answer for one question of one interview.
/// At most one row per `(interview_id, question_id)`; a new upload replaces the path.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "videos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub public_id: String,

    #[sea_orm(unique_key = "interview_question_video")]
    pub interview_id: i32,
    #[sea_orm(unique_key = "interview_question_video")]
    pub question_id: i32,

    #[sea_orm(belongs_to, from = "interview_id", to = "id")]
    pub interview: HasOne<super::interview::Entity>,
    #[sea_orm(belongs_to, from = "question_id", to = "id")]
    pub question: HasOne<super::question::Entity>,

    /// Storage location of the uploaded clip.
    #[sea_orm(column_type = "Text")]
    pub path: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
