use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The question set assigned to an interview, in presentation order.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "interview_questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub interview_id: i32,
    #[sea_orm(primary_key)]
    pub question_id: i32,
    #[sea_orm(belongs_to, from = "interview_id", to = "id")]
    pub interview: BelongsTo<super::interview::Entity>,
    #[sea_orm(belongs_to, from = "question_id", to = "id")]
    pub question: BelongsTo<super::question::Entity>,

    #[sea_orm(default_value = 0)]
    pub position: i32,
}

impl ActiveModelBehavior for ActiveModel {}
