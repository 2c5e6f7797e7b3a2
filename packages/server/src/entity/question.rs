use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub public_id: String,

    /// Question text as shown to the candidate.
    #[sea_orm(column_type = "Text")]
    pub name: String,

    pub question_type: String,

    #[sea_orm(has_many, via = "interview_question")]
    pub interviews: HasMany<super::interview::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
