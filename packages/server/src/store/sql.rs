use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use common::{InterviewResult, QuestionResult};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::{ResultStore, StoreError, materialize, with_deadline};
use crate::entity::{candidate, candidate_interview, interview, interview_question, question, video};

/// Relational result store backed by sea-orm.
#[derive(Clone)]
pub struct SqlResultStore {
    db: DatabaseConnection,
    timeout: Duration,
}

impl SqlResultStore {
    pub fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    async fn find_interview(&self, public_id: &str) -> Result<Option<interview::Model>, StoreError> {
        Ok(interview::Entity::find()
            .filter(interview::Column::PublicId.eq(public_id))
            .one(&self.db)
            .await?)
    }

    /// Public id of the candidate assigned to an interview, empty if none is.
    async fn candidate_public_id(&self, interview_id: i32) -> Result<String, StoreError> {
        let Some(link) = candidate_interview::Entity::find()
            .filter(candidate_interview::Column::InterviewId.eq(interview_id))
            .one(&self.db)
            .await?
        else {
            warn!(interview_id, "Interview has no assigned candidate");
            return Ok(String::new());
        };

        let candidate = candidate::Entity::find_by_id(link.candidate_id)
            .one(&self.db)
            .await?;
        Ok(candidate.map(|c| c.public_id).unwrap_or_default())
    }

    /// Assigned questions in presentation order, left-joined with their videos.
    async fn joined_questions(&self, interview_id: i32) -> Result<Vec<QuestionResult>, StoreError> {
        let assignments = interview_question::Entity::find()
            .filter(interview_question::Column::InterviewId.eq(interview_id))
            .order_by_asc(interview_question::Column::Position)
            .all(&self.db)
            .await?;

        let question_ids: Vec<i32> = assignments.iter().map(|a| a.question_id).collect();
        let catalog: HashMap<i32, question::Model> = question::Entity::find()
            .filter(question::Column::Id.is_in(question_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|q| (q.id, q))
            .collect();

        let videos: HashMap<i32, video::Model> = video::Entity::find()
            .filter(video::Column::InterviewId.eq(interview_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|v| (v.question_id, v))
            .collect();

        let questions = assignments
            .iter()
            .filter_map(|a| catalog.get(&a.question_id))
            .map(|q| {
                let mut result = QuestionResult::new(&q.public_id, &q.name);
                result.question_type.clone_from(&q.question_type);
                if let Some(v) = videos.get(&q.id) {
                    result.video_public_id.clone_from(&v.public_id);
                    result.video_link.clone_from(&v.path);
                }
                result
            })
            .collect();

        Ok(questions)
    }

    /// Resolve which interview a video upload belongs to.
    async fn owning_interview(
        &self,
        question: &question::Model,
        interview_public_id: Option<&str>,
    ) -> Result<i32, StoreError> {
        let not_found = || StoreError::QuestionNotFound(question.public_id.clone());

        match interview_public_id {
            Some(public_id) => {
                let interview = self.find_interview(public_id).await?.ok_or_else(not_found)?;
                interview_question::Entity::find_by_id((interview.id, question.id))
                    .one(&self.db)
                    .await?
                    .ok_or_else(not_found)?;
                Ok(interview.id)
            }
            None => {
                let assignments = interview_question::Entity::find()
                    .filter(interview_question::Column::QuestionId.eq(question.id))
                    .all(&self.db)
                    .await?;
                match assignments.as_slice() {
                    [only] => Ok(only.interview_id),
                    [] => Err(not_found()),
                    _ => Err(StoreError::AmbiguousQuestion(question.public_id.clone())),
                }
            }
        }
    }
}

#[async_trait]
impl ResultStore for SqlResultStore {
    #[instrument(skip(self))]
    async fn fetch_by_public_id(
        &self,
        interview_public_id: &str,
    ) -> Result<InterviewResult, StoreError> {
        with_deadline(self.timeout, async {
            let interview = self
                .find_interview(interview_public_id)
                .await?
                .ok_or_else(|| StoreError::NotFound(interview_public_id.to_string()))?;

            let candidate_public_id = self.candidate_public_id(interview.id).await?;
            let questions = self.joined_questions(interview.id).await?;

            materialize(
                interview.public_id,
                candidate_public_id,
                questions,
                interview.results,
            )
        })
        .await
    }

    #[instrument(skip(self, result), fields(interview_id = %result.public_id))]
    async fn persist(&self, result: &InterviewResult) -> Result<(), StoreError> {
        with_deadline(self.timeout, async {
            let update = interview::Entity::update_many()
                .col_expr(
                    interview::Column::Results,
                    Expr::value(result.raw_result.clone()),
                )
                .filter(interview::Column::PublicId.eq(result.public_id.as_str()))
                .exec(&self.db)
                .await?;

            if update.rows_affected == 0 {
                return Err(StoreError::NotFound(result.public_id.clone()));
            }
            debug!(score = result.score, "Persisted interview result");
            Ok::<_, StoreError>(())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn fetch_all(&self) -> Result<Vec<InterviewResult>, StoreError> {
        with_deadline(self.timeout, async {
            let interviews = interview::Entity::find()
                .order_by_asc(interview::Column::Id)
                .all(&self.db)
                .await?;

            let candidates: HashMap<i32, String> = candidate::Entity::find()
                .all(&self.db)
                .await?
                .into_iter()
                .map(|c| (c.id, c.public_id))
                .collect();

            let assigned: HashMap<i32, String> = candidate_interview::Entity::find()
                .all(&self.db)
                .await?
                .into_iter()
                .filter_map(|link| {
                    candidates
                        .get(&link.candidate_id)
                        .map(|public_id| (link.interview_id, public_id.clone()))
                })
                .collect();

            interviews
                .into_iter()
                .map(|i| {
                    let candidate_public_id = assigned.get(&i.id).cloned().unwrap_or_default();
                    InterviewResult::from_document(
                        i.public_id,
                        candidate_public_id,
                        i.results.unwrap_or(serde_json::Value::Null),
                    )
                    .map_err(StoreError::from)
                })
                .collect::<Result<Vec<_>, StoreError>>()
        })
        .await
    }

    #[instrument(skip(self))]
    async fn attach_video(
        &self,
        question_public_id: &str,
        interview_public_id: Option<&str>,
        video_location: &str,
    ) -> Result<(), StoreError> {
        with_deadline(self.timeout, async {
            let question = question::Entity::find()
                .filter(question::Column::PublicId.eq(question_public_id))
                .one(&self.db)
                .await?
                .ok_or_else(|| StoreError::QuestionNotFound(question_public_id.to_string()))?;

            let interview_id = self.owning_interview(&question, interview_public_id).await?;

            let model = video::ActiveModel {
                public_id: Set(Uuid::now_v7().to_string()),
                interview_id: Set(interview_id),
                question_id: Set(question.id),
                path: Set(video_location.to_string()),
                created_at: Set(Utc::now()),
                ..Default::default()
            };

            video::Entity::insert(model)
                .on_conflict(
                    OnConflict::columns([video::Column::InterviewId, video::Column::QuestionId])
                        .update_columns([video::Column::Path, video::Column::CreatedAt])
                        .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await?;

            debug!(interview_id, question_id = question.id, "Attached video");
            Ok::<_, StoreError>(())
        })
        .await
    }
}
