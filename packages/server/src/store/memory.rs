use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use common::{InterviewResult, QuestionResult};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ResultStore, StoreError, materialize};

#[derive(Debug, Clone)]
struct QuestionRow {
    text: String,
    question_type: String,
}

#[derive(Debug, Clone, Default)]
struct InterviewRow {
    candidate_public_id: String,
    question_ids: Vec<String>,
    results: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
struct VideoRow {
    public_id: String,
    path: String,
}

#[derive(Debug, Default)]
struct Tables {
    interviews: BTreeMap<String, InterviewRow>,
    questions: HashMap<String, QuestionRow>,
    videos: HashMap<(String, String), VideoRow>,
}

/// In-process result store.
///
/// Same observable semantics as the SQL store. Used by tests and local runs
/// without a database.
#[derive(Debug, Default)]
pub struct MemoryResultStore {
    tables: RwLock<Tables>,
    writes: AtomicUsize,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a question in the catalog.
    pub async fn add_question(&self, public_id: &str, text: &str) {
        self.tables.write().await.questions.insert(
            public_id.to_string(),
            QuestionRow {
                text: text.to_string(),
                question_type: String::new(),
            },
        );
    }

    /// Register an interview with its question set in presentation order.
    pub async fn add_interview(&self, public_id: &str, candidate_public_id: &str, question_ids: &[&str]) {
        self.tables.write().await.interviews.insert(
            public_id.to_string(),
            InterviewRow {
                candidate_public_id: candidate_public_id.to_string(),
                question_ids: question_ids.iter().map(|q| q.to_string()).collect(),
                results: None,
            },
        );
    }

    /// Number of successful `persist` and `attach_video` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// The stored document for an interview, `None` before the first persist.
    pub async fn stored_result(&self, public_id: &str) -> Option<serde_json::Value> {
        self.tables
            .read()
            .await
            .interviews
            .get(public_id)
            .and_then(|row| row.results.clone())
    }

    fn owning_interview(
        tables: &Tables,
        question_public_id: &str,
        interview_public_id: Option<&str>,
    ) -> Result<String, StoreError> {
        let not_found = || StoreError::QuestionNotFound(question_public_id.to_string());
        let assigned = |row: &InterviewRow| row.question_ids.iter().any(|q| q == question_public_id);

        match interview_public_id {
            Some(id) => tables
                .interviews
                .get(id)
                .filter(|row| assigned(*row))
                .map(|_| id.to_string())
                .ok_or_else(not_found),
            None => {
                let owners: Vec<&String> = tables
                    .interviews
                    .iter()
                    .filter(|(_, row)| assigned(*row))
                    .map(|(id, _)| id)
                    .collect();
                match owners.as_slice() {
                    [only] => Ok((*only).clone()),
                    [] => Err(not_found()),
                    _ => Err(StoreError::AmbiguousQuestion(question_public_id.to_string())),
                }
            }
        }
    }
}

#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn fetch_by_public_id(
        &self,
        interview_public_id: &str,
    ) -> Result<InterviewResult, StoreError> {
        let tables = self.tables.read().await;
        let row = tables
            .interviews
            .get(interview_public_id)
            .ok_or_else(|| StoreError::NotFound(interview_public_id.to_string()))?;

        let questions = row
            .question_ids
            .iter()
            .filter_map(|qid| {
                let catalog = tables.questions.get(qid)?;
                let mut question = QuestionResult::new(qid, &catalog.text);
                question.question_type.clone_from(&catalog.question_type);
                if let Some(video) = tables
                    .videos
                    .get(&(interview_public_id.to_string(), qid.clone()))
                {
                    question.video_public_id.clone_from(&video.public_id);
                    question.video_link.clone_from(&video.path);
                }
                Some(question)
            })
            .collect();

        materialize(
            interview_public_id.to_string(),
            row.candidate_public_id.clone(),
            questions,
            row.results.clone(),
        )
    }

    async fn persist(&self, result: &InterviewResult) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let row = tables
            .interviews
            .get_mut(&result.public_id)
            .ok_or_else(|| StoreError::NotFound(result.public_id.clone()))?;
        row.results = Some(result.raw_result.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<InterviewResult>, StoreError> {
        let tables = self.tables.read().await;
        tables
            .interviews
            .iter()
            .map(|(id, row)| {
                InterviewResult::from_document(
                    id.clone(),
                    row.candidate_public_id.clone(),
                    row.results.clone().unwrap_or(serde_json::Value::Null),
                )
                .map_err(StoreError::from)
            })
            .collect()
    }

    async fn attach_video(
        &self,
        question_public_id: &str,
        interview_public_id: Option<&str>,
        video_location: &str,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.questions.contains_key(question_public_id) {
            return Err(StoreError::QuestionNotFound(question_public_id.to_string()));
        }

        let interview = Self::owning_interview(&tables, question_public_id, interview_public_id)?;
        tables.videos.insert(
            (interview, question_public_id.to_string()),
            VideoRow {
                public_id: Uuid::now_v7().to_string(),
                path: video_location.to_string(),
            },
        );
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
