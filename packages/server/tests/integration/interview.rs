use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn test_get_interview_before_scoring() {
    let app = TestApp::spawn().await;

    let res = app.get(&routes::interview("I1")).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["public_id"], "I1");
    assert_eq!(res.body["candidate_public_id"], "c1");
    assert_eq!(res.body["score"], 0);

    let questions = res.body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["public_id"], "q1");
    assert_eq!(questions[0]["question"], "Why Go?");
    assert_eq!(questions[0]["video_link"], "");
    assert_eq!(questions[1]["public_id"], "q2");
    assert!(res.body.get("raw_result").is_none());
}

#[tokio::test]
async fn test_get_unknown_interview_is_404() {
    let app = TestApp::spawn().await;

    let res = app.get(&routes::interview("nope")).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_attach_video_shows_in_interview() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            &routes::question_video("q1"),
            &json!({"video": "/v/q1.mp4", "interview_public_id": "I1"}),
        )
        .await;
    assert_eq!(res.status, 204, "{}", res.text);

    let res = app.get(&routes::interview("I1")).await;
    assert_eq!(res.body["questions"][0]["video_link"], "/v/q1.mp4");
    assert_eq!(res.body["questions"][1]["video_link"], "");
}

#[tokio::test]
async fn test_attach_video_without_interview_id_resolves_owner() {
    let app = TestApp::spawn().await;

    let res = app
        .post(&routes::question_video("q2"), &json!({"video": "/v/q2.mp4"}))
        .await;
    assert_eq!(res.status, 204, "{}", res.text);

    let res = app.get(&routes::interview("I1")).await;
    assert_eq!(res.body["questions"][1]["video_link"], "/v/q2.mp4");
}

#[tokio::test]
async fn test_attach_video_to_unassigned_question_is_404() {
    let app = TestApp::spawn().await;
    app.store.add_question("q9", "Not in any interview").await;

    let res = app
        .post(
            &routes::question_video("q9"),
            &json!({"video": "/v/q9.mp4", "interview_public_id": "I1"}),
        )
        .await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn test_attach_video_empty_location_is_400() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            &routes::question_video("q1"),
            &json!({"video": "", "interview_public_id": "I1"}),
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn test_attach_video_malformed_body_is_400() {
    let app = TestApp::spawn().await;

    let res = app
        .post(&routes::question_video("q1"), &json!({"location": "/v/q1.mp4"}))
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_interviews_reports_stored_results() {
    let app = TestApp::spawn().await;
    app.store.add_interview("I2", "c2", &["q2"]).await;
    app.scorer_responds(
        200,
        json!({"result": {"questions": [{"public_id": "q1", "score": 80, "evaluation": "Good"}], "score": 80}}),
    )
    .await;

    let res = app.post_empty(&routes::interview_result("I1")).await;
    assert_eq!(res.status, 201, "{}", res.text);

    let res = app.get(routes::INTERVIEWS).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["total"], 2);

    let data = res.body["data"].as_array().unwrap();
    let scored = data.iter().find(|i| i["public_id"] == "I1").unwrap();
    assert_eq!(scored["score"], 80);
    assert_eq!(scored["questions"][0]["evaluation"], "Good");

    let unscored = data.iter().find(|i| i["public_id"] == "I2").unwrap();
    assert_eq!(unscored["score"], 0);
    assert_eq!(unscored["questions"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let app = TestApp::spawn().await;

    let res = app.get("/api-docs/openapi.json").await;
    assert_eq!(res.status, 200);
    let paths = res.body["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/v1/interviews"));
    assert!(paths.contains_key("/api/v1/interviews/{public_id}/result"));
    assert!(paths.contains_key("/api/v1/questions/{public_id}/video"));
}
