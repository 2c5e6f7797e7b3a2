use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{TestApp, routes};

#[tokio::test]
async fn test_score_interview_end_to_end() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            &routes::question_video("q1"),
            &json!({"video": "/v/q1.mp4", "interview_public_id": "I1"}),
        )
        .await;
    assert_eq!(res.status, 204);

    Mock::given(method("POST"))
        .and(path("/process_interview"))
        .and(body_json(json!({
            "questions": [
                {"question": "Why Go?", "public_id": "q1", "video_link": "/v/q1.mp4"},
                {"question": "Tell us about yourself", "public_id": "q2", "video_link": ""}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "questions": [{
                    "public_id": "q1",
                    "score": 80,
                    "evaluation": "Good",
                    "emotion_results": [{"emotion": "calm", "exact_time": 1.5, "duration": 2.0}]
                }],
                "score": 80
            }
        })))
        .expect(1)
        .mount(&app.scorer)
        .await;

    let res = app.post_empty(&routes::interview_result("I1")).await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["score"], 80);
    assert_eq!(res.body["questions"][0]["evaluation"], "Good");
    assert_eq!(res.body["questions"][0]["emotion_results"][0]["emotion"], "calm");
    assert_eq!(res.body["questions"][1]["score"], 0);

    let stored = app.store.stored_result("I1").await.unwrap();
    assert_eq!(stored["score"], 80);
    assert_eq!(stored["questions"][0]["evaluation"], "Good");

    let res = app.get(&routes::interview("I1")).await;
    assert_eq!(res.body["score"], 80);
    assert_eq!(res.body["questions"][0]["video_link"], "/v/q1.mp4");
}

#[tokio::test]
async fn test_rescoring_is_idempotent() {
    let app = TestApp::spawn().await;
    app.scorer_responds(
        200,
        json!({"result": {"questions": [
            {"public_id": "q1", "score": 90, "evaluation": "Great"},
            {"public_id": "q2", "score": 71, "evaluation": "Fine"}
        ], "score": 80}}),
    )
    .await;

    let first = app.post_empty(&routes::interview_result("I1")).await;
    let stored_first = app.store.stored_result("I1").await;
    let second = app.post_empty(&routes::interview_result("I1")).await;
    let stored_second = app.store.stored_result("I1").await;

    assert_eq!(first.status, 201);
    assert_eq!(second.status, 201);
    assert_eq!(first.body, second.body);
    assert_eq!(first.body["score"], 80);
    assert_eq!(stored_first, stored_second);
}

#[tokio::test]
async fn test_missing_interview_is_404_without_scoring() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/process_interview"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.scorer)
        .await;

    let res = app.post_empty(&routes::interview_result("missing")).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn test_scoring_rejection_is_422_and_keeps_stored_result() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/process_interview"))
        .respond_with(ResponseTemplate::new(422).set_body_string("unsupported codec"))
        .mount(&app.scorer)
        .await;

    let res = app.post_empty(&routes::interview_result("I1")).await;
    assert_eq!(res.status, 422);
    assert_eq!(res.body["code"], "SCORING_REJECTED");
    assert!(res.body["message"].as_str().unwrap().contains("unsupported codec"));
    assert!(app.store.stored_result("I1").await.is_none());
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn test_scorer_outage_is_502_with_generic_message() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/process_interview"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Traceback (most recent call last)"))
        .mount(&app.scorer)
        .await;

    let res = app.post_empty(&routes::interview_result("I1")).await;
    assert_eq!(res.status, 502);
    assert_eq!(res.body["code"], "SCORING_UNAVAILABLE");
    assert!(!res.text.contains("Traceback"));
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn test_empty_scorer_response_scores_zero() {
    let app = TestApp::spawn().await;
    app.scorer_responds(200, json!({"result": {"questions": [], "score": 55}}))
        .await;

    let res = app.post_empty(&routes::interview_result("I1")).await;
    assert_eq!(res.status, 201);
    assert_eq!(res.body["score"], 0);
    assert_eq!(res.body["questions"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_interview_without_videos_sends_empty_links() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/process_interview"))
        .and(body_json(json!({
            "questions": [
                {"question": "Why Go?", "public_id": "q1", "video_link": ""},
                {"question": "Tell us about yourself", "public_id": "q2", "video_link": ""}
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": {"questions": [], "score": 0}})),
        )
        .expect(1)
        .mount(&app.scorer)
        .await;

    let res = app.post_empty(&routes::interview_result("I1")).await;
    assert_eq!(res.status, 201, "{}", res.text);
}
