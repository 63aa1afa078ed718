use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use student_predictor::{api, BatchPredictResponse, FixedJitter, PredictionResponse, Predictor, Scorer};

fn sample_json() -> Value {
    json!({
        "age": 17, "sex": "F", "address": "U", "famsize": "GT3",
        "Medu": 3, "Fedu": 2, "studytime": 3, "failures": 0,
        "schoolsup": "no", "famsup": "yes", "internet": "yes", "romantic": "no",
        "health": 4, "absences": 2
    })
}

fn predictor() -> web::Data<Predictor> {
    web::Data::new(Predictor::Local(Scorer::with_jitter(FixedJitter(0.0))))
}

#[actix_web::test]
async fn test_predict_returns_wire_shape() {
    let app = test::init_service(App::new().app_data(predictor()).configure(api::configure)).await;

    let req = test::TestRequest::post().uri("/predict").set_json(sample_json()).to_request();
    let resp: PredictionResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.prediction, 1);
    assert_eq!(resp.prediction_text, "Pass");
    assert_eq!(resp.status, "success");
    assert!((resp.probability.pass - 0.6360375).abs() < 1e-12);
    assert!((resp.probability.pass + resp.probability.fail - 1.0).abs() < 1e-12);
    assert_eq!(resp.confidence, 0.6);

    let features: Vec<&str> = resp.top_factors.iter().map(|f| f.feature.as_str()).collect();
    assert_eq!(features, vec!["studytime", "Fedu", "Medu", "failures", "age"]);
}

#[actix_web::test]
async fn test_predict_rejects_out_of_domain_value() {
    let app = test::init_service(App::new().app_data(predictor()).configure(api::configure)).await;

    let mut body = sample_json();
    body["failures"] = json!(4);
    let req = test::TestRequest::post().uri("/predict").set_json(body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert!(body["error"].as_str().unwrap().contains("failures"));
}

#[actix_web::test]
async fn test_predict_rejects_missing_field() {
    let app = test::init_service(App::new().app_data(predictor()).configure(api::configure)).await;

    let mut body = sample_json();
    body.as_object_mut().unwrap().remove("internet");
    let req = test::TestRequest::post().uri("/predict").set_json(body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "missing required field `internet`");
}

#[actix_web::test]
async fn test_malformed_json_is_json_error() {
    let app = test::init_service(App::new().app_data(predictor()).configure(api::configure)).await;

    let req = test::TestRequest::post()
        .uri("/predict")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"age": "seventeen"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
}

#[actix_web::test]
async fn test_batch_predict_summarises() {
    let app = test::init_service(App::new().app_data(predictor()).configure(api::configure)).await;

    let mut jane = sample_json();
    jane["name"] = json!("Jane Smith");
    let mut mike = sample_json();
    mike["name"] = json!("Mike Johnson");
    mike["failures"] = json!(3);
    mike["studytime"] = json!(1);
    mike["Medu"] = json!(0);
    mike["Fedu"] = json!(0);
    mike["absences"] = json!(20);
    mike["health"] = json!(1);

    let req = test::TestRequest::post()
        .uri("/batch-predict")
        .set_json(json!([jane, mike]))
        .to_request();
    let resp: BatchPredictResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.total_students, 2);
    assert_eq!(resp.summary.pass_count, 1);
    assert_eq!(resp.summary.fail_count, 1);
    assert_eq!(resp.summary.pass_rate, 0.5);
    assert_eq!(resp.predictions[1].name, "Mike Johnson");
    assert_eq!(resp.predictions[1].prediction_text, "Fail");
    assert_eq!(resp.predictions[1].recommendation, "Increase weekly study time");
}

#[actix_web::test]
async fn test_batch_predict_names_invalid_student() {
    let app = test::init_service(App::new().app_data(predictor()).configure(api::configure)).await;

    let mut bad = sample_json();
    bad["name"] = json!("David Brown");
    bad["age"] = json!(22);
    let req = test::TestRequest::post().uri("/batch-predict").set_json(json!([bad])).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("record `David Brown`"));
}

#[actix_web::test]
async fn test_feature_info_and_health() {
    let app = test::init_service(App::new().app_data(predictor()).configure(api::configure)).await;

    let req = test::TestRequest::get().uri("/feature_info").to_request();
    let info: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(info["numerical_features"]["studytime"]["min"], 1);
    assert_eq!(info["numerical_features"]["studytime"]["max"], 4);
    assert_eq!(info["categorical_features"]["address"], json!(["U", "R"]));

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/").to_request();
    let home: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(home["status"], "Active");
}
