//! # Gastroplan REST API
//!
//! REST layer over the core crate:
//! - Patient listing and detail views
//! - Intake submission (one-shot replay of the intake workflow)
//! - OpenAPI/Swagger documentation
//!
//! Handlers degrade gracefully: storage corruption is absorbed by the
//! repository (listings fall back to seed records), and a missing patient is
//! an explicit `404` with a `"Patient not found"` detail, never a silent
//! failure.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use gastroplan_core::{
    Gender, IntakeField, IntakeWorkflow, LabCategory, PatientRecord, PatientRepository,
    ScanCategory,
};

/// Application state shared across REST API handlers.
///
/// The repository is injected as a trait object so tests and future storage
/// backends can swap the implementation without touching the handlers.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn PatientRepository>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, list_patients, get_patient, submit_intake),
    components(schemas(
        HealthRes,
        ListPatientsRes,
        PatientSummary,
        PatientDetailRes,
        MedicalHistoryRes,
        ScanChecklistItem,
        LabChecklistItem,
        IntakeSubmissionReq,
        ScanAttachmentReq,
        LabResultReq,
        IntakeSubmissionRes,
    ))
)]
pub struct ApiDoc;

/// Build the API router over the given state.
///
/// CORS and Swagger UI layers are added by the binaries, not here.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/patients", get(list_patients))
        .route("/patients/intake", post(submit_intake))
        .route("/patients/:id", get(get_patient))
        .with_state(state)
}

// ============================================================================
// RESPONSE / REQUEST TYPES
// ============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
    pub application: String,
    pub version: String,
}

/// One row of the patient listing view.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PatientSummary {
    pub id: String,
    pub name: String,
    pub medical_record_number: String,
    pub age: i64,
    pub gender: String,
    pub status: String,
    pub scan_count: usize,
    pub simulation_count: usize,
    pub last_activity: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListPatientsRes {
    pub patients: Vec<PatientSummary>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MedicalHistoryRes {
    pub weight_history: String,
    pub comorbidities: String,
    pub surgical_history: String,
    pub medications: String,
    pub psychosocial_history: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScanChecklistItem {
    pub category: String,
    pub reference_name: String,
    pub uploaded: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LabChecklistItem {
    pub category: String,
    pub result: String,
}

/// Full patient record as rendered by the detail view.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PatientDetailRes {
    pub id: String,
    pub name: String,
    pub medical_record_number: String,
    pub age: i64,
    pub gender: String,
    pub date_of_birth: Option<String>,
    pub last_activity: String,
    pub scan_count: usize,
    pub simulation_count: usize,
    pub status: String,
    pub history: MedicalHistoryRes,
    pub scan_checklist: Vec<ScanChecklistItem>,
    pub lab_checklist: Vec<LabChecklistItem>,
}

/// A scan attachment reported by the intake client.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScanAttachmentReq {
    /// Display name of the scan category, e.g. `"Chest X-ray"`.
    pub category: String,
    #[serde(default)]
    pub reference_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LabResultReq {
    /// Display name of the lab category, e.g. `"HbA1c"`.
    pub category: String,
    #[serde(default)]
    pub result: String,
}

/// One-shot intake submission.
///
/// Every field is optional: the intake policy is permissive and an entirely
/// empty submission still produces a record (with the unnamed-patient
/// fallback). Unknown checklist categories are logged and skipped rather
/// than rejected.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct IntakeSubmissionReq {
    #[serde(default)]
    pub full_name: String,
    /// Accepted as-is; an unparseable date yields age 0.
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub weight_history: String,
    #[serde(default)]
    pub comorbidities: String,
    #[serde(default)]
    pub surgical_history: String,
    #[serde(default)]
    pub medications: String,
    #[serde(default)]
    pub psychosocial_history: String,
    #[serde(default)]
    pub uploaded_scans: Vec<ScanAttachmentReq>,
    #[serde(default)]
    pub lab_results: Vec<LabResultReq>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IntakeSubmissionRes {
    pub id: String,
    pub name: String,
    pub medical_record_number: String,
}

impl PatientSummary {
    fn from_record(record: &PatientRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            medical_record_number: record.medical_record_number.clone(),
            age: record.age,
            gender: record.gender.to_string(),
            status: record.status.to_string(),
            scan_count: record.scan_count,
            simulation_count: record.simulation_count,
            last_activity: record.last_activity.to_string(),
        }
    }
}

impl PatientDetailRes {
    fn from_record(record: PatientRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            medical_record_number: record.medical_record_number,
            age: record.age,
            gender: record.gender.to_string(),
            date_of_birth: record.date_of_birth.map(|d| d.to_string()),
            last_activity: record.last_activity.to_string(),
            scan_count: record.scan_count,
            simulation_count: record.simulation_count,
            status: record.status.to_string(),
            history: MedicalHistoryRes {
                weight_history: record.history.weight_history,
                comorbidities: record.history.comorbidities,
                surgical_history: record.history.surgical_history,
                medications: record.history.medications,
                psychosocial_history: record.history.psychosocial_history,
            },
            scan_checklist: record
                .scan_checklist
                .into_iter()
                .map(|(category, entry)| ScanChecklistItem {
                    category: category.display_name().to_string(),
                    reference_name: entry.reference_name,
                    uploaded: entry.uploaded,
                })
                .collect(),
            lab_checklist: record
                .lab_checklist
                .into_iter()
                .map(|(category, result)| LabChecklistItem {
                    category: category.display_name().to_string(),
                    result,
                })
                .collect(),
        }
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        status: "healthy".into(),
        application: "Gastroplan".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

#[utoipa::path(
    get,
    path = "/patients",
    responses(
        (status = 200, description = "List of patients", body = ListPatientsRes)
    )
)]
/// List all patients: the fixed seed records first, then stored records in
/// insertion order. Storage corruption degrades to seeds only; this endpoint
/// never fails.
#[axum::debug_handler]
async fn list_patients(State(state): State<AppState>) -> Json<ListPatientsRes> {
    let patients = state
        .repository
        .list_all()
        .iter()
        .map(PatientSummary::from_record)
        .collect();
    Json(ListPatientsRes { patients })
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(
        ("id" = String, Path, description = "Patient record identifier")
    ),
    responses(
        (status = 200, description = "Patient detail", body = PatientDetailRes),
        (status = 404, description = "Patient not found")
    )
)]
/// Fetch one patient by id.
///
/// A lookup miss is an explicit not-found result for the detail view to
/// render, not an error.
#[axum::debug_handler]
async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PatientDetailRes>, (StatusCode, &'static str)> {
    match state.repository.get_by_id(&id) {
        Some(record) => Ok(Json(PatientDetailRes::from_record(record))),
        None => Err((StatusCode::NOT_FOUND, "Patient not found")),
    }
}

#[utoipa::path(
    post,
    path = "/patients/intake",
    request_body = IntakeSubmissionReq,
    responses(
        (status = 201, description = "Patient record created", body = IntakeSubmissionRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Submit a completed intake form.
///
/// Replays the submission onto a fresh intake workflow (demographics, scan
/// checklist, lab results) and finalises it, returning the created record's
/// id and name so the client can navigate to it.
///
/// # Errors
/// Returns `500 Internal Server Error` if the repository write fails.
#[axum::debug_handler]
async fn submit_intake(
    State(state): State<AppState>,
    Json(req): Json<IntakeSubmissionReq>,
) -> Result<(StatusCode, Json<IntakeSubmissionRes>), (StatusCode, &'static str)> {
    let workflow = replay_submission(req);

    match workflow.submit(state.repository.as_ref()) {
        Ok(record) => Ok((
            StatusCode::CREATED,
            Json(IntakeSubmissionRes {
                id: record.id,
                name: record.name,
                medical_record_number: record.medical_record_number,
            }),
        )),
        Err(e) => {
            tracing::error!("Intake submission error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

/// Walk a fresh workflow through its three steps with the submitted data,
/// leaving it on the labs step ready to submit.
fn replay_submission(req: IntakeSubmissionReq) -> IntakeWorkflow {
    let mut workflow = IntakeWorkflow::new();

    let form = workflow.form_mut();
    form.update_field(IntakeField::FullName, req.full_name);
    form.update_field(IntakeField::DateOfBirth, req.date_of_birth);
    form.set_gender(Gender::parse_permissive(&req.gender));
    form.update_field(IntakeField::WeightHistory, req.weight_history);
    form.update_field(IntakeField::Comorbidities, req.comorbidities);
    form.update_field(IntakeField::SurgicalHistory, req.surgical_history);
    form.update_field(IntakeField::Medications, req.medications);
    form.update_field(IntakeField::PsychosocialHistory, req.psychosocial_history);

    workflow.go_next();
    for scan in req.uploaded_scans {
        match ScanCategory::from_display_name(&scan.category) {
            Some(category) => workflow
                .form_mut()
                .set_scan_uploaded(category, scan.reference_name),
            None => tracing::warn!("ignoring unknown scan category: {}", scan.category),
        }
    }

    workflow.go_next();
    for lab in req.lab_results {
        match LabCategory::from_display_name(&lab.category) {
            Some(category) => workflow.form_mut().update_lab_result(category, lab.result),
            None => tracing::warn!("ignoring unknown lab category: {}", lab.category),
        }
    }

    workflow
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use gastroplan_core::{CoreConfig, JsonFileRepository};
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_app(temp_dir: &TempDir) -> Router {
        let cfg = Arc::new(CoreConfig::new(temp_dir.path().to_path_buf()));
        let state = AppState {
            repository: Arc::new(JsonFileRepository::new(cfg)),
        };
        router(state)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, value)
    }

    async fn post_json(
        app: Router,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health_reports_healthy() {
        let temp_dir = TempDir::new().unwrap();
        let (status, body) = get_json(test_app(&temp_dir), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["application"], "Gastroplan");
    }

    #[tokio::test]
    async fn test_list_patients_returns_seeds_for_fresh_store() {
        let temp_dir = TempDir::new().unwrap();
        let (status, body) = get_json(test_app(&temp_dir), "/patients").await;

        assert_eq!(status, StatusCode::OK);
        let patients = body["patients"].as_array().unwrap();
        assert_eq!(patients.len(), 3);
        assert_eq!(patients[0]["name"], "John Smith");
        assert_eq!(patients[0]["medical_record_number"], "P-2024-001");
        assert_eq!(patients[2]["status"], "pending");
    }

    #[tokio::test]
    async fn test_get_patient_detail_for_seed_record() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir);

        let (status, body) =
            get_json(app, "/patients/00000000-0000-4000-8000-000000000001").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "John Smith");
        assert_eq!(body["gender"], "Male");
        assert_eq!(body["scan_count"], 2);
        assert_eq!(body["date_of_birth"], "1979-05-15");
        assert_eq!(body["scan_checklist"].as_array().unwrap().len(), 5);
        assert_eq!(body["lab_checklist"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_get_patient_miss_is_404_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let (status, _body) = get_json(test_app(&temp_dir), "/patients/nonexistent-id").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_submit_intake_creates_a_retrievable_record() {
        let temp_dir = TempDir::new().unwrap();

        let submission = serde_json::json!({
            "full_name": "Jane Doe",
            "date_of_birth": "1990-01-15",
            "gender": "Female",
            "comorbidities": "None reported",
            "uploaded_scans": [
                { "category": "Chest X-ray", "reference_name": "jane_xray.dcm" },
                { "category": "Abdominal CT", "reference_name": "jane_ct.dcm" }
            ],
            "lab_results": [
                { "category": "HbA1c", "result": "5.4%" }
            ]
        });

        let (status, body) =
            post_json(test_app(&temp_dir), "/patients/intake", submission).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "Jane Doe");
        let id = body["id"].as_str().unwrap().to_string();

        let (status, detail) = get_json(test_app(&temp_dir), &format!("/patients/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["scan_count"], 2);
        assert_eq!(detail["status"], "pending");
        assert_eq!(detail["history"]["comorbidities"], "None reported");

        let (_, listing) = get_json(test_app(&temp_dir), "/patients").await;
        let patients = listing["patients"].as_array().unwrap();
        assert_eq!(patients.len(), 4);
        assert_eq!(patients[3]["name"], "Jane Doe");
    }

    #[tokio::test]
    async fn test_empty_submission_falls_back_to_unnamed_patient() {
        let temp_dir = TempDir::new().unwrap();

        let (status, body) =
            post_json(test_app(&temp_dir), "/patients/intake", serde_json::json!({})).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "Unnamed Patient");
    }

    #[tokio::test]
    async fn test_unknown_scan_category_is_skipped_not_rejected() {
        let temp_dir = TempDir::new().unwrap();

        let submission = serde_json::json!({
            "full_name": "Typo Patient",
            "uploaded_scans": [
                { "category": "Brain MRI", "reference_name": "brain.dcm" },
                { "category": "Endoscopy", "reference_name": "endo.dcm" }
            ]
        });

        let (status, body) =
            post_json(test_app(&temp_dir), "/patients/intake", submission).await;
        assert_eq!(status, StatusCode::CREATED);

        let id = body["id"].as_str().unwrap().to_string();
        let (_, detail) = get_json(test_app(&temp_dir), &format!("/patients/{id}")).await;
        assert_eq!(detail["scan_count"], 1);
    }
}
