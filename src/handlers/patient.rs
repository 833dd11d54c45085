use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::models::{NewPatient, Patient, PatientUpdate};
use crate::store::{PatientMap, PatientStore};
use crate::AppState;

use super::error::{ApiError, ApiJson, ApiPath, ApiQuery};

/// GET /patients - the whole store, keyed by patient id.
pub async fn list_patients(State(state): State<AppState>) -> Result<Json<PatientMap>, ApiError> {
    let patients = state.store.load().await?;
    tracing::debug!("listing {} patients", patients.len());
    Ok(Json(patients))
}

/// GET /patient/:patient_id
pub async fn get_patient(
    State(state): State<AppState>,
    ApiPath(patient_id): ApiPath<String>,
) -> Result<Json<Patient>, ApiError> {
    let patients = state.store.load().await?;
    patients
        .get(&patient_id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound)
}

#[derive(Debug, Deserialize)]
pub struct SortQuery {
    sort_by: Option<String>,
    #[serde(default = "default_order")]
    order_by: String,
}

fn default_order() -> String {
    "asc".to_string()
}

#[derive(Debug, Clone, Copy)]
enum SortField {
    Height,
    Weight,
    Bmi,
}

impl SortField {
    fn parse(value: &str) -> Result<Self, ApiError> {
        match value.to_lowercase().as_str() {
            "height" => Ok(SortField::Height),
            "weight" => Ok(SortField::Weight),
            "bmi" => Ok(SortField::Bmi),
            other => Err(ApiError::InvalidArgument(format!(
                "invalid sort field '{}', choose from height, weight or bmi",
                other
            ))),
        }
    }

    fn key(self, patient: &Patient) -> f64 {
        match self {
            SortField::Height => patient.height,
            SortField::Weight => patient.weight,
            SortField::Bmi => patient.bmi,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn parse(value: &str) -> Result<Self, ApiError> {
        match value.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(ApiError::InvalidArgument(
                "order_by must be 'asc' or 'desc'".to_string(),
            )),
        }
    }
}

/// GET /sort?sort_by=height|weight|bmi&order_by=asc|desc
///
/// Both parameters are parsed before the store is touched, so a bad
/// query never costs a file read. Records with equal keys keep their
/// id order; descending reverses the whole ascending sequence.
pub async fn sort_patients(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SortQuery>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let field = match query.sort_by.as_deref() {
        Some(value) => SortField::parse(value)?,
        None => {
            return Err(ApiError::InvalidArgument(
                "sort_by is required, choose from height, weight or bmi".to_string(),
            ))
        }
    };
    let order = SortOrder::parse(&query.order_by)?;

    let patients = state.store.load().await?;
    let mut records: Vec<Patient> = patients.into_values().collect();
    records.sort_by(|a, b| field.key(a).total_cmp(&field.key(b)));
    if let SortOrder::Desc = order {
        records.reverse();
    }
    Ok(Json(records))
}

/// POST /create
pub async fn create_patient(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewPatient>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (id, record) = body.into_record()?;

    let mut patients = state.store.load().await?;
    if patients.contains_key(&id) {
        return Err(ApiError::Conflict);
    }
    patients.insert(id.clone(), record);
    state.store.save(&patients).await?;
    tracing::info!("✓ Patient created: {}", id);

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Patient created successfully"})),
    ))
}

/// PUT /edit/:patient_id - partial update; omitted fields keep their
/// stored values and the derived fields are recomputed.
pub async fn update_patient(
    State(state): State<AppState>,
    ApiPath(patient_id): ApiPath<String>,
    ApiJson(body): ApiJson<PatientUpdate>,
) -> Result<Json<Value>, ApiError> {
    let mut patients = state.store.load().await?;
    let current = patients.get(&patient_id).ok_or(ApiError::NotFound)?;
    let record = body.apply(&patient_id, current)?;
    patients.insert(patient_id.clone(), record);
    state.store.save(&patients).await?;
    tracing::info!("✓ Patient updated: {}", patient_id);

    Ok(Json(json!({"message": "Patient Updated"})))
}

/// DELETE /delete/:patient_id
pub async fn delete_patient(
    State(state): State<AppState>,
    ApiPath(patient_id): ApiPath<String>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut patients = state.store.load().await?;
    if patients.remove(&patient_id).is_none() {
        return Err(ApiError::NotFound);
    }
    state.store.save(&patients).await?;
    tracing::info!("✓ Patient deleted: {}", patient_id);

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({"message": "Deleted successfully"})),
    ))
}
