// src/backend/handlers.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::backend::AppState;
use crate::database::db::queries;
use crate::database::models::{NewSavingEntry, SavingEntry};
use crate::fire::{self, ProjectionInput, DEFAULT_RETURN_RATE};

const INVALID_FIRE_INPUT: &str =
    "Invalid input. Please provide valid numbers for income, expenses, and return rate.";

pub async fn ping() -> impl IntoResponse {
    Json(json!({ "message": "pong" }))
}

/// POST /api/fire
///
/// Both income and expenses must be JSON numbers; return_rate, when
/// present, must be a number and otherwise defaults to 0.05. Validation
/// failures never reach the projection core.
pub async fn fire_projection(body: Option<Json<Value>>) -> Response {
    let Some(Json(body)) = body else {
        return bad_request(INVALID_FIRE_INPUT);
    };

    let monthly_income = body.get("monthly_income").and_then(Value::as_f64);
    let monthly_expenses = body.get("monthly_expenses").and_then(Value::as_f64);
    let return_rate = match body.get("return_rate") {
        None => Some(DEFAULT_RETURN_RATE),
        Some(v) => v.as_f64(),
    };

    let (Some(monthly_income), Some(monthly_expenses), Some(return_rate)) =
        (monthly_income, monthly_expenses, return_rate)
    else {
        return bad_request(INVALID_FIRE_INPUT);
    };

    match fire::project(ProjectionInput::new(
        monthly_income,
        monthly_expenses,
        return_rate,
    )) {
        Ok(projection) => (StatusCode::OK, Json(projection)).into_response(),
        Err(e) => {
            // Computation failure gets its own status, not a 200 payload.
            log::warn!("fire projection failed: {e}");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": format!("Calculation error: {e}") })),
            )
                .into_response()
        }
    }
}

/// GET /api/savings
pub async fn list_savings(State(state): State<AppState>) -> Response {
    match queries::list_entries(&state.db).await {
        Ok(entries) => {
            (StatusCode::OK, Json(json!({ "entries": entries_payload(&entries) })))
                .into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// POST /api/savings with body { "savings": [ { name, amount } ] }.
/// Amounts may arrive as numbers or numeric strings; a single bad entry
/// rejects the whole batch before anything is inserted.
pub async fn create_savings(State(state): State<AppState>, body: Option<Json<Value>>) -> Response {
    let Some(Json(body)) = body else {
        return bad_request("Missing or invalid 'savings' in request");
    };
    let Some(items) = body.get("savings").and_then(Value::as_array) else {
        return bad_request("Missing or invalid 'savings' in request");
    };

    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        match parse_entry(item) {
            Ok(entry) => entries.push(entry),
            Err(reason) => return bad_request(&format!("Invalid entry: {reason}")),
        }
    }

    if let Err(e) = queries::insert_entries(&state.db, &entries).await {
        return internal_error(e);
    }

    match queries::list_entries(&state.db).await {
        Ok(all) => (
            StatusCode::OK,
            Json(json!({
                "message": "Savings recorded successfully.",
                "entries": entries_payload(&all),
            })),
        )
            .into_response(),
        Err(e) => internal_error(e),
    }
}

/// DELETE /api/savings/:id
pub async fn delete_saving(Path(entry_id): Path<i64>, State(state): State<AppState>) -> Response {
    match queries::delete_entry(&state.db, entry_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(json!({ "message": format!("Entry {entry_id} deleted successfully.") })),
        )
            .into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Entry not found" })),
        )
            .into_response(),
        Err(e) => internal_error(e),
    }
}

fn parse_entry(item: &Value) -> Result<NewSavingEntry, String> {
    let name = item
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();
    if name.is_empty() {
        return Err("Missing name.".to_string());
    }

    let amount = match item.get("amount") {
        Some(Value::String(s)) => Decimal::from_str_exact(s.trim()).ok(),
        Some(Value::Number(n)) => n.as_f64().and_then(Decimal::from_f64),
        _ => None,
    }
    .ok_or_else(|| "Amount must be a number.".to_string())?;

    if amount < Decimal::ZERO {
        return Err("Amount cannot be negative.".to_string());
    }

    Ok(NewSavingEntry {
        name: name.to_string(),
        amount,
    })
}

fn entries_payload(entries: &[SavingEntry]) -> Vec<Value> {
    entries
        .iter()
        .map(|e| {
            json!({
                "id": e.entry_id,
                "name": e.name,
                "amount": e.amount.to_f64().unwrap_or(0.0),
                "created_at": e.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                "formatted": e.formatted_amount(),
            })
        })
        .collect()
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

fn internal_error(e: sqlx::Error) -> Response {
    log::error!("database error: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn fire_accepts_valid_numbers() {
        let body = json!({ "monthly_income": 10000, "monthly_expenses": 4000 });
        let response = fire_projection(Some(Json(body))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let payload = body_json(response).await;
        assert_eq!(payload["fire_number"], json!(1_200_000.0));
        assert!(payload["years_to_fire"].as_u64().is_some());
    }

    #[tokio::test]
    async fn fire_rejects_non_numeric_fields() {
        let cases = [
            json!({ "monthly_income": "lots", "monthly_expenses": 4000 }),
            json!({ "monthly_expenses": 4000 }),
            json!({ "monthly_income": 10000, "monthly_expenses": 4000, "return_rate": "high" }),
            json!({ "monthly_income": 10000, "monthly_expenses": 4000, "return_rate": null }),
        ];
        for body in cases {
            let response = fire_projection(Some(Json(body.clone()))).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "case {body}");
            let payload = body_json(response).await;
            assert_eq!(payload["error"], json!(INVALID_FIRE_INPUT));
        }
    }

    #[tokio::test]
    async fn fire_rejects_missing_body() {
        let response = fire_projection(None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn fire_maps_computation_failure_to_422() {
        let body = json!({
            "monthly_income": f64::MAX,
            "monthly_expenses": 1.0,
            "return_rate": 1.0e308,
        });
        let response = fire_projection(Some(Json(body))).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let payload = body_json(response).await;
        let message = payload["error"].as_str().unwrap();
        assert!(message.starts_with("Calculation error:"));
    }

    #[test]
    fn parse_entry_accepts_number_and_string_amounts() {
        let from_number = parse_entry(&json!({ "name": "Fund", "amount": 250.5 })).unwrap();
        assert_eq!(from_number.amount, Decimal::from_str_exact("250.5").unwrap());

        let from_string = parse_entry(&json!({ "name": "Fund", "amount": "99.99" })).unwrap();
        assert_eq!(from_string.amount, Decimal::from_str_exact("99.99").unwrap());
    }

    #[test]
    fn parse_entry_rejects_bad_input() {
        assert!(parse_entry(&json!({ "name": "  ", "amount": 10 })).is_err());
        assert!(parse_entry(&json!({ "amount": 10 })).is_err());
        assert!(parse_entry(&json!({ "name": "Fund", "amount": "abc" })).is_err());
        assert!(parse_entry(&json!({ "name": "Fund", "amount": -1 })).is_err());
        assert!(parse_entry(&json!({ "name": "Fund" })).is_err());
    }
}
