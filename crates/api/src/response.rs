//! Shared response envelope types for API handlers.
//!
//! Every JSON response is `{ "success": bool, "message": string, ... }`.
//! Successful responses flatten a typed payload next to those two fields;
//! error responses are produced by [`AppError`](crate::error::AppError).

use serde::Serialize;

/// Standard `{ "success", "message", ...payload }` envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(Envelope::ok("Search completed successfully", ListPayload::new(items))))
/// ```
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub payload: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(message: impl Into<String>, payload: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload,
        }
    }
}

/// `{ "data": T }`
#[derive(Debug, Serialize)]
pub struct DataPayload<T: Serialize> {
    pub data: T,
}

/// `{ "count": n, "data": [...] }`
#[derive(Debug, Serialize)]
pub struct ListPayload<T: Serialize> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T: Serialize> ListPayload<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// A list payload with the request's criteria echoed alongside it.
#[derive(Debug, Serialize)]
pub struct EchoListPayload<E: Serialize, T: Serialize> {
    #[serde(flatten)]
    pub echo: E,
    #[serde(flatten)]
    pub list: ListPayload<T>,
}

/// `{ "insertedCount": n, "insertedIds": [...] }`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertedPayload {
    pub inserted_count: usize,
    pub inserted_ids: Vec<String>,
}
