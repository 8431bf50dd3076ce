use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` whose rejections render as the service's `{message}` error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
