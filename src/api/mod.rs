use axum::extract::FromRequest;

use crate::error::AppError;

pub mod health;
pub mod plagiarism;

/// JSON body whose rejections render as the failure envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
