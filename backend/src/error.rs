//! # 에러 처리 모듈
//!
//! 핸들러에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 검증/미존재/메서드/내부 에러를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 `{ "error": "..." }` 형태의 HTTP 응답으로 자동 변환

use axum::{
    extract::rejection::{JsonRejection, QueryRejection}, // 요청 파싱 실패(추출자 거부) 타입
    http::StatusCode,                   // HTTP 상태 코드 (200, 400, 404 등)
    response::{IntoResponse, Response}, // HTTP 응답 변환 트레이트
    Json,                               // JSON 응답 래퍼
};
use serde_json::json; // json!() 매크로: JSON 값을 간편하게 생성
use thiserror::Error; // #[derive(Error)]: 에러 타입 자동 구현

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 각 에러 variant는 적절한 HTTP 상태 코드와 메시지로 변환됩니다.
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 필수 값 누락, 잘못된 형식 등 (HTTP 400)
    #[error("{0}")]
    BadRequest(String),

    /// 요청한 행이 없음 (HTTP 404)
    /// 메시지는 리소스마다 다릅니다. (예: "Article not found")
    #[error("{0}")]
    NotFound(String),

    /// 요청 본문이 허용 크기를 넘음 (HTTP 413)
    /// 이미지는 base64로 JSON 본문에 실려 오므로 본문 크기 제한에 걸릴 수 있습니다.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// 라우트가 지원하지 않는 HTTP 메서드 (HTTP 405)
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// 서버 내부 오류 (HTTP 500)
    #[error("{0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx 함수 결과에 `?`를 쓰면 자동으로 AppError::Database로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 파일 입출력 오류 (HTTP 500) — 로컬 오브젝트 저장소 쓰기 실패 등
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 직렬화 오류 (HTTP 500) — tags 배열을 컬럼 값으로 만들 때
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// 기사 조회/수정/삭제 대상이 없을 때 쓰는 404 에러
    pub fn article_not_found() -> Self {
        AppError::NotFound("Article not found".to_string())
    }

    /// 에러에 대응하는 HTTP 상태 코드
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_)
            | AppError::Database(_)
            | AppError::Io(_)
            | AppError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// 잘못된 JSON 본문은 Axum 기본 응답(text/plain) 대신 우리 에러 형식으로 바꿉니다.
// 핸들러에서 `Result<Json<T>, JsonRejection>`을 받고 `body?`로 꺼내면 이 변환이 쓰입니다.
// 본문 크기 초과는 413을 유지하고, 나머지 파싱 실패는 모두 400으로 응답합니다.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(rejection.body_text()),
            _ => AppError::BadRequest(rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<base64::DecodeError> for AppError {
    fn from(err: base64::DecodeError) -> Self {
        AppError::BadRequest(format!("Invalid image data: {err}"))
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 모든 에러는 `{ "error": "<메시지>" }` 형태의 JSON 본문을 가집니다.
    /// 500 계열은 클라이언트가 원인을 볼 수 있도록 에러 문자열을 그대로 싣고,
    /// 같은 내용을 서버 로그에도 남깁니다.
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        // 결과: { "error": "Article not found" }
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
