//! HTTP handlers of the `/api` scope.
//!
//! Every response, errors included, is an [`ApiResponse`] envelope.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;

use crate::dto::Paged;
use crate::envelope::ApiResponse;
use crate::query::ListQuery;
use crate::services::{ServiceError, ServiceResult};

pub mod care;
pub mod care_activities;
pub mod customers;
pub mod employees;
pub mod quotations;
pub mod reject;
pub mod service_prices;
pub mod users;

/// Maps a service failure onto the status table of the API.
pub fn error_response(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().json(ApiResponse::<()>::failure(
            "Phiên đăng nhập không hợp lệ, vui lòng đăng nhập lại",
        )),
        ServiceError::Forbidden => HttpResponse::Forbidden().json(ApiResponse::<()>::failure(
            "Bạn không có quyền thực hiện thao tác này",
        )),
        ServiceError::NotFound => {
            HttpResponse::NotFound().json(ApiResponse::<()>::failure("Không tìm thấy dữ liệu"))
        }
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            log::debug!("Rejected request to {action}: {message}");
            HttpResponse::BadRequest().json(ApiResponse::<()>::failure(message))
        }
        ServiceError::Conflict(message) => {
            log::info!("Refused to {action}: {message}");
            HttpResponse::Conflict().json(ApiResponse::<()>::failure(message))
        }
        ServiceError::Internal => {
            log::error!("Failed to {action}");
            HttpResponse::InternalServerError().json(ApiResponse::<()>::failure(
                "Đã xảy ra lỗi, vui lòng thử lại sau",
            ))
        }
    }
}

/// `200` with the payload, or the mapped error.
pub fn respond<T: Serialize>(result: ServiceResult<T>, action: &str) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::Ok().json(ApiResponse::ok(data)),
        Err(err) => error_response(err, action),
    }
}

/// `200` with a page of rows and its pagination block.
pub fn respond_page<T: Serialize>(result: ServiceResult<Paged<T>>, action: &str) -> HttpResponse {
    match result {
        Ok(page) => HttpResponse::Ok().json(ApiResponse::page(page.items, page.pagination)),
        Err(err) => error_response(err, action),
    }
}

/// `200` with only a confirmation message.
pub fn respond_done(result: ServiceResult<()>, message: &str, action: &str) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::<()>::done(message)),
        Err(err) => error_response(err, action),
    }
}

pub fn list_query(req: &HttpRequest) -> ServiceResult<ListQuery> {
    Ok(ListQuery::from_query_string(req.query_string())?)
}

/// Malformed JSON bodies answer with the envelope instead of plain text.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected JSON payload: {err}");
    let response = HttpResponse::BadRequest().json(ApiResponse::<()>::failure(format!(
        "Dữ liệu gửi lên không hợp lệ: {err}"
    )));
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    use super::*;

    async fn body_of(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn conflict_keeps_the_business_message() {
        let response = error_response(
            ServiceError::Conflict("Chỉ xóa được nhóm khi không còn kết quả chăm sóc".into()),
            "delete care group",
        );

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_of(response).await,
            serde_json::json!({
                "success": false,
                "message": "Chỉ xóa được nhóm khi không còn kết quả chăm sóc"
            })
        );
    }

    #[actix_web::test]
    async fn statuses_follow_the_error_kind() {
        let cases = [
            (ServiceError::Unauthorized, StatusCode::UNAUTHORIZED),
            (ServiceError::Forbidden, StatusCode::FORBIDDEN),
            (ServiceError::NotFound, StatusCode::NOT_FOUND),
            (ServiceError::Form("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::TypeConstraint("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            let response = error_response(err, "test");
            assert_eq!(response.status(), status);
            assert_eq!(body_of(response).await["success"], false);
        }
    }

    #[actix_web::test]
    async fn delete_confirmation_has_no_data() {
        let response = respond_done(Ok(()), "Đã xóa", "delete");
        assert_eq!(
            body_of(response).await,
            serde_json::json!({"success": true, "message": "Đã xóa"})
        );
    }
}
