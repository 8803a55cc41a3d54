use actix_web::{HttpRequest, Responder, delete, get, post, web};

use crate::auth::AuthenticatedUser;
use crate::forms::care_activities::CareActivityForm;
use crate::repository::DieselRepository;
use crate::routes::{list_query, respond, respond_done, respond_page};
use crate::services::care_activities as care_activities_service;

#[get("/care-activities")]
pub async fn list_care_activities(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = list_query(&req).and_then(|query| {
        care_activities_service::list_care_activities(repo.get_ref(), &user, &query)
    });
    respond_page(result, "list care activities")
}

#[post("/care-activities")]
pub async fn create_care_activity(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CareActivityForm>,
) -> impl Responder {
    respond(
        care_activities_service::create_care_activity(repo.get_ref(), &user, form),
        "record care activity",
    )
}

#[delete("/care-activities/{id}")]
pub async fn delete_care_activity(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond_done(
        care_activities_service::delete_care_activity(repo.get_ref(), &user, id.into_inner()),
        "Đã xóa lịch sử chăm sóc",
        "delete care activity",
    )
}
