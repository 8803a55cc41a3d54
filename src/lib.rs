//! Care CRM: a JSON API for customers, staff, care follow-ups and quotations,
//! plus the list controller the dashboard uses to page through it.

pub mod envelope;
pub mod pagination;
pub mod query;

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "client")]
pub mod client;

pub const SERVICE_ACCESS_ROLE: &str = "crm";
pub const SERVICE_ADMIN_ROLE: &str = "crm_admin";

#[cfg(feature = "server")]
pub use server::{api_scope, run};

#[cfg(feature = "server")]
mod server {
    use actix_cors::Cors;
    use actix_files::Files;
    use actix_web::{App, HttpServer, Scope, middleware, web};

    use crate::db::establish_connection_pool;
    use crate::models::config::ServerConfig;
    use crate::repository::DieselRepository;
    use crate::routes::care::{
        create_care_group, create_care_result, delete_care_group, delete_care_result,
        list_care_groups, list_care_results, update_care_group, update_care_result,
    };
    use crate::routes::care_activities::{
        create_care_activity, delete_care_activity, list_care_activities,
    };
    use crate::routes::customers::{
        create_customer, delete_customer, list_customers, show_customer, update_customer,
        upload_customers,
    };
    use crate::routes::employees::{
        create_employee, delete_employee, list_employees, show_employee, update_employee,
    };
    use crate::routes::json_error_handler;
    use crate::routes::quotations::{
        create_quotation, delete_quotation, list_quotations, show_quotation, update_quotation,
    };
    use crate::routes::reject::{
        create_reject_group, create_reject_reason, delete_reject_group, delete_reject_reason,
        list_reject_groups, list_reject_reasons, update_reject_group, update_reject_reason,
    };
    use crate::routes::service_prices::{
        create_service_price, delete_service_price, list_service_prices, update_service_price,
    };
    use crate::routes::users::current_user;

    /// All JSON endpoints mounted under `/api`.
    pub fn api_scope() -> Scope {
        web::scope("/api")
            .service(current_user)
            .service(upload_customers)
            .service(list_customers)
            .service(show_customer)
            .service(create_customer)
            .service(update_customer)
            .service(delete_customer)
            .service(list_employees)
            .service(show_employee)
            .service(create_employee)
            .service(update_employee)
            .service(delete_employee)
            .service(list_care_groups)
            .service(create_care_group)
            .service(update_care_group)
            .service(delete_care_group)
            .service(list_care_results)
            .service(create_care_result)
            .service(update_care_result)
            .service(delete_care_result)
            .service(list_reject_groups)
            .service(create_reject_group)
            .service(update_reject_group)
            .service(delete_reject_group)
            .service(list_reject_reasons)
            .service(create_reject_reason)
            .service(update_reject_reason)
            .service(delete_reject_reason)
            .service(list_service_prices)
            .service(create_service_price)
            .service(update_service_price)
            .service(delete_service_price)
            .service(list_quotations)
            .service(show_quotation)
            .service(create_quotation)
            .service(update_quotation)
            .service(delete_quotation)
            .service(list_care_activities)
            .service(create_care_activity)
            .service(delete_care_activity)
    }

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        // Establish Diesel connection pool for the SQLite database.
        let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
            std::io::Error::other(format!("Failed to establish database connection: {e}"))
        })?;

        let repo = DieselRepository::new(pool);

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!("Starting server on {}:{}", bind_address.0, bind_address.1);

        HttpServer::new(move || {
            let mut app = App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new(repo.clone()))
                .app_data(web::Data::new(server_config.clone()))
                .service(api_scope());

            if let Some(assets_dir) = &server_config.assets_dir {
                app = app.service(Files::new("/assets", assets_dir).index_file("index.html"));
            }

            app
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
