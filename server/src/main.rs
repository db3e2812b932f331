use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use common::{
    db,
    error::StoreError,
    models::{CustomerDraft, LeadDraft},
    store::{CustomerStore, LeadStore},
};
use config::Config;
use dotenv::dotenv;
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;

struct AppState {
    customers: CustomerStore,
    leads: LeadStore,
}

fn store_error(err: StoreError) -> HttpResponse {
    match err {
        StoreError::MissingField(field) => HttpResponse::BadRequest().json(json!({
            "error": format!("{} is required", field),
        })),
        StoreError::Db(err) => {
            error!("Database error: {}", err);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[actix_web::get("/")]
async fn dashboard(app_state: web::Data<AppState>) -> impl Responder {
    let AppState { customers, leads } = &**app_state;

    let total_customers = match customers.count().await {
        Ok(total) => total,
        Err(err) => return store_error(err),
    };
    let total_leads = match leads.count().await {
        Ok(total) => total,
        Err(err) => return store_error(err),
    };
    let lead_stats = match leads.status_breakdown().await {
        Ok(stats) => stats,
        Err(err) => return store_error(err),
    };

    HttpResponse::Ok().json(json!({
        "total_customers": total_customers,
        "total_leads": total_leads,
        "lead_stats": lead_stats,
    }))
}

#[actix_web::get("/customers")]
async fn list_customers(app_state: web::Data<AppState>) -> impl Responder {
    match app_state.customers.list_all().await {
        Ok(customers) => HttpResponse::Ok().json(customers),
        Err(err) => store_error(err),
    }
}

#[actix_web::post("/customers/add")]
async fn add_customer(
    form: web::Form<CustomerDraft>,
    app_state: web::Data<AppState>,
) -> impl Responder {
    match app_state.customers.add(form.into_inner()).await {
        Ok(customer) => {
            info!("Created customer {} ({})", customer.id, customer.name);
            HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/customers"))
                .finish()
        }
        Err(err) => store_error(err),
    }
}

#[actix_web::get("/leads")]
async fn list_leads(app_state: web::Data<AppState>) -> impl Responder {
    match app_state.leads.list_all().await {
        Ok(leads) => HttpResponse::Ok().json(leads),
        Err(err) => store_error(err),
    }
}

#[actix_web::post("/leads/add")]
async fn add_lead(form: web::Form<LeadDraft>, app_state: web::Data<AppState>) -> impl Responder {
    match app_state.leads.add(form.into_inner()).await {
        Ok(lead) => {
            info!(
                "Created lead {} for {} worth {}",
                lead.id, lead.customer_name, lead.value
            );
            HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/leads"))
                .finish()
        }
        Err(err) => store_error(err),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;

    let pool = db::establish_connection(&config.database_url).await?;
    db::init_schema(&pool).await?;

    let app_state = web::Data::new(AppState {
        customers: CustomerStore::new(pool.clone()),
        leads: LeadStore::new(pool),
    });

    info!("Starting the crm server on {}", config.server_address());

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(dashboard)
            .service(list_customers)
            .service(add_customer)
            .service(list_leads)
            .service(add_lead)
    })
    .bind(config.server_address())?
    .run()
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_state() -> web::Data<AppState> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory pool");
        db::init_schema(&pool).await.expect("Failed to create schema");

        web::Data::new(AppState {
            customers: CustomerStore::new(pool.clone()),
            leads: LeadStore::new(pool),
        })
    }

    #[actix_web::test]
    async fn add_customer_redirects_to_list() {
        let state = test_state().await;
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(add_customer)
                .service(list_customers),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/customers/add")
            .set_form([("name", "Acme"), ("email", "sales@acme.test")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/customers"
        );

        let req = test::TestRequest::get().uri("/customers").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["name"], "Acme");
    }

    #[actix_web::test]
    async fn add_customer_without_name_is_rejected() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state).service(add_customer)).await;

        let req = test::TestRequest::post()
            .uri("/customers/add")
            .set_form([("email", "sales@acme.test")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn add_lead_redirects_to_list() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state).service(add_lead)).await;

        let req = test::TestRequest::post()
            .uri("/leads/add")
            .set_form([("customer_name", "Acme"), ("value", "99.5")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/leads");
    }

    #[actix_web::test]
    async fn dashboard_reports_totals_and_breakdown() {
        let state = test_state().await;
        for status in ["New", "New", "Won", "Lost", "Contacted"] {
            state
                .leads
                .add(LeadDraft {
                    customer_name: Some("Acme".to_string()),
                    value: None,
                    status: Some(status.to_string()),
                })
                .await
                .expect("Failed to seed lead");
        }
        state
            .customers
            .add(CustomerDraft {
                name: Some("Acme".to_string()),
                ..Default::default()
            })
            .await
            .expect("Failed to seed customer");

        let app = test::init_service(App::new().app_data(state).service(dashboard)).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total_customers"], 1);
        assert_eq!(body["total_leads"], 5);
        assert_eq!(
            body["lead_stats"],
            json!({ "New": 2, "Contacted": 1, "Won": 1, "Lost": 1 })
        );
    }
}
