// storefront/src/web/routes.rs

use crate::web::handlers::{admin_handlers, cart_handlers, catalog_handlers, checkout_handlers, order_handlers};
use actix_web::{web, HttpResponse};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/", web::get().to(catalog_handlers::catalog_handler))
    .route("/health", web::get().to(health_check_handler))
    .service(
      web::scope("/cart")
        .route("", web::get().to(cart_handlers::view_cart_handler))
        .route("/add", web::post().to(cart_handlers::add_to_cart_handler))
        .route("/update", web::post().to(cart_handlers::update_cart_handler)),
    )
    .service(
      web::resource("/checkout")
        .route(web::get().to(checkout_handlers::checkout_page_handler))
        .route(web::post().to(checkout_handlers::checkout_submit_handler)),
    )
    .route("/order/{order_id}", web::get().to(order_handlers::order_summary_handler))
    .service(
      web::scope("/admin")
        .service(
          web::resource("/login")
            .route(web::get().to(admin_handlers::login_page_handler))
            .route(web::post().to(admin_handlers::login_submit_handler)),
        )
        .route("/products", web::get().to(admin_handlers::admin_products_handler))
        .route("/products/update", web::post().to(admin_handlers::save_product_handler))
        .route("/logout", web::get().to(admin_handlers::logout_handler)),
    );
}
