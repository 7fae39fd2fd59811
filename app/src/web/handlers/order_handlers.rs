// storefront/src/web/handlers/order_handlers.rs

use crate::session::Visitor;
use crate::state::AppState;
use crate::web::views::OrderSummaryView;
use actix_web::{web, HttpResponse};
use tracing::{instrument, warn};

#[instrument(name = "handler::order_summary", skip(app_state, visitor))]
pub async fn order_summary_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  visitor: Visitor,
) -> HttpResponse {
  let order_id = path.into_inner();
  let order = match app_state.orders.find(&order_id).await {
    Ok(order) => order,
    Err(e) => {
      warn!(%order_id, error = %e, "Could not read the order ledger.");
      None
    }
  };

  HttpResponse::Ok().json(OrderSummaryView {
    order_id,
    order,
    cart_total: visitor.cart_total(),
    flashes: visitor.take_flashes(),
  })
}
