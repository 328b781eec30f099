//! Order history route handler.
//!
//! Read-only views of backend-provided orders. A failed fetch renders the
//! empty state rather than an error page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use gadgetmart_core::Paise;

use crate::backend::types::{Order, OrderItem};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Order display data for templates.
#[derive(Clone)]
pub struct OrderView {
    pub number: String,
    pub total: String,
    pub status: String,
    pub is_paid: bool,
    pub date: String,
    pub items: Vec<OrderItemView>,
}

/// Order line display data for templates.
#[derive(Clone)]
pub struct OrderItemView {
    pub name: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            number: order.order_number.clone(),
            total: Paise::from_rupees_f64(order.total_amount).display(),
            status: order.status.to_string(),
            is_paid: order.status.is_paid(),
            date: order.created_at.format("%b %e, %Y").to_string(),
            items: order.order_items.iter().map(OrderItemView::from).collect(),
        }
    }
}

impl From<&OrderItem> for OrderItemView {
    fn from(item: &OrderItem) -> Self {
        Self {
            name: item.product_name.clone(),
            quantity: item.quantity,
            line_total: (Paise::from_rupees_f64(item.price) * item.quantity).display(),
        }
    }
}

/// Order history page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersTemplate {
    pub orders: Vec<OrderView>,
}

/// Display the order history page.
#[instrument(skip(state, authed))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(authed): RequireAuth,
) -> impl IntoResponse {
    let orders = match state
        .orders_api()
        .list(&authed.token, &authed.user.email)
        .await
    {
        Ok(orders) => orders.iter().map(OrderView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch order history: {e}");
            Vec::new()
        }
    };

    OrdersTemplate { orders }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use gadgetmart_core::OrderStatus;

    #[test]
    fn order_view_formats_totals_and_date() {
        let order = Order {
            order_number: "GM-1722500000000".to_string(),
            total_amount: 139_998.0,
            status: OrderStatus::Paid,
            created_at: chrono::Utc.with_ymd_and_hms(2026, 7, 30, 8, 0, 0).unwrap(),
            order_items: vec![OrderItem {
                product_name: "iPhone 16 Pro Max".to_string(),
                quantity: 2,
                price: 69_999.0,
            }],
        };

        let view = OrderView::from(&order);
        assert_eq!(view.total, "₹1,39,998");
        assert!(view.is_paid);
        assert_eq!(view.status, "PAID");
        assert!(view.date.contains("2026"));
        assert_eq!(view.items[0].line_total, "₹1,39,998");
    }
}
