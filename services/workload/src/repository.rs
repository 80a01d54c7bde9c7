//! Workload repository for order-store reads.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use shared::types::{OrderItem, OrderStatus};

/// One active order with the line items that drive its time estimate.
#[derive(Debug, Clone)]
pub struct ActiveOrder {
    pub id: Uuid,
    pub items: Vec<OrderItem>,
}

/// Read side of the order store used for workload estimation.
#[async_trait]
pub trait WorkloadStore: Send + Sync {
    /// All orders assigned to the technician that still consume capacity.
    async fn active_orders(&self, technician_id: &str) -> Result<Vec<ActiveOrder>>;
}

pub struct PgWorkloadRepository {
    pool: PgPool,
}

impl PgWorkloadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkloadStore for PgWorkloadRepository {
    async fn active_orders(&self, technician_id: &str) -> Result<Vec<ActiveOrder>> {
        let statuses: Vec<String> = OrderStatus::ACTIVE
            .iter()
            .map(|status| status.as_str().to_string())
            .collect();

        // Line items join their service type for the estimate and the
        // shared-time flag. Row order fixes the discount grouping, so
        // it is part of the contract, not cosmetic.
        let rows = sqlx::query(
            "SELECT o.id AS order_id, i.id AS item_id, i.service_type_id, i.quantity,
                    st.estimated_hours, st.shared_time
             FROM orders o
             JOIN order_items i ON i.order_id = o.id
             JOIN service_types st ON st.id = i.service_type_id
             WHERE o.technician_id = $1 AND o.status = ANY($2)
             ORDER BY o.created_at, o.id, i.created_at",
        )
        .bind(technician_id)
        .bind(&statuses)
        .fetch_all(&self.pool)
        .await?;

        let mut orders: Vec<ActiveOrder> = Vec::new();
        for row in rows {
            let order_id: Uuid = row.get("order_id");
            let item = OrderItem {
                id: row.get("item_id"),
                estimated_hours: row.get("estimated_hours"),
                shared_time: row.get("shared_time"),
                service_type_id: row.get("service_type_id"),
                quantity: row.get::<i32, _>("quantity").max(1) as u32,
                status: None,
            };

            match orders.last_mut() {
                Some(order) if order.id == order_id => order.items.push(item),
                _ => orders.push(ActiveOrder {
                    id: order_id,
                    items: vec![item],
                }),
            }
        }

        tracing::debug!(technician_id, orders = orders.len(), "fetched active orders");
        Ok(orders)
    }
}
