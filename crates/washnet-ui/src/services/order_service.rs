//! Order backend: async order search.
//! All network work runs off the UI thread; results sent via mpsc.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use tokio::runtime::Handle;
use washnet_services::{Order, OrderError, OrderSearch};

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum OrderServiceMessage {
    /// Result of searching orders by customer name
    SearchDone(Result<Vec<Order>, OrderError>),
}

/// Request an order search asynchronously.
/// Sends `SearchDone` on the channel when complete.
pub fn request_search<S>(
    tx: &Sender<OrderServiceMessage>,
    runtime: &Handle,
    client: Arc<S>,
    customer_name: String,
) where
    S: OrderSearch + 'static,
{
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = client.search_orders(&customer_name).await;
        if tx.send(OrderServiceMessage::SearchDone(result)).is_err() {
            tracing::debug!("Order receiver dropped before search finished");
        }
    });
}
