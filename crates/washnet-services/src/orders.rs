// crates/washnet-services/src/orders.rs

use reqwest::{header, Client, Response};
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use washnet_core::{NetworkError, ReqwestErrorExt};

use crate::endpoints::ApiEndpoints;
use crate::error::OrderError;
use crate::order::Order;

/// Anything that can look up a customer's orders by name.
///
/// An empty vector means the lookup worked and found nothing.
pub trait OrderSearch: Send + Sync {
    fn search_orders(
        &self,
        customer_name: &str,
    ) -> impl Future<Output = Result<Vec<Order>, OrderError>> + Send;
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// HTTP client for the laundry order API
#[derive(Debug, Clone)]
pub struct OrderClient {
    client: Arc<Client>,
    endpoints: ApiEndpoints,
}

impl OrderClient {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: &str) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("WASHNET/0.1.0")
            .build()
            .map_err(ReqwestErrorExt::into_network_error)?;

        Ok(Self {
            client: Arc::new(client),
            endpoints: ApiEndpoints::new(base_url),
        })
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    /// Search orders by customer name.
    ///
    /// The name is sent as typed; blank names are rejected without a request.
    #[instrument(skip(self))]
    pub async fn search(&self, customer_name: &str) -> Result<Vec<Order>, OrderError> {
        if customer_name.trim().is_empty() {
            return Err(OrderError::EmptyName);
        }

        let response = self
            .client
            .get(self.endpoints.order_search())
            .query(&[("customer_name", customer_name)])
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| e.into_network_error())?;

        let response = check_response(response).await?;
        let body = response.text().await.map_err(|e| e.into_network_error())?;
        let orders: Vec<Order> = serde_json::from_str(&body)
            .map_err(|e| OrderError::InvalidResponse(e.to_string()))?;

        tracing::info!("Found {} orders", orders.len());
        Ok(orders)
    }
}

impl OrderSearch for OrderClient {
    async fn search_orders(&self, customer_name: &str) -> Result<Vec<Order>, OrderError> {
        self.search(customer_name).await
    }
}

/// Map a non-success response to `OrderError::Api`, keeping the server message
async fn check_response(response: Response) -> Result<Response, OrderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty());

    tracing::warn!(status = status.as_u16(), "Order search failed: {}", body);
    Err(OrderError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_uses_configured_base() {
        let client = OrderClient::new("http://laundry.local:8000/").unwrap();
        assert_eq!(
            client.endpoints().order_search(),
            "http://laundry.local:8000/api/orders/search"
        );
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected_locally() {
        // Unroutable base: any request would fail with a network error
        let client = OrderClient::new("http://127.0.0.1:1").unwrap();
        let err = client.search("   ").await.unwrap_err();
        assert!(matches!(err, OrderError::EmptyName));
    }
}
