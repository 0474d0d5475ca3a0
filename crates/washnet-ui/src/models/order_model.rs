use std::sync::mpsc::Receiver;

use washnet_services::{format_date, Order, OrderError, OrderSearch, EMPTY_NAME_MESSAGE};

use crate::services::OrderServiceMessage;

pub const NO_ORDERS_MESSAGE: &str =
    "No orders found for this name. Please check your name and try again.";

/// Banner under the search form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchNotice {
    /// Search succeeded with zero orders
    NoOrders,
    /// Validation or transport failure, already worded for the customer
    Error(String),
}

impl SearchNotice {
    pub fn message(&self) -> &str {
        match self {
            SearchNotice::NoOrders => NO_ORDERS_MESSAGE,
            SearchNotice::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SearchNotice::Error(_))
    }
}

/// Flattened order for rendering a card
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCard {
    pub title: String,
    pub status: String,
    pub status_color: &'static str,
    pub total: String,
    pub service: &'static str,
    pub delivery: &'static str,
    pub items: Vec<String>,
    pub pickup_date: String,
    pub delivery_date: String,
    pub created: String,
    pub notes: Option<String>,
}

impl From<&Order> for OrderCard {
    fn from(order: &Order) -> Self {
        Self {
            title: format!("Order #{}", order.id),
            status: order.status.as_str().to_uppercase(),
            status_color: order.status.color(),
            total: order.total_display(),
            service: order.service_type.label(),
            delivery: order.delivery_method.label(),
            items: order.item_badges(),
            pickup_date: format_date(order.pickup_date.as_deref()),
            delivery_date: format_date(order.delivery_date.as_deref()),
            created: format_date(order.created_at.as_deref()),
            notes: order.notes.clone().filter(|n| !n.trim().is_empty()),
        }
    }
}

/// Customer-facing "track my order" form
#[derive(Debug, Default)]
pub struct OrderSearchModel {
    customer_name: String,
    loading: bool,
    orders: Vec<Order>,
    notice: Option<SearchNotice>,
}

impl OrderSearchModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn cards(&self) -> Vec<OrderCard> {
        self.orders.iter().map(OrderCard::from).collect()
    }

    pub fn notice(&self) -> Option<&SearchNotice> {
        self.notice.as_ref()
    }

    /// Validate the form and mark a search as started.
    ///
    /// Returns the name to search for, or `None` when the name is blank
    /// (the notice is set and no request should be made).
    pub fn begin_search(&mut self) -> Option<String> {
        if self.customer_name.trim().is_empty() {
            self.notice = Some(SearchNotice::Error(EMPTY_NAME_MESSAGE.to_string()));
            return None;
        }

        self.loading = true;
        self.notice = None;
        Some(self.customer_name.clone())
    }

    /// Apply a finished search. Failed searches keep the previous results.
    pub fn finish_search(&mut self, result: Result<Vec<Order>, OrderError>) {
        self.loading = false;
        match result {
            Ok(orders) => {
                tracing::debug!("Search returned {} orders", orders.len());
                self.notice = orders.is_empty().then_some(SearchNotice::NoOrders);
                self.orders = orders;
            }
            Err(e) => {
                tracing::error!("Error searching orders: {}", e);
                self.notice = Some(SearchNotice::Error(e.user_message()));
            }
        }
    }

    /// Run a search to completion against `client`
    pub async fn search<S: OrderSearch>(&mut self, client: &S) {
        let Some(name) = self.begin_search() else {
            return;
        };
        let result = client.search_orders(&name).await;
        self.finish_search(result);
    }

    /// Drain pending service messages. Returns true if anything changed.
    pub fn poll(&mut self, rx: &Receiver<OrderServiceMessage>) -> bool {
        let mut changed = false;
        while let Ok(message) = rx.try_recv() {
            match message {
                OrderServiceMessage::SearchDone(result) => {
                    self.finish_search(result);
                    changed = true;
                }
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use washnet_core::NetworkError;
    use washnet_services::{OrderStatus, GENERIC_SEARCH_ERROR};

    fn order(id: u64, status: &str) -> Order {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "customer_name": "Maria Santos",
            "items": [{"name": "Bedsheets", "quantity": 2}],
            "total_amount": "180.00",
            "status": status,
            "service_type": "wash_dry",
            "delivery_method": "deliver",
            "notes": "  "
        }))
        .unwrap()
    }

    /// Fake backend that answers with canned results and counts calls
    struct FakeOrders {
        calls: AtomicUsize,
        reply: fn() -> Result<Vec<Order>, OrderError>,
    }

    impl FakeOrders {
        fn new(reply: fn() -> Result<Vec<Order>, OrderError>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply,
            }
        }
    }

    impl OrderSearch for FakeOrders {
        async fn search_orders(&self, _customer_name: &str) -> Result<Vec<Order>, OrderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.reply)()
        }
    }

    #[tokio::test]
    async fn test_blank_name_never_calls_backend() {
        let fake = FakeOrders::new(|| Ok(vec![]));
        let mut model = OrderSearchModel::new();
        model.set_customer_name("   ");

        model.search(&fake).await;

        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            model.notice(),
            Some(&SearchNotice::Error("Please enter your name".into()))
        );
        assert!(!model.loading());
    }

    #[tokio::test]
    async fn test_zero_orders_is_not_an_error() {
        let fake = FakeOrders::new(|| Ok(vec![]));
        let mut model = OrderSearchModel::new();
        model.set_customer_name("Nobody");

        model.search(&fake).await;

        let notice = model.notice().unwrap();
        assert_eq!(notice, &SearchNotice::NoOrders);
        assert!(!notice.is_error());
        assert_eq!(notice.message(), NO_ORDERS_MESSAGE);
        assert!(model.orders().is_empty());
    }

    #[tokio::test]
    async fn test_results_replace_orders_and_clear_notice() {
        let fake = FakeOrders::new(|| Ok(vec![order(1, "processing"), order(2, "cancelled")]));
        let mut model = OrderSearchModel::new();
        model.set_customer_name("Maria Santos");

        model.search(&fake).await;

        assert_eq!(fake.calls.load(Ordering::SeqCst), 1);
        assert!(model.notice().is_none());
        assert_eq!(model.orders().len(), 2);
        assert_eq!(model.orders()[1].status, OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_failure_uses_server_message_and_keeps_results() {
        let mut model = OrderSearchModel::new();
        model.set_customer_name("Maria Santos");
        model.search(&FakeOrders::new(|| Ok(vec![order(1, "ready")]))).await;

        let failing = FakeOrders::new(|| {
            Err(OrderError::Api {
                status: 422,
                message: Some("The customer name field is required.".into()),
            })
        });
        model.search(&failing).await;

        let notice = model.notice().unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.message(), "The customer name field is required.");
        assert_eq!(model.orders().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_generic() {
        let fake = FakeOrders::new(|| Err(NetworkError::Timeout.into()));
        let mut model = OrderSearchModel::new();
        model.set_customer_name("Maria Santos");

        model.search(&fake).await;

        assert_eq!(model.notice().unwrap().message(), GENERIC_SEARCH_ERROR);
    }

    #[test]
    fn test_begin_search_sets_loading() {
        let mut model = OrderSearchModel::new();
        model.set_customer_name("Maria");
        assert_eq!(model.begin_search().as_deref(), Some("Maria"));
        assert!(model.loading());
    }

    #[test]
    fn test_card_projection() {
        let card = OrderCard::from(&order(12, "processing"));

        assert_eq!(card.title, "Order #12");
        assert_eq!(card.status, "PROCESSING");
        assert_eq!(card.status_color, "#17a2b8");
        assert_eq!(card.total, "₱180.00");
        assert_eq!(card.service, "Wash & Dry");
        assert_eq!(card.delivery, "📦 Delivery Only");
        assert_eq!(card.items, vec!["Bedsheets (x2)".to_string()]);
        assert_eq!(card.pickup_date, "Not set");
        assert_eq!(card.delivery_date, "Not set");
        assert!(card.notes.is_none());
    }

    #[test]
    fn test_poll_applies_search_result() {
        let (tx, rx) = mpsc::channel();
        let mut model = OrderSearchModel::new();
        model.set_customer_name("Maria");
        model.begin_search();

        tx.send(OrderServiceMessage::SearchDone(Ok(vec![order(3, "pending")])))
            .unwrap();

        assert!(model.poll(&rx));
        assert!(!model.loading());
        assert_eq!(model.cards()[0].status_color, "#ffc107");
    }
}
