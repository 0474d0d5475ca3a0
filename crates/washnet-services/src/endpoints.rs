//! URLs of the laundry backend, derived from one base URL.

/// Default backend when `WASHNET_API_URL` is not set
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    base_url: String,
}

impl ApiEndpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // Authentication
    pub fn login(&self) -> String {
        self.url("login")
    }

    pub fn register(&self) -> String {
        self.url("register")
    }

    pub fn logout(&self) -> String {
        self.url("logout")
    }

    pub fn me(&self) -> String {
        self.url("me")
    }

    // Orders
    pub fn orders(&self) -> String {
        self.url("orders")
    }

    pub fn order_search(&self) -> String {
        self.url("orders/search")
    }

    pub fn order_statistics(&self) -> String {
        self.url("orders/statistics")
    }

    pub fn order_employee_overview(&self) -> String {
        self.url("orders/employee-overview")
    }

    pub fn analytics(&self) -> String {
        self.url("analytics")
    }
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let endpoints = ApiEndpoints::default();
        assert_eq!(endpoints.order_search(), "http://localhost:8000/api/orders/search");
        assert_eq!(endpoints.login(), "http://localhost:8000/api/login");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let endpoints = ApiEndpoints::new("https://laundry.example.com/ ");
        assert_eq!(endpoints.base_url(), "https://laundry.example.com");
        assert_eq!(
            endpoints.order_employee_overview(),
            "https://laundry.example.com/api/orders/employee-overview"
        );
    }
}
