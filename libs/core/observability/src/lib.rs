//! Prometheus metrics for the shop services.
//!
//! - [`init_metrics`] installs the global recorder once
//! - [`metrics_handler`] renders the scrape output for `GET /metrics`
//! - [`middleware::metrics_middleware`] records per-request HTTP metrics
//! - [`ShopMetrics`] records business events (registrations, purchases, uploads)
//!
//! ```rust,ignore
//! observability::init_metrics()?;
//!
//! let app = Router::new()
//!     .route("/metrics", get(observability::metrics_handler))
//!     .layer(axum::middleware::from_fn(observability::metrics_middleware));
//! ```

pub mod middleware;
pub mod shop;

pub use middleware::metrics_middleware;
pub use shop::{Outcome, ShopMetrics};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder. Later calls return the same handle.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;
        register_metric_descriptions();
        info!("Prometheus metrics recorder initialized");
        Ok(handle)
    })
}

pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// `GET /metrics`
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "HTTP requests answered with a 4xx or 5xx status"
    );

    describe_counter!("shop_users_registered_total", "Users registered");
    describe_counter!("shop_logins_total", "Login attempts by outcome");
    describe_counter!("shop_products_created_total", "Products listed for sale");
    describe_counter!("shop_purchases_total", "Purchase attempts by outcome");
    describe_counter!("shop_units_sold_total", "Product units sold");
    describe_counter!("shop_images_uploaded_total", "Images stored");
    describe_histogram!("shop_image_upload_bytes", "Size of uploaded images in bytes");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_metrics_is_idempotent() {
        let first = init_metrics().unwrap() as *const PrometheusHandle;
        let second = init_metrics().unwrap() as *const PrometheusHandle;
        assert_eq!(first, second);

        ShopMetrics::user_registered();
        let body = metrics_handler().await;
        assert!(body.contains("shop_users_registered_total"));
    }
}
