//! Business-level counters for the shop.

use metrics::{counter, histogram};

/// Outcome label for purchase and login counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Rejected,
    Failed,
}

impl Outcome {
    fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Rejected => "rejected",
            Outcome::Failed => "failed",
        }
    }
}

pub struct ShopMetrics;

impl ShopMetrics {
    pub fn user_registered() {
        counter!("shop_users_registered_total").increment(1);
    }

    pub fn login(outcome: Outcome) {
        counter!("shop_logins_total", "outcome" => outcome.as_str()).increment(1);
    }

    pub fn product_created(condition: &str) {
        counter!("shop_products_created_total", "condition" => condition.to_string()).increment(1);
    }

    /// `quantity` only counts towards units sold on success
    pub fn purchase(outcome: Outcome, quantity: u64) {
        counter!("shop_purchases_total", "outcome" => outcome.as_str()).increment(1);
        if outcome == Outcome::Success {
            counter!("shop_units_sold_total").increment(quantity);
        }
    }

    pub fn image_uploaded(store: &'static str, bytes: usize) {
        counter!("shop_images_uploaded_total", "store" => store).increment(1);
        histogram!("shop_image_upload_bytes", "store" => store).record(bytes as f64);
    }
}
