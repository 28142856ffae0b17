//! crates/tripwala_core/src/payment.rs
//!
//! The simulated payment step. Nothing is charged; the request only carries the
//! UPI payload a client would encode as a QR code.

use crate::domain::TripEstimate;

const PAYEE_ADDRESS: &str = "dummy-payee@okbank";
const PAYEE_NAME: &str = "TripWala";
const CURRENCY: &str = "INR";

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub amount: f64,
    pub upi_uri: String,
}

impl PaymentRequest {
    pub fn for_estimate(estimate: &TripEstimate) -> Self {
        let upi_uri = format!(
            "upi://pay?pa={PAYEE_ADDRESS}&pn={PAYEE_NAME}&am={:.2}&cu={CURRENCY}&tn=Trip to {}",
            estimate.total_cost, estimate.destination_name
        );
        Self {
            amount: estimate.total_cost,
            upi_uri,
        }
    }
}
