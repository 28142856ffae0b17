//! crates/tripwala_core/src/wizard.rs
//!
//! The trip planning flow as a state machine:
//!
//! ```text
//! Selecting --estimate--> Estimated --confirm--> Confirmed --begin_payment--> Paying
//!     ^                                                                         |
//!     +-------------------------- reset ------------ Done <--complete_payment--+
//! ```
//!
//! `estimate` is accepted from every state and restarts the flow; a failed estimate
//! drops back to `Selecting` so no stale figures survive. The wizard is owned by
//! whatever session drives it and holds no storage handles of its own.

use tracing::{info, warn};

use crate::domain::{BookingId, Destination, TripEstimate, TripRequest};
use crate::estimator::{estimate_trip, EstimateError};
use crate::payment::PaymentRequest;
use crate::ports::BookingStore;
use crate::tables::TravelTables;

/// Optional contact details entered at confirmation. Not persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravellerDetails {
    pub name: Option<String>,
    pub contact: Option<String>,
}

/// The result of the simulated payment. The payment itself always succeeds;
/// only saving the booking can fail.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    Booked(BookingId),
    PaymentOnly { reason: String },
}

impl BookingOutcome {
    pub fn payment_succeeded(&self) -> bool {
        true
    }

    pub fn is_booked(&self) -> bool {
        matches!(self, BookingOutcome::Booked(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardState {
    Selecting,
    Estimated(TripEstimate),
    Confirmed {
        estimate: TripEstimate,
        traveller: TravellerDetails,
    },
    Paying {
        estimate: TripEstimate,
        traveller: TravellerDetails,
        payment: PaymentRequest,
    },
    Done(BookingOutcome),
}

impl WizardState {
    pub fn name(&self) -> &'static str {
        match self {
            WizardState::Selecting => "selecting",
            WizardState::Estimated(_) => "estimated",
            WizardState::Confirmed { .. } => "confirmed",
            WizardState::Paying { .. } => "paying",
            WizardState::Done(_) => "done",
        }
    }

    /// The in-progress estimate, if the flow has one.
    pub fn estimate(&self) -> Option<&TripEstimate> {
        match self {
            WizardState::Estimated(estimate)
            | WizardState::Confirmed { estimate, .. }
            | WizardState::Paying { estimate, .. } => Some(estimate),
            WizardState::Selecting | WizardState::Done(_) => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Estimate(#[from] EstimateError),
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripWizard {
    state: WizardState,
}

impl Default for TripWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl TripWizard {
    pub fn new() -> Self {
        Self {
            state: WizardState::Selecting,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Back to a blank planner ("Plan New Trip").
    pub fn reset(&mut self) {
        self.state = WizardState::Selecting;
    }

    pub fn estimate(
        &mut self,
        destination: &Destination,
        request: &TripRequest,
        tables: &TravelTables,
    ) -> Result<TripEstimate, WizardError> {
        match estimate_trip(destination, request, tables) {
            Ok(estimate) => {
                self.state = WizardState::Estimated(estimate.clone());
                Ok(estimate)
            }
            Err(e) => {
                self.state = WizardState::Selecting;
                Err(e.into())
            }
        }
    }

    pub fn confirm(&mut self, traveller: TravellerDetails) -> Result<(), WizardError> {
        match std::mem::replace(&mut self.state, WizardState::Selecting) {
            WizardState::Estimated(estimate) => {
                self.state = WizardState::Confirmed {
                    estimate,
                    traveller,
                };
                Ok(())
            }
            other => Err(self.reject("confirm", other)),
        }
    }

    pub fn begin_payment(&mut self) -> Result<PaymentRequest, WizardError> {
        match std::mem::replace(&mut self.state, WizardState::Selecting) {
            WizardState::Confirmed {
                estimate,
                traveller,
            } => {
                let payment = PaymentRequest::for_estimate(&estimate);
                self.state = WizardState::Paying {
                    estimate,
                    traveller,
                    payment: payment.clone(),
                };
                Ok(payment)
            }
            other => Err(self.reject("begin payment", other)),
        }
    }

    /// Marks the simulated payment as received and persists the booking.
    ///
    /// A storage failure does not undo the payment: the outcome is
    /// `PaymentOnly` and the caller must tell the user the booking was not saved.
    pub async fn complete_payment(
        &mut self,
        store: &dyn BookingStore,
        username: &str,
    ) -> Result<BookingOutcome, WizardError> {
        // Stays `Paying` until the write settles.
        let estimate = match &self.state {
            WizardState::Paying { estimate, .. } => estimate.clone(),
            other => {
                return Err(WizardError::InvalidTransition {
                    action: "complete payment",
                    state: other.name(),
                })
            }
        };

        let outcome = match store.save_booking(username, &estimate).await {
            Ok(id) => {
                info!(
                    "Booked trip {} for {} to {}",
                    id, username, estimate.destination_name
                );
                BookingOutcome::Booked(id)
            }
            Err(e) => {
                warn!(
                    "Payment simulated but booking for {} was not saved: {}",
                    username, e
                );
                BookingOutcome::PaymentOnly {
                    reason: e.to_string(),
                }
            }
        };
        self.state = WizardState::Done(outcome.clone());
        Ok(outcome)
    }

    fn reject(&mut self, action: &'static str, current: WizardState) -> WizardError {
        let state = current.name();
        self.state = current;
        WizardError::InvalidTransition { action, state }
    }
}
