//! crates/tripwala_core/src/display.rs
//!
//! Rendering helpers for money and estimate breakdowns. Rounding to two decimals
//! happens here and only here.

use crate::domain::{PricingDiscipline, TripEstimate};

/// Formats an amount as rupees with thousands separators, e.g. `₹14,460.00`.
pub fn format_rupees(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}₹{grouped}.{fraction}")
}

impl TripEstimate {
    /// The itemized lines of the budget view.
    pub fn breakdown(&self) -> Vec<String> {
        let base = format!(
            "Base Cost: {} x {}p x {}d = {}",
            format_rupees(self.cost_per_person_per_day as f64),
            self.num_people,
            self.stay_days,
            format_rupees(self.base_cost as f64),
        );
        let one_way = format!("One-Way: {} km", self.distance_km);
        let round_trip = match self.discipline {
            PricingDiscipline::Flat => format!(
                "Round Trip ({} km) @ {}/km = {}",
                self.round_trip_km,
                format_rupees(self.transport_rate),
                format_rupees(self.transport_cost),
            ),
            PricingDiscipline::PerPerson => format!(
                "Round Trip ({} km) @ {}/km x {}p = {}",
                self.round_trip_km,
                format_rupees(self.transport_rate),
                self.num_people,
                format_rupees(self.transport_cost),
            ),
        };
        let total = format!("Total Estimated Budget: {}", format_rupees(self.total_cost));

        vec![
            base,
            format!("Transport ({}):", self.transport_mode),
            one_way,
            round_trip,
            total,
        ]
    }
}
