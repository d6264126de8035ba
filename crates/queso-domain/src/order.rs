//! Order lifecycle.
//!
//! ```text
//!            ┌── ok ──────▶ en_preparacion
//!   nuevo ───┤
//!            └── other ───▶ pago_fallido
//! ```
//!
//! Both outcomes are terminal: an order leaves `nuevo` exactly once.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Order status. Wire and storage format: snake_case Spanish name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Created at checkout, awaiting a payment outcome.
    #[default]
    #[serde(rename = "nuevo")]
    New,
    /// Payment confirmed; the order is being prepared.
    #[serde(rename = "en_preparacion")]
    Preparing,
    /// Payment was rejected or errored.
    #[serde(rename = "pago_fallido")]
    PaymentFailed,
}

/// Result reported by the payment confirmation call.
///
/// Only the literal `"ok"` counts as approval; any other value (`"rechazo"`,
/// `"error"`, ...) is a failed payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Approved,
    Declined,
}

impl PaymentOutcome {
    pub fn from_wire(value: &str) -> Self {
        if value == "ok" {
            Self::Approved
        } else {
            Self::Declined
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("order already settled as {0}")]
pub struct AlreadySettled(pub OrderStatus);

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "nuevo",
            Self::Preparing => "en_preparacion",
            Self::PaymentFailed => "pago_fallido",
        }
    }

    /// Apply a payment outcome. Fails without a new status unless `self` is `New`.
    pub fn settle(self, outcome: PaymentOutcome) -> Result<OrderStatus, AlreadySettled> {
        match (self, outcome) {
            (Self::New, PaymentOutcome::Approved) => Ok(Self::Preparing),
            (Self::New, PaymentOutcome::Declined) => Ok(Self::PaymentFailed),
            (settled, _) => Err(AlreadySettled(settled)),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nuevo" => Ok(Self::New),
            "en_preparacion" => Ok(Self::Preparing),
            "pago_fallido" => Ok(Self::PaymentFailed),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}
