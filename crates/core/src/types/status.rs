//! Order lifecycle state machine.

use serde::{Deserialize, Serialize};

/// Error returned when a stored or submitted status string is not a known
/// lifecycle state.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown order status: {0}")]
pub struct StatusParseError(pub String);

/// Lifecycle state of an order.
///
/// Orders move strictly forward:
///
/// ```text
/// New ──► Paid ──► Fulfilled
///  │        │
///  └────────┴────► Cancelled
/// ```
///
/// `Fulfilled` and `Cancelled` are terminal. Every status write must pass
/// [`OrderStatus::can_transition_to`]; there is no way to re-open a
/// cancelled order or un-fulfil a fulfilled one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Freshly created, awaiting payment.
    #[default]
    New,
    /// Payment confirmed.
    Paid,
    /// Shipped/handed over; nothing left to do.
    Fulfilled,
    /// Abandoned or refused before fulfilment.
    Cancelled,
}

impl OrderStatus {
    /// The status name as stored in the `orders.status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Paid => "Paid",
            Self::Fulfilled => "Fulfilled",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Whether the lifecycle permits moving from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::New, Self::Paid)
                | (Self::New, Self::Cancelled)
                | (Self::Paid, Self::Fulfilled)
                | (Self::Paid, Self::Cancelled)
        )
    }

    /// Whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Fulfilled | Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(Self::New),
            "Paid" => Ok(Self::Paid),
            "Fulfilled" => Ok(Self::Fulfilled),
            "Cancelled" => Ok(Self::Cancelled),
            other => Err(StatusParseError(other.to_owned())),
        }
    }
}
