//! Two-phase reservations
//!
//! Rewards, vouchers and loyalty points share one lifecycle: something is
//! reserved, then either confirmed or released. [`TwoPhaseReservation`]
//! enforces the order; [`ReservationOps`] supplies the provider calls.
//!
//! ```text
//! Open --reserve--> Reserved --confirm--> Confirmed
//!                            \--release--> Released
//! ```

pub mod ops;

use async_trait::async_trait;
use perx_domain::{PerxError, Result};
use tracing::debug;

pub use ops::{LoyaltyPointsReservationOps, PointsHold, RewardReservationOps, VoucherReservationOps};

/// Provider calls behind one kind of reservation.
#[async_trait]
pub trait ReservationOps: Send + Sync {
    /// What to reserve.
    type Request: Send + Sync;
    /// Handle returned by the provider for a placed reservation.
    type Reservation: Send + Sync;
    /// Result of confirming or releasing.
    type Outcome: Send;

    async fn reserve(&self, request: &Self::Request) -> Result<Self::Reservation>;
    async fn confirm(&self, reservation: &Self::Reservation) -> Result<Self::Outcome>;
    async fn release(&self, reservation: &Self::Reservation) -> Result<Self::Outcome>;
}

/// Where a reservation is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ReservationState<R> {
    Open,
    Reserved(R),
    Confirmed(R),
    Released(R),
}

impl<R> ReservationState<R> {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Reserved(_) => "reserved",
            Self::Confirmed(_) => "confirmed",
            Self::Released(_) => "released",
        }
    }
}

/// Reserve once, then confirm or release once.
///
/// A failed provider call leaves the state unchanged, so a failed confirm
/// can still be released.
pub struct TwoPhaseReservation<O: ReservationOps> {
    ops: O,
    state: ReservationState<O::Reservation>,
}

impl<O: ReservationOps> TwoPhaseReservation<O> {
    pub fn new(ops: O) -> Self {
        Self { ops, state: ReservationState::Open }
    }

    pub const fn state(&self) -> &ReservationState<O::Reservation> {
        &self.state
    }

    /// The placed reservation, whatever happened to it since.
    pub const fn reservation(&self) -> Option<&O::Reservation> {
        match &self.state {
            ReservationState::Open => None,
            ReservationState::Reserved(reservation)
            | ReservationState::Confirmed(reservation)
            | ReservationState::Released(reservation) => Some(reservation),
        }
    }

    /// # Errors
    /// `BadInput` unless the reservation is still open; otherwise whatever
    /// the provider reports.
    pub async fn reserve(&mut self, request: &O::Request) -> Result<&O::Reservation> {
        if !matches!(self.state, ReservationState::Open) {
            return Err(self.invalid_transition("reserve"));
        }
        let reservation = self.ops.reserve(request).await?;
        debug!("reservation placed");
        self.state = ReservationState::Reserved(reservation);
        self.reservation().ok_or_else(|| PerxError::bad_input("reservation vanished"))
    }

    /// # Errors
    /// `BadInput` unless a reservation is held; otherwise whatever the
    /// provider reports.
    pub async fn confirm(&mut self) -> Result<O::Outcome> {
        let ReservationState::Reserved(reservation) = &self.state else {
            return Err(self.invalid_transition("confirm"));
        };
        let outcome = self.ops.confirm(reservation).await?;
        self.settle(ReservationState::Confirmed);
        debug!("reservation confirmed");
        Ok(outcome)
    }

    /// # Errors
    /// `BadInput` unless a reservation is held; otherwise whatever the
    /// provider reports.
    pub async fn release(&mut self) -> Result<O::Outcome> {
        let ReservationState::Reserved(reservation) = &self.state else {
            return Err(self.invalid_transition("release"));
        };
        let outcome = self.ops.release(reservation).await?;
        self.settle(ReservationState::Released);
        debug!("reservation released");
        Ok(outcome)
    }

    fn settle(&mut self, next: fn(O::Reservation) -> ReservationState<O::Reservation>) {
        if let ReservationState::Reserved(reservation) =
            std::mem::replace(&mut self.state, ReservationState::Open)
        {
            self.state = next(reservation);
        }
    }

    fn invalid_transition(&self, action: &str) -> PerxError {
        PerxError::bad_input(format!("cannot {action} a reservation that is {}", self.state.name()))
    }
}

impl<O: ReservationOps> std::fmt::Debug for TwoPhaseReservation<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwoPhaseReservation").field("state", &self.state.name()).finish()
    }
}
