//! Reservation operations for rewards, vouchers and loyalty points

use async_trait::async_trait;
use perx_domain::{
    LoyaltyReservationRequest, LoyaltyTransaction, Result, RewardReservation, UserAccountRef,
    Voucher,
};

use super::ReservationOps;
use crate::proxy::{PosProxy, UserProxy};

/// Holds a reward for the user behind a [`UserProxy`].
#[derive(Debug, Clone)]
pub struct RewardReservationOps {
    user: UserProxy,
    timeout_ms: u64,
}

impl RewardReservationOps {
    pub fn new(user: UserProxy, timeout_ms: u64) -> Self {
        Self { user, timeout_ms }
    }
}

#[async_trait]
impl ReservationOps for RewardReservationOps {
    /// Reward id.
    type Request = String;
    type Reservation = RewardReservation;
    type Outcome = Voucher;

    async fn reserve(&self, reward_id: &String) -> Result<RewardReservation> {
        self.user.reserve_reward(reward_id, Some(self.timeout_ms)).await
    }

    async fn confirm(&self, reservation: &RewardReservation) -> Result<Voucher> {
        self.user.confirm_reserved_reward(&reservation.id.to_string()).await
    }

    async fn release(&self, reservation: &RewardReservation) -> Result<Voucher> {
        self.user.release_reserved_reward(&reservation.id.to_string()).await
    }
}

/// Reserves the user's vouchers; releasing goes through the POS.
#[derive(Debug, Clone)]
pub struct VoucherReservationOps {
    user: UserProxy,
    pos: PosProxy,
}

impl VoucherReservationOps {
    pub fn new(user: UserProxy, pos: PosProxy) -> Self {
        Self { user, pos }
    }
}

fn voucher_ids(vouchers: &[Voucher]) -> Vec<String> {
    vouchers.iter().map(|voucher| voucher.id.to_string()).collect()
}

#[async_trait]
impl ReservationOps for VoucherReservationOps {
    /// Voucher ids.
    type Request = Vec<String>;
    type Reservation = Vec<Voucher>;
    type Outcome = Vec<Voucher>;

    async fn reserve(&self, voucher_ids: &Vec<String>) -> Result<Vec<Voucher>> {
        self.user.reserve_vouchers(voucher_ids).await
    }

    async fn confirm(&self, reserved: &Vec<Voucher>) -> Result<Vec<Voucher>> {
        self.user.confirm_vouchers(&voucher_ids(reserved)).await
    }

    async fn release(&self, reserved: &Vec<Voucher>) -> Result<Vec<Voucher>> {
        self.pos.release_vouchers(&voucher_ids(reserved)).await
    }
}

/// Points held at a point of sale, with the account they belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsHold {
    pub user_account: UserAccountRef,
    pub transaction: LoyaltyTransaction,
}

/// Holds loyalty points through the POS.
///
/// The provider has no separate confirm call for point holds: a hold is
/// consumed by the invoice that references it, so confirming only settles
/// the local state.
#[derive(Debug, Clone)]
pub struct LoyaltyPointsReservationOps {
    pos: PosProxy,
}

impl LoyaltyPointsReservationOps {
    pub fn new(pos: PosProxy) -> Self {
        Self { pos }
    }
}

#[async_trait]
impl ReservationOps for LoyaltyPointsReservationOps {
    type Request = LoyaltyReservationRequest;
    type Reservation = PointsHold;
    type Outcome = LoyaltyTransaction;

    async fn reserve(&self, request: &LoyaltyReservationRequest) -> Result<PointsHold> {
        let transaction = self.pos.reserve_loyalty_points(request).await?;
        Ok(PointsHold { user_account: request.user_account.clone(), transaction })
    }

    async fn confirm(&self, hold: &PointsHold) -> Result<LoyaltyTransaction> {
        Ok(hold.transaction.clone())
    }

    async fn release(&self, hold: &PointsHold) -> Result<LoyaltyTransaction> {
        self.pos
            .release_loyalty_points(&hold.user_account, &hold.transaction.id.to_string())
            .await?;
        Ok(hold.transaction.clone())
    }
}
