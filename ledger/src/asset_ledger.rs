//! Release accounting for a single asset.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use splitz_types::AccountId;

use crate::error::SplitError;
use crate::registry::ShareRegistry;

/// Cumulative payouts of one asset (native, or one token) to each payee.
///
/// `released` values only ever grow, and `total_released` is always their sum.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AssetLedger {
    released: HashMap<AccountId, u128>,
    total_released: u128,
}

impl AssetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount of this asset already paid to `payee`.
    pub fn released(&self, payee: &AccountId) -> u128 {
        self.released.get(payee).copied().unwrap_or(0)
    }

    pub fn total_released(&self) -> u128 {
        self.total_released
    }

    /// Everything ever entrusted: current custody plus everything paid out.
    pub fn total_received(&self, custody: u128) -> Result<u128, SplitError> {
        custody
            .checked_add(self.total_released)
            .ok_or(SplitError::Overflow)
    }

    /// `payee`'s proportional entitlement to date, rounded down.
    pub fn entitlement(
        &self,
        registry: &ShareRegistry,
        payee: &AccountId,
        custody: u128,
    ) -> Result<u128, SplitError> {
        let total_received = self.total_received(custody)?;
        mul_div_floor(
            total_received,
            registry.share_of(payee),
            registry.total_shares(),
        )
        .ok_or(SplitError::Overflow)
    }

    /// Amount currently claimable by `payee`.
    ///
    /// Floor division leaves fractional remainders in custody; they become
    /// claimable once later deposits carry an entitlement past the next unit.
    pub fn pending_payment(
        &self,
        registry: &ShareRegistry,
        payee: &AccountId,
        custody: u128,
    ) -> Result<u128, SplitError> {
        let entitlement = self.entitlement(registry, payee, custody)?;
        // Cannot underflow while released ≤ entitlement holds, which every
        // `record` call preserves.
        Ok(entitlement.saturating_sub(self.released(payee)))
    }

    /// Book a payment to `payee`. Both counters are updated or neither is.
    pub fn record(&mut self, payee: &AccountId, amount: u128) -> Result<(), SplitError> {
        let released = self
            .released(payee)
            .checked_add(amount)
            .ok_or(SplitError::Overflow)?;
        let total_released = self
            .total_released
            .checked_add(amount)
            .ok_or(SplitError::Overflow)?;
        self.released.insert(payee.clone(), released);
        self.total_released = total_released;
        Ok(())
    }

    /// Sum of every per-payee counter; equal to `total_released` at all times.
    pub fn sum_released(&self) -> u128 {
        self.released.values().sum()
    }
}

/// `⌊a × b / d⌋` computed over the full 256-bit product, so the result is
/// exact whenever it fits in `u128`. `None` on a zero divisor or a quotient
/// that does not fit.
fn mul_div_floor(a: u128, b: u128, d: u128) -> Option<u128> {
    if d == 0 {
        return None;
    }
    if let Some(product) = a.checked_mul(b) {
        return Some(product / d);
    }

    const LOW: u128 = u64::MAX as u128;
    let (a1, a0) = (a >> 64, a & LOW);
    let (b1, b0) = (b >> 64, b & LOW);
    let p00 = a0 * b0;
    let p01 = a0 * b1;
    let p10 = a1 * b0;
    let p11 = a1 * b1;
    let mid = (p00 >> 64) + (p01 & LOW) + (p10 & LOW);
    let lo = (p00 & LOW) | (mid << 64);
    let hi = p11 + (p01 >> 64) + (p10 >> 64) + (mid >> 64);

    if hi >= d {
        return None;
    }
    // Restoring long division of (hi, lo) by d; the remainder stays below d.
    let mut rem = hi;
    let mut quotient = 0u128;
    for bit in (0..128).rev() {
        let carry = rem >> 127;
        rem = (rem << 1) | ((lo >> bit) & 1);
        quotient <<= 1;
        if carry == 1 || rem >= d {
            rem = rem.wrapping_sub(d);
            quotient |= 1;
        }
    }
    Some(quotient)
}
