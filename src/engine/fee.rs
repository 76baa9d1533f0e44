use crate::core::trigger::TriggerKind;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Hard ceiling on the liquidation fee as a fraction of position value.
///
/// Safety invariant: no combination of fee rate and risk multiplier may
/// push the fee past this cap.
pub const FEE_CAP_RATIO: Decimal = dec!(0.10);

/// Compute the liquidation fee for a breached position.
///
/// `fee = position_value × default_fee_rate × kind.risk_multiplier()`,
/// capped at [`FEE_CAP_RATIO`] of position value.
pub fn liquidation_fee(
    position_value: Decimal,
    kind: TriggerKind,
    default_fee_rate: Decimal,
) -> Decimal {
    let base = position_value * default_fee_rate;
    let fee = base * kind.risk_multiplier();
    fee.min(position_value * FEE_CAP_RATIO)
}
