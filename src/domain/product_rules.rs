//! Price tier invariants of a [`Product`](super::Product).

use super::PriceTier;
use crate::core::{LifecycleError, Result};

/// Tier 1 needs a positive quantity and price. Every later tier that is not
/// blank (quantity or price above zero) must raise the quantity and lower
/// the price compared to the tier right before it, blank or not.
pub fn ensure_valid_price_tiers(tiers: &[PriceTier]) -> Result<()> {
    let Some(first) = tiers.first() else {
        return Err(LifecycleError::DomainRule(
            "Price tier list must not be empty.".to_string(),
        ));
    };

    if first.quantity <= 0 || first.price <= 0 {
        return Err(LifecycleError::DomainRule(
            "Price tier 1 must have quantity and price > 0".to_string(),
        ));
    }

    for (i, pair) in tiers.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);
        if current.quantity <= 0 && current.price <= 0 {
            continue;
        }
        let tier = i + 2;
        if current.quantity <= previous.quantity {
            return Err(LifecycleError::DomainRule(format!(
                "Quantity of price tier {} must be greater than tier {}",
                tier,
                tier - 1
            )));
        }
        if current.price >= previous.price {
            return Err(LifecycleError::DomainRule(format!(
                "Price of tier {} must be lower than tier {}",
                tier,
                tier - 1
            )));
        }
    }

    Ok(())
}
