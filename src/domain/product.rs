use super::product_rules;
use crate::core::{EntityId, Result, UserId};
use crate::entity::EntityRecord;
use serde::{Deserialize, Serialize};

/// Unit price applying from `quantity` items upwards. Prices are in minor
/// currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTier {
    pub price: i64,
    pub quantity: i64,
}

impl PriceTier {
    pub fn new(price: i64, quantity: i64) -> Self {
        Self { price, quantity }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreOrderInfo {
    pub waiting_time: String,
    pub quantity: u32,
}

impl PreOrderInfo {
    pub fn new(waiting_time: impl Into<String>, quantity: u32) -> Self {
        Self {
            waiting_time: waiting_time.into(),
            quantity,
        }
    }
}

impl Default for PreOrderInfo {
    fn default() -> Self {
        Self::new("7 to 10 days", 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    record: EntityRecord,
    code: String,
    name: String,
    bar_code: Option<String>,
    tax_rate: Option<String>,
    cost_price: Option<i64>,
    price_tiers: Vec<PriceTier>,
    pre_order: PreOrderInfo,
    category_id: Option<EntityId>,
}

impl Product {
    pub fn new(
        id: EntityId,
        created_by: UserId,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            record: EntityRecord::new(id, created_by),
            code: code.into(),
            name: name.into(),
            bar_code: None,
            tax_rate: None,
            cost_price: None,
            price_tiers: Vec::new(),
            pre_order: PreOrderInfo::default(),
            category_id: None,
        }
    }

    pub fn with_category(mut self, category_id: EntityId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bar_code(&self) -> Option<&str> {
        self.bar_code.as_deref()
    }

    pub fn tax_rate(&self) -> Option<&str> {
        self.tax_rate.as_deref()
    }

    pub fn cost_price(&self) -> Option<i64> {
        self.cost_price
    }

    pub fn price_tiers(&self) -> &[PriceTier] {
        &self.price_tiers
    }

    pub fn pre_order(&self) -> &PreOrderInfo {
        &self.pre_order
    }

    pub fn category_id(&self) -> Option<EntityId> {
        self.category_id
    }

    pub fn update_basic_info(
        &mut self,
        updated_by: UserId,
        name: impl Into<String>,
        bar_code: Option<String>,
        tax_rate: Option<String>,
        cost_price: Option<i64>,
    ) {
        self.name = name.into();
        self.bar_code = bar_code;
        self.tax_rate = tax_rate;
        self.cost_price = cost_price;
        self.record.mark_updated(updated_by);
    }

    /// Replaces the price tiers. Invalid tiers leave the product unchanged.
    pub fn update_price_tiers(&mut self, updated_by: UserId, tiers: Vec<PriceTier>) -> Result<()> {
        product_rules::ensure_valid_price_tiers(&tiers)?;
        self.price_tiers = tiers;
        self.record.mark_updated(updated_by);
        Ok(())
    }

    pub fn mark_as_pre_order(&mut self, updated_by: UserId, info: PreOrderInfo) {
        self.pre_order = info;
        self.record.mark_updated(updated_by);
    }

    pub fn clear_pre_order(&mut self, updated_by: UserId) {
        self.pre_order = PreOrderInfo::default();
        self.record.mark_updated(updated_by);
    }
}

crate::impl_auditable_aggregate!(Product, record);
