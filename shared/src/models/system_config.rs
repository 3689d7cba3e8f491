//! System Config Model (singleton)

use serde::{Deserialize, Serialize};

use crate::availability::GlobalOverride;
use crate::cart::PricingConfig;

/// System configuration singleton
///
/// Created with defaults on first read, mutated only through admin actions,
/// never deleted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Destination phone for all WhatsApp orders (digits, with country
    /// code). Empty until the admin sets it; checkout then degrades to a
    /// link-less response.
    #[serde(default)]
    pub whatsapp_order_number: String,
    /// System-wide open/closed/auto override
    #[serde(default)]
    pub global_override: GlobalOverride,
    /// Tax and delivery fee parameters used by cart totals
    #[serde(default)]
    pub pricing: PricingConfig,
}

/// Update system config payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemConfigUpdate {
    pub whatsapp_order_number: Option<String>,
    pub global_override: Option<GlobalOverride>,
    pub tax_rate_percent: Option<f64>,
    pub delivery_fee: Option<f64>,
    pub free_delivery_above: Option<f64>,
}

impl SystemConfig {
    /// Apply a partial update in place.
    pub fn apply(&mut self, update: SystemConfigUpdate) {
        if let Some(number) = update.whatsapp_order_number {
            self.whatsapp_order_number = number;
        }
        if let Some(global) = update.global_override {
            self.global_override = global;
        }
        if let Some(rate) = update.tax_rate_percent {
            self.pricing.tax_rate_percent = rate;
        }
        if let Some(fee) = update.delivery_fee {
            self.pricing.delivery_fee = fee;
        }
        if let Some(above) = update.free_delivery_above {
            self.pricing.free_delivery_above = above;
        }
    }
}
