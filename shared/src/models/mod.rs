//! Domain models
//!
//! Entity + `XxxCreate` + `XxxUpdate` triples for every resource the admin
//! console manages, plus the system config singleton.

pub mod device_token;
pub mod menu_item;
pub mod offer;
pub mod order;
pub mod restaurant;
pub mod system_config;

pub use device_token::{DeviceToken, DeviceTokenRegister, Platform};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use offer::{Offer, OfferCreate, OfferUpdate};
pub use order::{Customer, Order, OrderItem, OrderStatus, OrderStatusUpdate};
pub use restaurant::{
    AdminStatus, OverrideUpdate, Restaurant, RestaurantCreate, RestaurantUpdate,
};
pub use system_config::{SystemConfig, SystemConfigUpdate};
