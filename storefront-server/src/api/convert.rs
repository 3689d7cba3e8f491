//! Conversion from database models (`db::models`) to API response models
//! (`shared::models`): record references become `table:id` strings.

use crate::db::models as db;
use shared::models as api;
use surrealdb::RecordId;

pub fn record_id_to_string(id: &RecordId) -> String {
    id.to_string()
}

pub fn option_record_id_to_string(id: &Option<RecordId>) -> Option<String> {
    id.as_ref().map(record_id_to_string)
}

pub fn restaurant(r: db::Restaurant) -> api::Restaurant {
    api::Restaurant {
        id: option_record_id_to_string(&r.id),
        name: r.name,
        description: r.description,
        cuisine: r.cuisine,
        address: r.address,
        phone: r.phone,
        image: r.image,
        opens_at: r.opens_at,
        closes_at: r.closes_at,
        is_open: r.is_open,
        admin_status: r.admin_status,
        priority: r.priority,
        created_at: r.created_at,
        updated_at: r.updated_at,
    }
}

pub fn menu_item(m: db::MenuItem) -> api::MenuItem {
    api::MenuItem {
        id: option_record_id_to_string(&m.id),
        restaurant: record_id_to_string(&m.restaurant),
        name: m.name,
        description: m.description,
        price: m.price,
        category: m.category,
        is_veg: m.is_veg,
        is_available: m.is_available,
        image: m.image,
        sort_order: m.sort_order,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

pub fn offer(o: db::Offer) -> api::Offer {
    api::Offer {
        id: option_record_id_to_string(&o.id),
        title: o.title,
        description: o.description,
        restaurant: option_record_id_to_string(&o.restaurant),
        discount_percent: o.discount_percent,
        valid_from: o.valid_from,
        valid_until: o.valid_until,
        is_active: o.is_active,
        created_at: o.created_at,
        updated_at: o.updated_at,
    }
}

pub fn order(o: db::Order) -> api::Order {
    api::Order {
        id: option_record_id_to_string(&o.id),
        session_id: o.session_id,
        restaurant_id: record_id_to_string(&o.restaurant),
        restaurant_name: o.restaurant_name,
        items: o.items,
        customer: o.customer,
        subtotal: o.subtotal,
        tax: o.tax,
        delivery_fee: o.delivery_fee,
        total: o.total,
        status: o.status,
        created_at: o.created_at,
        updated_at: o.updated_at,
    }
}

pub fn device_token(t: db::DeviceToken) -> api::DeviceToken {
    api::DeviceToken {
        id: option_record_id_to_string(&t.id),
        token: t.token,
        platform: t.platform,
        registered_at: t.registered_at,
    }
}
