use super::*;

fn pricing() -> PricingConfig {
    PricingConfig {
        tax_rate_percent: 5.0,
        delivery_fee: 40.0,
        free_delivery_above: 499.0,
    }
}

fn item(name: &str, price: f64) -> CartItemInput {
    CartItemInput {
        name: name.to_string(),
        price,
    }
}

#[test]
fn adding_the_same_item_twice_merges_lines() {
    let mut cart = Cart::default();
    cart.add_item(item("Paneer Tikka", 220.0), "r1", "Spice Hub", &pricing())
        .unwrap();
    cart.add_item(item("Paneer Tikka", 220.0), "r1", "Spice Hub", &pricing())
        .unwrap();

    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 2);
    assert_eq!(cart.subtotal, 440.0);
}

#[test]
fn totals_hold_after_every_mutation() {
    let mut cart = Cart::default();
    let p = pricing();
    cart.add_item(item("Paneer Tikka", 220.0), "r1", "Spice Hub", &p)
        .unwrap();
    cart.add_item(item("Garlic Naan", 45.0), "r1", "Spice Hub", &p)
        .unwrap();
    cart.update_quantity("Garlic Naan", 4, &p).unwrap();

    // 220 + 4*45 = 400; below the free-delivery threshold.
    assert_eq!(cart.subtotal, 400.0);
    assert_eq!(cart.tax, 20.0);
    assert_eq!(cart.delivery_fee, 40.0);
    assert_eq!(cart.total, cart.subtotal + cart.tax + cart.delivery_fee);

    cart.remove_item("Paneer Tikka", &p).unwrap();
    assert_eq!(cart.subtotal, 180.0);
    assert_eq!(cart.total, cart.subtotal + cart.tax + cart.delivery_fee);
}

#[test]
fn recompute_is_idempotent() {
    let mut cart = Cart::default();
    let p = pricing();
    cart.add_item(item("Masala Dosa", 99.99), "r1", "Spice Hub", &p)
        .unwrap();
    cart.update_quantity("Masala Dosa", 3, &p).unwrap();

    let first = cart.clone();
    cart.recompute(&p);
    assert_eq!(cart, first);
}

#[test]
fn delivery_fee_is_waived_above_the_threshold() {
    let mut cart = Cart::default();
    let p = pricing();
    cart.add_item(item("Family Thali", 499.0), "r1", "Spice Hub", &p)
        .unwrap();
    assert_eq!(cart.delivery_fee, 0.0);
    assert_eq!(cart.total, cart.subtotal + cart.tax);
}

#[test]
fn empty_cart_has_zero_fees() {
    let mut cart = Cart::default();
    cart.recompute(&pricing());
    assert_eq!(cart.subtotal, 0.0);
    assert_eq!(cart.delivery_fee, 0.0);
    assert_eq!(cart.total, 0.0);
}

#[test]
fn cross_restaurant_add_is_rejected_and_cart_unchanged() {
    let mut cart = Cart::default();
    let p = pricing();
    cart.add_item(item("Paneer Tikka", 220.0), "r1", "Spice Hub", &p)
        .unwrap();
    let before = cart.clone();

    let err = cart
        .add_item(item("Sushi Roll", 350.0), "r2", "Other Place", &p)
        .unwrap_err();

    assert_eq!(
        err,
        CartError::RestaurantMismatch {
            current_id: "r1".to_string(),
            current_name: "Spice Hub".to_string(),
        }
    );
    assert_eq!(cart, before);
}

#[test]
fn clearing_makes_any_restaurant_acceptable_again() {
    let mut cart = Cart::default();
    let p = pricing();
    cart.add_item(item("Paneer Tikka", 220.0), "r1", "Spice Hub", &p)
        .unwrap();
    cart.clear();

    cart.add_item(item("Sushi Roll", 350.0), "r2", "Other Place", &p)
        .unwrap();
    assert_eq!(cart.restaurant_id.as_deref(), Some("r2"));
    assert_eq!(cart.items.len(), 1);
}

#[test]
fn removing_the_last_item_resets_the_binding() {
    let mut cart = Cart::default();
    let p = pricing();
    cart.add_item(item("Paneer Tikka", 220.0), "r1", "Spice Hub", &p)
        .unwrap();
    cart.remove_item("Paneer Tikka", &p).unwrap();

    assert!(cart.is_empty());
    assert_eq!(cart.restaurant_id, None);
    assert_eq!(cart.restaurant_name, None);

    // First item from another restaurant is accepted again.
    cart.add_item(item("Sushi Roll", 350.0), "r2", "Other Place", &p)
        .unwrap();
    assert_eq!(cart.restaurant_name.as_deref(), Some("Other Place"));
}

#[test]
fn zero_or_negative_quantity_removes_the_line() {
    let mut cart = Cart::default();
    let p = pricing();
    cart.add_item(item("Paneer Tikka", 220.0), "r1", "Spice Hub", &p)
        .unwrap();
    cart.add_item(item("Garlic Naan", 45.0), "r1", "Spice Hub", &p)
        .unwrap();

    cart.update_quantity("Garlic Naan", 0, &p).unwrap();
    assert_eq!(cart.items.len(), 1);

    cart.update_quantity("Paneer Tikka", -3, &p).unwrap();
    assert!(cart.is_empty());
    assert_eq!(cart.restaurant_id, None);
}

#[test]
fn unknown_item_updates_are_rejected() {
    let mut cart = Cart::default();
    let p = pricing();
    assert_eq!(
        cart.update_quantity("Paneer Tikka", 2, &p),
        Err(CartError::ItemNotFound("Paneer Tikka".to_string()))
    );
    assert_eq!(
        cart.remove_item("Paneer Tikka", &p),
        Err(CartError::ItemNotFound("Paneer Tikka".to_string()))
    );
}

#[test]
fn rejects_bad_prices_and_names() {
    let mut cart = Cart::default();
    let p = pricing();
    assert!(cart
        .add_item(item("", 10.0), "r1", "Spice Hub", &p)
        .is_err());
    assert!(cart
        .add_item(item("Paneer Tikka", -1.0), "r1", "Spice Hub", &p)
        .is_err());
    assert!(cart
        .add_item(item("Paneer Tikka", f64::NAN), "r1", "Spice Hub", &p)
        .is_err());
    assert!(cart.is_empty());
}

#[test]
fn quantity_bounds_are_enforced() {
    let mut cart = Cart::default();
    let p = pricing();
    cart.add_item(item("Paneer Tikka", 220.0), "r1", "Spice Hub", &p)
        .unwrap();
    assert_eq!(
        cart.update_quantity("Paneer Tikka", 1000, &p),
        Err(CartError::QuantityTooLarge(1000))
    );
}

#[test]
fn decimal_totals_avoid_float_drift() {
    let mut cart = Cart::default();
    let p = PricingConfig {
        tax_rate_percent: 0.0,
        delivery_fee: 0.0,
        free_delivery_above: 1.0e9,
    };
    cart.add_item(item("Chai", 0.1), "r1", "Spice Hub", &p).unwrap();
    cart.add_item(item("Rusk", 0.2), "r1", "Spice Hub", &p).unwrap();

    // f64 would give 0.30000000000000004 here.
    assert_eq!(cart.subtotal, 0.3);
    assert_eq!(cart.total, 0.3);
}
