//! Input validation for catalog, checkout and account operations

use crate::contract::{CartItem, InventoryUpdate, RecordingDraft, StoreDraft, StoreError};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Upper bound for any single price
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Validate a monetary amount
///
/// Accepts non-negative values up to [`MAX_PRICE`] with at most two fractional digits.
pub fn validate_price(field: &str, value: Decimal) -> Result<(), StoreError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(StoreError::validation(format!(
            "{} must not be negative",
            field
        )));
    }

    if value > MAX_PRICE {
        return Err(StoreError::validation(format!(
            "{} must not exceed {}",
            field, MAX_PRICE
        )));
    }

    if value.normalize().scale() > 2 {
        return Err(StoreError::validation(format!(
            "{} must have at most two decimal places",
            field
        )));
    }

    Ok(())
}

fn require_text(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Validate a checkout request before the order transaction starts
///
/// Rejections happen in a fixed order: empty cart, missing store, then per-line checks.
pub fn validate_cart(store_id: Option<i32>, items: &[CartItem]) -> Result<i32, StoreError> {
    if items.is_empty() {
        return Err(StoreError::validation("empty cart"));
    }

    let store_id = store_id.ok_or_else(|| StoreError::validation("no store selected"))?;

    for item in items {
        if item.quantity < 1 {
            return Err(StoreError::validation(format!(
                "quantity for recording {} must be at least 1",
                item.recording_id
            )));
        }
        validate_price("unitPrice", item.unit_price)?;
    }

    Ok(store_id)
}

/// Order total from the submitted lines
///
/// Fails when the total cannot be stored as whole cents.
pub fn cart_total(items: &[CartItem]) -> Result<Decimal, StoreError> {
    let too_large = || StoreError::validation("order total is too large");

    let total = items.iter().try_fold(Decimal::ZERO, |total, item| {
        item.unit_price
            .checked_mul(Decimal::from(item.quantity))
            .and_then(|line| total.checked_add(line))
            .ok_or_else(too_large)
    })?;

    total
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or_else(too_large)?;

    Ok(total)
}

pub fn validate_recording(draft: &RecordingDraft) -> Result<(), StoreError> {
    require_text("title", &draft.title)?;
    require_text("artist", &draft.artist)?;
    require_text("genre", &draft.genre)?;
    require_text("publisher", &draft.publisher)?;
    require_text("mediaType", &draft.media_type)?;

    if !(1000..=9999).contains(&draft.release_year) {
        return Err(StoreError::validation(format!(
            "releaseYear '{}' is not a four-digit year",
            draft.release_year
        )));
    }

    Ok(())
}

pub fn validate_store(draft: &StoreDraft) -> Result<(), StoreError> {
    require_text("name", &draft.name)?;
    require_text("address", &draft.address)?;
    require_text("phone", &draft.phone)?;
    Ok(())
}

pub fn validate_inventory(update: &InventoryUpdate) -> Result<(), StoreError> {
    validate_price("wholesalePrice", update.wholesale_price)?;

    if update.in_stock < 0 {
        return Err(StoreError::validation("inStock must not be negative"));
    }

    if update.sales_count.is_some_and(|count| count < 0) {
        return Err(StoreError::validation("salesCount must not be negative"));
    }

    Ok(())
}

/// Validate registration input; returns the trimmed username and email
pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(String, String), StoreError> {
    let username = username.trim();
    let email = email.trim();

    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(StoreError::validation(
            "username, email and password are required",
        ));
    }

    // Minimal shape check: something@something
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid_email {
        return Err(StoreError::validation(format!(
            "email '{}' is not a valid address",
            email
        )));
    }

    Ok((username.to_string(), email.to_string()))
}

/// Parse a `YYYY-MM-DD` report bound
pub fn parse_report_date(field: &str, value: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        StoreError::validation(format!("{} '{}' must be formatted YYYY-MM-DD", field, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(recording_id: i32, quantity: i32, cents: i64) -> CartItem {
        CartItem {
            recording_id,
            quantity,
            unit_price: Decimal::new(cents, 2),
        }
    }

    #[test]
    fn test_empty_cart_checked_before_store() {
        let err = validate_cart(None, &[]).unwrap_err();
        assert_eq!(err, StoreError::validation("empty cart"));
    }

    #[test]
    fn test_missing_store() {
        let err = validate_cart(None, &[item(1, 1, 100)]).unwrap_err();
        assert_eq!(err, StoreError::validation("no store selected"));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        assert!(matches!(
            validate_cart(Some(1), &[item(1, 0, 100)]),
            Err(StoreError::Validation { .. })
        ));
    }

    #[test]
    fn test_valid_cart_returns_store() {
        assert_eq!(validate_cart(Some(4), &[item(1, 2, 1200)]).unwrap(), 4);
    }

    #[test]
    fn test_cart_total() {
        let total = cart_total(&[item(1, 3, 1250), item(2, 1, 99)]).unwrap();
        assert_eq!(total, Decimal::new(3849, 2));
    }

    #[test]
    fn test_cart_total_overflow_is_rejected() {
        let huge = CartItem {
            recording_id: 1,
            quantity: 2,
            unit_price: Decimal::from_scientific("5e28").unwrap(),
        };
        assert_eq!(
            cart_total(&[huge]).unwrap_err(),
            StoreError::validation("order total is too large")
        );

        let many = vec![item(1, i32::MAX, 99_999_999); 50];
        assert!(matches!(
            cart_total(&many),
            Err(StoreError::Validation { .. })
        ));
    }

    #[test]
    fn test_oversized_unit_price_fails_cart_validation() {
        let cart = [CartItem {
            recording_id: 1,
            quantity: 2,
            unit_price: Decimal::from_scientific("5e28").unwrap(),
        }];
        assert!(matches!(
            validate_cart(Some(1), &cart),
            Err(StoreError::Validation { .. })
        ));
    }

    #[test]
    fn test_price_rules() {
        assert!(validate_price("p", Decimal::ZERO).is_ok());
        assert!(validate_price("p", Decimal::new(1999, 2)).is_ok());
        assert!(validate_price("p", Decimal::new(12000, 3)).is_ok());
        assert!(validate_price("p", Decimal::new(-1, 0)).is_err());
        assert!(validate_price("p", Decimal::new(1001, 3)).is_err());
        assert!(validate_price("p", MAX_PRICE).is_ok());
        assert!(validate_price("p", MAX_PRICE + Decimal::new(1, 2)).is_err());
    }

    #[test]
    fn test_registration_requires_fields() {
        assert!(validate_registration("", "a@b.c", "pw").is_err());
        assert!(validate_registration("bob", "not-an-email", "pw").is_err());
        assert_eq!(
            validate_registration(" bob ", "bob@example.com", "pw").unwrap(),
            ("bob".to_string(), "bob@example.com".to_string())
        );
    }

    #[test]
    fn test_parse_report_date() {
        assert_eq!(
            parse_report_date("dateFrom", "2025-04-15").unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 15).unwrap()
        );
        assert!(parse_report_date("dateFrom", "15.04.2025").is_err());
    }

    #[test]
    fn test_inventory_rules() {
        let mut update = InventoryUpdate {
            wholesale_price: Decimal::new(800, 0),
            in_stock: 3,
            sales_count: None,
        };
        assert!(validate_inventory(&update).is_ok());
        update.in_stock = -1;
        assert!(validate_inventory(&update).is_err());
    }
}
