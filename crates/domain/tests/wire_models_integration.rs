//! Integration tests for wire models
//!
//! Parses payloads shaped like real provider responses and checks the
//! fields the client crates depend on.

use perx_domain::types::{
    Customer, Identification, LoyaltyProgram, PagingMeta, Reward, TokenKind, TokenResponse,
    Voucher, VoucherState,
};
use serde_json::json;

// ============================================================================
// Catalogue
// ============================================================================

#[test]
fn test_reward_with_inventory_and_prices() {
    let reward: Reward = serde_json::from_value(json!({
        "id": 42,
        "name": "Free coffee",
        "description": null,
        "eligible": true,
        "reward_price": [
            {"id": 1, "currency_code": "THB", "price": "0.0", "points": 150, "loyalty_program_id": 4567}
        ],
        "images": [{"url": "https://cdn.example/coffee.png", "type": "reward_thumbnail"}],
        "tags": [],
        "category_tags": [{"id": 7, "title": "Food", "parent": {"id": 1, "title": "Root"}}],
        "custom_fields": {"sku": "C-1"}
    }))
    .unwrap();

    assert_eq!(reward.id, 42);
    assert_eq!(reward.name, "Free coffee");
    assert!(reward.eligible);
    assert_eq!(reward.reward_prices.len(), 1);
    assert_eq!(reward.reward_prices[0].points, Some(150));
    assert_eq!(reward.images[0].image_type, "reward_thumbnail");
    assert_eq!(
        reward.category_tags[0].parent.as_ref().map(|parent| parent.id),
        Some(1)
    );
}

// ============================================================================
// Vouchers
// ============================================================================

#[test]
fn test_voucher_list_entry() {
    let voucher: Voucher = serde_json::from_value(json!({
        "id": 10,
        "name": "Free coffee",
        "state": "issued",
        "voucher_code": "ABC123",
        "voucher_type": "code",
        "user_account": {"identifier": "0001"},
        "reward": {"id": 42, "name": "Free coffee"},
        "issued_date": "2024-01-05T10:00:00Z"
    }))
    .unwrap();

    assert_eq!(voucher.state, VoucherState::Issued);
    assert_eq!(voucher.voucher_code.as_deref(), Some("ABC123"));
    assert_eq!(
        voucher.user_account.and_then(|owner| owner.identifier).as_deref(),
        Some("0001")
    );
    assert_eq!(voucher.reward.map(|reward| reward.id), Some(42));
    assert!(voucher.issued_date.is_some());
}

// ============================================================================
// Loyalty and customers
// ============================================================================

#[test]
fn test_loyalty_program_balances() {
    let program: LoyaltyProgram = serde_json::from_value(json!({
        "id": 4567,
        "name": "Rewards Club",
        "points_balance": 1200.0,
        "points_balances": null,
        "aging_points": [{"date": "2024-12-31T00:00:00Z", "aggregated_points": 100.0}]
    }))
    .unwrap();

    assert_eq!(program.points_balance, Some(1200.0));
    assert!(program.points_balances.is_empty());
    assert_eq!(program.aging_points.len(), 1);
}

#[test]
fn test_customer_token_subject_skips_blank_identifier() {
    let customer: Customer =
        serde_json::from_value(json!({"id": 1, "identifier": "", "email": "a@b.c"})).unwrap();
    assert_eq!(customer.token_subject(), None);

    let customer: Customer =
        serde_json::from_value(json!({"id": 2, "identifier": "0002"})).unwrap();
    assert_eq!(customer.token_subject(), Some("0002"));
}

// ============================================================================
// Tokens, paging and identity
// ============================================================================

#[test]
fn test_token_response_becomes_cacheable_token() {
    let response: TokenResponse = serde_json::from_value(json!({
        "access_token": "user-token",
        "token_type": "bearer",
        "expires_in": 3600,
        "scope": null
    }))
    .unwrap();

    let token = response.into_token(TokenKind::User);
    assert_eq!(token.access_token, "user-token");
    assert_eq!(token.ttl().as_secs(), 3600);
    assert_eq!(token.bearer(), "Bearer user-token");
}

#[test]
fn test_paging_meta_last_page_size() {
    let meta: PagingMeta = serde_json::from_value(json!({
        "count": 25,
        "total_count": 53,
        "size": 25,
        "total_pages": 3,
        "page": 1
    }))
    .unwrap();

    assert_eq!(meta.total_pages, Some(3));
    assert_eq!(meta.last_page_size(), Some(3));
}

#[test]
fn test_identification_round_trips_through_tagged_json() {
    let identification = Identification::identifier("0001");
    let value = serde_json::to_value(&identification).unwrap();
    assert_eq!(value, json!({"type": "identifier", "identifier": "0001"}));
    assert_eq!(identification.cache_key(), "identifier:0001");
}
