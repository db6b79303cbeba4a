use std::collections::BTreeSet;

use super::*;

fn user(v: serde_json::Value) -> User {
    serde_json::from_value(v).expect("parse user")
}

fn ids(xs: &[u64]) -> BTreeSet<CompanyId> {
    xs.iter().copied().map(CompanyId).collect()
}

#[test]
fn accessible_companies_win_over_every_other_source() {
    let u = user(serde_json::json!({
        "id": 1,
        "accessible_companies": [{"id": 3, "name": "Acme"}, 4],
        "managed_companies": [9],
        "company_id": 10,
        "company": {"id": 11},
    }));
    assert_eq!(u.company_memberships, ids(&[3, 4]));
}

#[test]
fn empty_lists_fall_through_to_the_next_source() {
    let u = user(serde_json::json!({
        "id": 1,
        "accessible_companies": [],
        "managed_companies": [{"id": 5}],
        "company_id": 10,
    }));
    assert_eq!(u.company_memberships, ids(&[5]));
}

#[test]
fn single_company_id_is_used_when_lists_are_absent() {
    let u = user(serde_json::json!({
        "id": 1,
        "managed_companies": null,
        "company_id": "12",
        "company": {"id": 99},
    }));
    assert_eq!(u.company_memberships, ids(&[12]));
}

#[test]
fn single_company_object_is_unwrapped() {
    let u = user(serde_json::json!({
        "id": 1,
        "company": {"id": 7, "name": "Bench Ltd"},
    }));
    assert_eq!(u.company_memberships, ids(&[7]));
    assert!(u.is_member_of(CompanyId(7)));
}

#[test]
fn no_recognized_field_means_no_memberships() {
    let u = user(serde_json::json!({
        "id": 1,
        "email": "a@example.com",
        "company": null,
    }));
    assert!(u.company_memberships.is_empty());
}

#[test]
fn unknown_fields_are_kept_and_display_name_prefers_full_name() {
    let u = user(serde_json::json!({
        "id": 1,
        "email": "a@example.com",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "avatar_url": "https://cdn.example.com/a.png",
    }));
    assert_eq!(u.display_name(), "Ada Lovelace");
    assert_eq!(
        u.extra.get("avatar_url"),
        Some(&serde_json::json!("https://cdn.example.com/a.png"))
    );

    let bare = user(serde_json::json!({"id": 2, "email": "b@example.com", "first_name": ""}));
    assert_eq!(bare.display_name(), "b@example.com");
}

#[test]
fn serialized_user_keeps_its_memberships_when_read_back() {
    let u = user(serde_json::json!({
        "id": 1,
        "managed_companies": [{"id": 2}, {"id": 8}],
    }));
    let again: User =
        serde_json::from_value(serde_json::to_value(&u).expect("serialize")).expect("reparse");
    assert_eq!(again.company_memberships, ids(&[2, 8]));
    assert_eq!(again, u);
}

#[test]
fn malformed_lower_priority_sources_are_never_read() {
    let u = user(serde_json::json!({
        "id": 1,
        "accessible_companies": [{"id": 3}],
        "company": {"id": null},
    }));
    assert_eq!(u.company_memberships, ids(&[3]));

    let named = user(serde_json::json!({
        "id": 1,
        "company": "Acme Inc",
        "company_id": 7,
    }));
    assert_eq!(named.company_memberships, ids(&[7]));
}

#[test]
fn sources_without_any_id_fall_through() {
    let u = user(serde_json::json!({
        "id": 1,
        "company_id": "",
        "company": {"id": 9},
    }));
    assert_eq!(u.company_memberships, ids(&[9]));

    let junk_list = user(serde_json::json!({
        "id": 1,
        "accessible_companies": [null, {"name": "Acme"}],
        "managed_companies": "not a list",
        "company_id": 4,
    }));
    assert_eq!(junk_list.company_memberships, ids(&[4]));

    let partial = user(serde_json::json!({
        "id": 1,
        "managed_companies": [{"id": 5}, {"id": "x"}, "6"],
    }));
    assert_eq!(partial.company_memberships, ids(&[5, 6]));
}
