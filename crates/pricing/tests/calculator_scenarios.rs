//! Published calculator scenarios, checked through the public API.

use cursorcat_pricing::{
    AdTier, Catalog, Money, Selection, SelectionPatch, SelectionStore, compute_totals,
    format_currency, parse_quantity,
};

#[test]
fn pilot_with_proof_pays_one_time_plus_ad_management() {
    let totals = compute_totals(&Selection {
        pilot_with_proof: true,
        ad_tier: AdTier::Lt2,
        ..Selection::default()
    });
    assert_eq!(totals.one_time_total, Money::dollars(3500));
    assert_eq!(totals.monthly_total, Money::dollars(300));
}

#[test]
fn nothing_selected_is_free() {
    let totals = compute_totals(&Selection {
        locations: 1,
        landing_pages: 0,
        lead_gen_campaigns: 0,
        ..Selection::default()
    });
    assert_eq!(totals.monthly_total, Money::ZERO);
    assert_eq!(totals.one_time_total, Money::ZERO);
}

#[test]
fn two_ad_running_packages_share_one_ad_fee() {
    let totals = compute_totals(&Selection {
        local_dominance: true,
        ecom_sprint: true,
        locations: 2,
        ad_tier: AdTier::From2To5,
        ..Selection::default()
    });
    assert_eq!(totals.monthly_total, Money::dollars(900 + 250 + 1200 + 600));
    assert_eq!(totals.monthly_total, Money::dollars(2950));
}

#[test]
fn extra_locations_exclude_the_first() {
    let catalog = Catalog::standard();
    let totals = compute_totals(&Selection {
        local_dominance: true,
        locations: 3,
        ..Selection::default()
    });
    let expected = catalog.monthly.local_dominance_base
        + catalog.monthly.extra_location * 2
        + catalog.ad_mgmt_fee(AdTier::Lt2);
    assert_eq!(totals.monthly_total, expected);
}

#[test]
fn malformed_quantities_behave_like_their_bounds() {
    let base = Selection {
        local_dominance: true,
        ..Selection::default()
    };

    let negative = compute_totals(&Selection { locations: -5, ..base.clone() });
    let one = compute_totals(&Selection { locations: 1, ..base.clone() });
    assert_eq!(negative, one);

    let nan_pages = Selection {
        landing_pages: i64::from(parse_quantity("NaN", 0)),
        ..base.clone()
    };
    let zero_pages = Selection { landing_pages: 0, ..base };
    assert_eq!(compute_totals(&nan_pages), compute_totals(&zero_pages));
}

#[test]
fn json_patch_with_garbage_quantities_is_clamped() {
    let mut store = SelectionStore::default();
    let patch: SelectionPatch =
        serde_json::from_str(r#"{"local_dominance": true, "locations": "abc", "landing_pages": "NaN"}"#)
            .unwrap();

    let totals = store.patch(&patch);

    assert_eq!(store.snapshot().locations, 1);
    assert_eq!(store.snapshot().landing_pages, 0);
    assert_eq!(totals.monthly_total, Money::dollars(900 + 300));
    assert_eq!(totals.one_time_total, Money::ZERO);
}

#[test]
fn currency_format_has_grouping_and_no_decimals() {
    let formatted = format_currency(1200);
    assert!(formatted.contains("1,200"));
    assert!(!formatted.contains('.'));
    assert_eq!(Money::dollars(2950).to_string(), "$2,950");
}
