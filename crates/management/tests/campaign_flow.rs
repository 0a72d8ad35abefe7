//! End-to-end flow: segment definition -> membership -> campaign ->
//! voucher issuance -> cascading deletes.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use promo_core::types::{Customer, DiscountKind};
use promo_core::PromoError;
use promo_management::models::{CampaignDraft, SegmentDraft};
use promo_management::{CampaignOrchestrator, SegmentService};
use promo_segmentation::{MembershipReconciler, SegmentMatcher};
use promo_store::{CampaignStore, InMemoryCustomers, MembershipStore, SegmentStore};
use promo_vouchers::VoucherIssuer;
use uuid::Uuid;

struct Rig {
    directory: Arc<InMemoryCustomers>,
    memberships: Arc<MembershipStore>,
    campaigns: Arc<CampaignStore>,
    segment_service: SegmentService,
    orchestrator: CampaignOrchestrator,
}

fn rig() -> Rig {
    let directory = Arc::new(InMemoryCustomers::new());
    let segments = Arc::new(SegmentStore::new());
    let memberships = Arc::new(MembershipStore::new());
    let campaigns = Arc::new(CampaignStore::new());

    let reconciler = Arc::new(MembershipReconciler::new(
        SegmentMatcher::new(directory.clone()),
        memberships.clone(),
    ));
    let segment_service =
        SegmentService::new(segments.clone(), memberships.clone(), reconciler);
    let orchestrator = CampaignOrchestrator::new(
        campaigns.clone(),
        segments,
        memberships.clone(),
        VoucherIssuer::new(campaigns.clone()),
    );

    Rig {
        directory,
        memberships,
        campaigns,
        segment_service,
        orchestrator,
    }
}

fn add_customer(rig: &Rig, spend: f64, card: Option<&str>) -> Uuid {
    let id = Uuid::new_v4();
    rig.directory.upsert(Customer {
        id,
        email: format!("{id}@example.com"),
        name: "Customer".into(),
        date_joined: Utc::now() - Duration::days(100),
        total_spend: spend,
        last_login: Some(Utc::now() - Duration::days(1)),
        credit_card_type: card.map(String::from),
    });
    id
}

fn visa_segment() -> SegmentDraft {
    SegmentDraft {
        name: "Visa high spenders".into(),
        description: Some("Spend >= 100 on a visa card".into()),
        min_spend: Some(100.0),
        max_spend: None,
        joined_before: None,
        card_type: Some("visa".into()),
        last_login_option: None,
        last_login_threshold: None,
    }
}

fn january_campaign(target: Option<Uuid>) -> CampaignDraft {
    CampaignDraft {
        name: "January promo".into(),
        description: None,
        start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(),
        target_segment_id: target,
        discount_kind: DiscountKind::Percentage,
        discount_value: 20.0,
        max_usage_limit: Some(1),
        min_cart_value: Some(50.0),
    }
}

#[test]
fn segment_membership_follows_filter() {
    let rig = rig();
    let a = add_customer(&rig, 150.0, Some("visa"));
    add_customer(&rig, 50.0, Some("visa"));
    add_customer(&rig, 200.0, Some("mastercard"));

    let segment = rig.segment_service.create_segment(visa_segment()).unwrap();
    let members = rig.segment_service.members_of(segment.id).unwrap();
    assert_eq!(members.len(), 1);
    assert!(members.contains(&a));
}

#[test]
fn campaign_issues_one_voucher_per_member() {
    let rig = rig();
    for _ in 0..3 {
        add_customer(&rig, 500.0, Some("visa"));
    }
    let segment = rig.segment_service.create_segment(visa_segment()).unwrap();
    assert_eq!(rig.memberships.member_count(segment.id), 3);

    let campaign = rig
        .orchestrator
        .create_campaign(january_campaign(Some(segment.id)))
        .unwrap();

    let fetched = rig.orchestrator.get_campaign(campaign.id).unwrap();
    assert_eq!(fetched.vouchers.len(), 3);

    let codes: HashSet<&str> = fetched.vouchers.iter().map(|v| v.code.as_str()).collect();
    assert_eq!(codes.len(), 3, "codes must be unique");
    for voucher in &fetched.vouchers {
        assert_eq!(voucher.start_date, campaign.start_date);
        assert_eq!(voucher.expiry_date, campaign.end_date);
        assert_eq!(voucher.usage_count, 0);
    }
}

#[test]
fn campaign_without_target_issues_nothing() {
    let rig = rig();
    add_customer(&rig, 500.0, Some("visa"));

    let campaign = rig.orchestrator.create_campaign(january_campaign(None)).unwrap();
    let fetched = rig.orchestrator.get_campaign(campaign.id).unwrap();
    assert!(fetched.vouchers.is_empty());
    assert_eq!(rig.campaigns.voucher_count(), 0);
}

#[test]
fn later_membership_changes_do_not_touch_issued_vouchers() {
    let rig = rig();
    add_customer(&rig, 500.0, Some("visa"));
    let segment = rig.segment_service.create_segment(visa_segment()).unwrap();
    let campaign = rig
        .orchestrator
        .create_campaign(january_campaign(Some(segment.id)))
        .unwrap();
    assert_eq!(rig.campaigns.vouchers_for_campaign(campaign.id).len(), 1);

    // Two more matching customers arrive and the segment is re-reconciled
    // via an update; the campaign's voucher set must not grow.
    add_customer(&rig, 900.0, Some("visa"));
    add_customer(&rig, 900.0, Some("visa"));
    rig.segment_service
        .update_segment(segment.id, visa_segment())
        .unwrap();

    assert_eq!(rig.memberships.member_count(segment.id), 3);
    assert_eq!(rig.campaigns.vouchers_for_campaign(campaign.id).len(), 1);
}

#[test]
fn deleting_campaign_cascades_vouchers() {
    let rig = rig();
    add_customer(&rig, 500.0, Some("visa"));
    let segment = rig.segment_service.create_segment(visa_segment()).unwrap();
    let campaign = rig
        .orchestrator
        .create_campaign(january_campaign(Some(segment.id)))
        .unwrap();

    rig.orchestrator.delete_campaign(campaign.id).unwrap();
    assert!(matches!(
        rig.orchestrator.get_campaign(campaign.id).unwrap_err(),
        PromoError::NotFound { .. }
    ));
    assert_eq!(rig.campaigns.voucher_count(), 0);
}

#[test]
fn deleting_segment_leaves_campaign_and_vouchers() {
    let rig = rig();
    add_customer(&rig, 500.0, Some("visa"));
    let segment = rig.segment_service.create_segment(visa_segment()).unwrap();
    let campaign = rig
        .orchestrator
        .create_campaign(january_campaign(Some(segment.id)))
        .unwrap();

    rig.segment_service.delete_segment(segment.id).unwrap();

    // Membership is gone, but the campaign keeps its history.
    assert!(rig.segment_service.get_segment(segment.id).is_err());
    let fetched = rig.orchestrator.get_campaign(campaign.id).unwrap();
    assert_eq!(fetched.vouchers.len(), 1);
}

#[test]
fn rejects_inverted_window_before_any_write() {
    let rig = rig();
    let mut draft = january_campaign(None);
    draft.end_date = draft.start_date - Duration::days(1);

    let err = rig.orchestrator.create_campaign(draft).unwrap_err();
    assert!(matches!(err, PromoError::Validation(_)));
    assert!(rig.orchestrator.list_campaigns().is_empty());
}

#[test]
fn rejects_unknown_target_segment() {
    let rig = rig();
    let err = rig
        .orchestrator
        .create_campaign(january_campaign(Some(Uuid::new_v4())))
        .unwrap_err();
    assert!(matches!(err, PromoError::NotFound { .. }));
    assert!(rig.orchestrator.list_campaigns().is_empty());
}
