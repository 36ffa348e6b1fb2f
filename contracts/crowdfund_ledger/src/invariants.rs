#![allow(dead_code)]

extern crate std;

use crate::types::Campaign;

/// INV-1: Campaign goal must always be positive.
pub fn assert_goal_positive(campaign: &Campaign) {
    assert!(
        campaign.goal > 0,
        "INV-1 violated: campaign {} has non-positive goal ({})",
        campaign.id,
        campaign.goal
    );
}

/// INV-2: Accounting never goes negative and refunds never exceed intake.
pub fn assert_accounting_bounds(campaign: &Campaign) {
    assert!(
        campaign.funds_raised >= 0 && campaign.total_refunded >= 0,
        "INV-2 violated: campaign {} has negative accounting ({} raised, {} refunded)",
        campaign.id,
        campaign.funds_raised,
        campaign.total_refunded
    );
    assert!(
        campaign.total_refunded <= campaign.funds_raised,
        "INV-2 violated: campaign {} refunded {} of only {} raised",
        campaign.id,
        campaign.total_refunded,
        campaign.funds_raised
    );
}

/// INV-3: The contribution ledger balances against the campaign totals:
/// `sum(entries) == funds_raised - total_refunded`.
pub fn assert_ledger_balanced(campaign: &Campaign, entries: &[i128]) {
    let sum: i128 = entries.iter().sum();
    assert_eq!(
        sum,
        campaign.outstanding(),
        "INV-3 violated: campaign {} ledger sums to {} but holds {} - {}",
        campaign.id,
        sum,
        campaign.funds_raised,
        campaign.total_refunded
    );
}

/// INV-4: After a contribution of `amount`, funds raised grow by exactly `amount`.
pub fn assert_contribution_invariant(raised_before: i128, raised_after: i128, amount: i128) {
    assert_eq!(
        raised_after,
        raised_before + amount,
        "INV-4 violated: contribution invariant broken: {} + {} != {}",
        raised_before,
        amount,
        raised_after
    );
}

/// INV-5: Campaign ids are sequential starting from 1.
pub fn assert_sequential_ids(campaigns: &[Campaign]) {
    for (i, campaign) in campaigns.iter().enumerate() {
        assert_eq!(
            campaign.id,
            i as u64 + 1,
            "INV-5 violated: expected id {}, got {}",
            i + 1,
            campaign.id
        );
    }
}

/// INV-6: Fields fixed at creation never change.
pub fn assert_campaign_immutable_fields(original: &Campaign, current: &Campaign) {
    assert_eq!(original.id, current.id, "INV-6 violated: campaign id changed");
    assert_eq!(
        original.creator, current.creator,
        "INV-6 violated: campaign creator changed"
    );
    assert_eq!(
        original.title, current.title,
        "INV-6 violated: campaign title changed"
    );
    assert_eq!(
        original.description, current.description,
        "INV-6 violated: campaign description changed"
    );
    assert_eq!(
        original.goal, current.goal,
        "INV-6 violated: campaign goal changed"
    );
    assert_eq!(
        original.deadline, current.deadline,
        "INV-6 violated: campaign deadline changed"
    );
}

/// INV-7: `withdrawn` is set at most once and never cleared.
pub fn assert_withdrawn_monotonic(before: &Campaign, after: &Campaign) {
    assert!(
        !before.withdrawn || after.withdrawn,
        "INV-7 violated: campaign {} withdrawn flag was cleared",
        before.id
    );
}

/// Run all stateless campaign invariants.
pub fn assert_all_campaign_invariants(campaign: &Campaign) {
    assert_goal_positive(campaign);
    assert_accounting_bounds(campaign);
}
