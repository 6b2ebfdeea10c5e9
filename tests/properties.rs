//! Property tests for the role/pass-type resolver.

use eventpass::access::menu::MenuItem;
use eventpass::access::resolver::{default_permissions, resolve, resolve_str};
use eventpass::access::scope::DataScope;
use eventpass::access::types::{DaySet, PassType, Role, UserAttributes};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Attendee),
        Just(Role::Exhibitor),
        Just(Role::Speaker),
        Just(Role::Staff),
        Just(Role::SuperAdmin),
        "[a-z_]{0,12}".prop_map(|s| Role::parse(&s)),
    ]
}

fn arb_pass() -> impl Strategy<Value = Option<PassType>> {
    prop_oneof![
        Just(None),
        Just(Some(PassType::General)),
        Just(Some(PassType::Course)),
        Just(Some(PassType::Sessions)),
        Just(Some(PassType::Combo)),
        "[a-z]{0,8}".prop_map(|s| Some(PassType::parse(&s))),
    ]
}

fn arb_days() -> impl Strategy<Value = Option<DaySet>> {
    prop::option::of(
        prop::collection::vec(1u8..=4, 0..4).prop_map(|d| DaySet::new(&d).expect("in range")),
    )
}

fn arb_attrs() -> impl Strategy<Value = UserAttributes> {
    (
        prop::option::of("u-[0-9]{1,4}"),
        prop::option::of("[a-z]{3,8}"),
        prop::option::of(2020i32..2030),
        any::<bool>(),
        arb_days(),
    )
        .prop_map(|(user_id, venue, edition, multi_venue, days)| UserAttributes {
            user_id,
            venue,
            edition,
            multi_venue,
            days,
        })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn resolve_is_total_and_idempotent(role in arb_role(), pass in arb_pass(), attrs in arb_attrs()) {
        let first = resolve(&role, pass.as_ref(), &attrs);
        let second = resolve(&role, pass.as_ref(), &attrs);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn attributes_never_change_the_result(role in arb_role(), pass in arb_pass(), attrs in arb_attrs()) {
        prop_assert_eq!(
            resolve(&role, pass.as_ref(), &attrs),
            resolve(&role, pass.as_ref(), &UserAttributes::default())
        );
    }

    #[test]
    fn menu_items_imply_their_views(role in arb_role(), pass in arb_pass()) {
        let p = resolve(&role, pass.as_ref(), &UserAttributes::default());
        prop_assert!(p.menu_gaps().is_empty(), "gaps: {:?}", p.menu_gaps());
        prop_assert!(p.view_profile);
        prop_assert_eq!(p.menu_items.last().copied(), Some(MenuItem::Profile));
    }

    #[test]
    fn unrecognized_roles_get_minimum_privilege(raw in "[a-z]{1,10}", pass in arb_pass()) {
        let role = Role::parse(&raw);
        prop_assume!(!role.is_recognized());
        prop_assert_eq!(resolve(&role, pass.as_ref(), &UserAttributes::default()), default_permissions());
    }

    #[test]
    fn favorites_only_for_sessions_and_combo(role in arb_role(), pass in arb_pass()) {
        let p = resolve(&role, pass.as_ref(), &UserAttributes::default());
        let expected = role == Role::Attendee
            && matches!(pass, Some(PassType::Sessions) | Some(PassType::Combo));
        prop_assert_eq!(p.can_favorite, expected);
    }

    #[test]
    fn super_admin_is_never_scoped(attrs in arb_attrs(), pass in arb_pass()) {
        let p = resolve(&Role::SuperAdmin, pass.as_ref(), &attrs);
        prop_assert!(!p.filter_by_venue);
        prop_assert!(!p.filter_by_edition);
        prop_assert_eq!(p.days_allowed, DaySet::ALL);
        let scope = DataScope::forward(&p, &attrs);
        prop_assert!(scope.is_unrestricted());
    }

    #[test]
    fn scoped_days_never_exceed_granted_days(role in arb_role(), pass in arb_pass(), attrs in arb_attrs()) {
        let p = resolve(&role, pass.as_ref(), &attrs);
        let scope = DataScope::forward(&p, &attrs);
        prop_assert_eq!(scope.days.intersect(p.days_allowed), scope.days);
    }
}

#[test]
fn string_entry_point_matches_typed_one() {
    for role in ["attendee", "exhibitor", "speaker", "staff", "super_admin", "intern"] {
        for pass in [None, Some("general"), Some("course"), Some("sessions"), Some("combo")] {
            assert_eq!(
                resolve_str(role, pass, &UserAttributes::default()),
                resolve(
                    &Role::parse(role),
                    pass.map(PassType::parse).as_ref(),
                    &UserAttributes::default()
                )
            );
        }
    }
}
