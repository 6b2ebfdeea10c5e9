use crate::access::menu::MenuItem;
use crate::access::types::{
    ContentCategory, DaySet, PassType, PermissionSet, Role, UserAttributes,
};

/// Map a role and pass type to the permissions of that user category.
///
/// Total and pure: unrecognized roles and attendee pass types fall back to
/// [`default_permissions`], and `attrs` never changes the result. Callers
/// forward attributes separately through `DataScope` and should warn when
/// `role` is unrecognized.
pub fn resolve(role: &Role, pass: Option<&PassType>, _attrs: &UserAttributes) -> PermissionSet {
    match (role, pass) {
        (Role::SuperAdmin, _) => super_admin(),
        (Role::Staff, _) => staff(),
        (Role::Attendee, Some(PassType::General)) => attendee_general(),
        (Role::Attendee, Some(PassType::Course)) => attendee_course(),
        (Role::Attendee, Some(PassType::Sessions)) => attendee_sessions(),
        (Role::Attendee, Some(PassType::Combo)) => attendee_combo(),
        (Role::Attendee, Some(PassType::Unrecognized(_)) | None) => default_permissions(),
        (Role::Exhibitor, _) => exhibitor(),
        (Role::Speaker, _) => speaker(),
        (Role::Unrecognized(_), _) => default_permissions(),
    }
}

/// Convenience wrapper over raw strings as received from the identity store.
pub fn resolve_str(role: &str, pass: Option<&str>, attrs: &UserAttributes) -> PermissionSet {
    let role = Role::parse(role);
    let pass = pass.map(PassType::parse);
    resolve(&role, pass.as_ref(), attrs)
}

/// Minimum privilege: own profile only.
pub fn default_permissions() -> PermissionSet {
    PermissionSet {
        view_profile: true,
        menu_items: vec![MenuItem::Profile],
        ..PermissionSet::default()
    }
}

fn super_admin() -> PermissionSet {
    PermissionSet {
        view_agenda: true,
        view_exhibitors: true,
        view_speakers: true,
        view_registrations: true,
        view_map: true,
        view_networking: true,
        view_profile: true,
        view_my_registrations: true,
        view_qr: true,
        view_exhibitor_panel: true,
        view_speaker_panel: true,
        view_staff_panel: true,
        // favorites belong to sessions/combo attendees only
        can_favorite: false,
        read_only: false,
        can_edit: true,
        can_create: true,
        can_delete: true,
        filter_by_venue: false,
        filter_by_edition: false,
        filter_by_user: false,
        days_allowed: DaySet::ALL,
        show_entries: true,
        show_sessions: true,
        show_courses: true,
        menu_items: vec![
            MenuItem::Agenda,
            MenuItem::Speakers,
            MenuItem::Exhibitors,
            MenuItem::Map,
            MenuItem::Networking,
            MenuItem::MyBrand,
            MenuItem::MySession,
            MenuItem::CheckIn,
            MenuItem::AdminUsers,
            MenuItem::AdminContent,
            MenuItem::Profile,
        ],
        category: Some(ContentCategory::All),
    }
}

fn staff() -> PermissionSet {
    PermissionSet {
        view_agenda: true,
        view_exhibitors: true,
        view_speakers: true,
        view_registrations: true,
        view_map: true,
        view_networking: false,
        view_profile: true,
        view_my_registrations: false,
        view_qr: false,
        // both panels are read-only for staff
        view_exhibitor_panel: true,
        view_speaker_panel: true,
        view_staff_panel: true,
        can_favorite: false,
        read_only: true,
        can_edit: false,
        can_create: false,
        can_delete: false,
        filter_by_venue: false,
        filter_by_edition: false,
        filter_by_user: false,
        days_allowed: DaySet::ALL,
        show_entries: true,
        show_sessions: true,
        show_courses: true,
        menu_items: vec![
            MenuItem::CheckIn,
            MenuItem::Agenda,
            MenuItem::Speakers,
            MenuItem::Exhibitors,
            MenuItem::Map,
            MenuItem::Profile,
        ],
        category: Some(ContentCategory::All),
    }
}

/// Shared shape of every attendee pass: own records, own venue and edition.
fn attendee_base() -> PermissionSet {
    PermissionSet {
        view_profile: true,
        view_my_registrations: true,
        view_qr: true,
        read_only: true,
        filter_by_venue: true,
        filter_by_edition: true,
        filter_by_user: true,
        ..PermissionSet::default()
    }
}

fn attendee_general() -> PermissionSet {
    PermissionSet {
        view_exhibitors: true,
        view_map: true,
        view_networking: true,
        days_allowed: DaySet::FAIR_DAYS,
        show_entries: true,
        menu_items: vec![
            MenuItem::Exhibitors,
            MenuItem::Map,
            MenuItem::Networking,
            MenuItem::MyRegistrations,
            MenuItem::MyQr,
            MenuItem::Profile,
        ],
        category: None,
        ..attendee_base()
    }
}

fn attendee_course() -> PermissionSet {
    PermissionSet {
        view_agenda: true,
        days_allowed: DaySet::COURSE_DAYS,
        show_courses: true,
        menu_items: vec![
            MenuItem::Agenda,
            MenuItem::MyRegistrations,
            MenuItem::MyQr,
            MenuItem::Profile,
        ],
        category: Some(ContentCategory::Course),
        ..attendee_base()
    }
}

fn attendee_sessions() -> PermissionSet {
    PermissionSet {
        view_agenda: true,
        view_exhibitors: true,
        view_speakers: true,
        view_map: true,
        view_networking: true,
        can_favorite: true,
        days_allowed: DaySet::FAIR_DAYS,
        show_entries: true,
        show_sessions: true,
        menu_items: full_attendee_menu(),
        category: Some(ContentCategory::Session),
        ..attendee_base()
    }
}

fn attendee_combo() -> PermissionSet {
    PermissionSet {
        days_allowed: DaySet::ALL,
        show_courses: true,
        category: Some(ContentCategory::All),
        ..attendee_sessions()
    }
}

fn full_attendee_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::Agenda,
        MenuItem::Speakers,
        MenuItem::Exhibitors,
        MenuItem::Map,
        MenuItem::Networking,
        MenuItem::MyRegistrations,
        MenuItem::MyQr,
        MenuItem::Profile,
    ]
}

fn exhibitor() -> PermissionSet {
    PermissionSet {
        view_agenda: true,
        view_exhibitors: true,
        view_map: true,
        view_networking: true,
        view_profile: true,
        view_my_registrations: true,
        view_exhibitor_panel: true,
        // agenda stays read-only; only visitor data is editable
        read_only: true,
        can_edit: true,
        filter_by_venue: true,
        filter_by_edition: true,
        filter_by_user: true,
        days_allowed: DaySet::FAIR_DAYS,
        show_entries: true,
        menu_items: vec![
            MenuItem::MyBrand,
            MenuItem::Agenda,
            MenuItem::Exhibitors,
            MenuItem::Map,
            MenuItem::Networking,
            MenuItem::MyRegistrations,
            MenuItem::Profile,
        ],
        category: None,
        ..PermissionSet::default()
    }
}

fn speaker() -> PermissionSet {
    PermissionSet {
        view_agenda: true,
        view_exhibitors: true,
        view_speakers: true,
        // granted without a menu entry
        view_map: true,
        view_networking: false,
        view_profile: true,
        view_my_registrations: true,
        view_qr: true,
        view_speaker_panel: true,
        read_only: true,
        can_edit: true,
        filter_by_venue: true,
        filter_by_edition: true,
        filter_by_user: true,
        days_allowed: DaySet::ALL,
        show_sessions: true,
        menu_items: vec![
            MenuItem::MySession,
            MenuItem::Agenda,
            MenuItem::Speakers,
            MenuItem::Exhibitors,
            MenuItem::MyRegistrations,
            MenuItem::MyQr,
            MenuItem::Profile,
        ],
        category: None,
        ..PermissionSet::default()
    }
}
