use serde::{Deserialize, Serialize};
use std::fmt;

use crate::access::errors::AccessError;
use crate::access::menu::MenuItem;

/// Account category. Unrecognized strings are kept verbatim instead of rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Attendee,
    Exhibitor,
    Speaker,
    Staff,
    SuperAdmin,
    Unrecognized(String),
}

impl Role {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "attendee" => Role::Attendee,
            "exhibitor" => Role::Exhibitor,
            "speaker" => Role::Speaker,
            "staff" => Role::Staff,
            "super_admin" => Role::SuperAdmin,
            _ => Role::Unrecognized(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Attendee => "attendee",
            Role::Exhibitor => "exhibitor",
            Role::Speaker => "speaker",
            Role::Staff => "staff",
            Role::SuperAdmin => "super_admin",
            Role::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Role::Unrecognized(_))
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Role::parse(s)
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::parse(&s)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket category bought by an attendee. Ignored for every other role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PassType {
    General,
    Course,
    Sessions,
    Combo,
    Unrecognized(String),
}

impl PassType {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => PassType::General,
            "course" => PassType::Course,
            "sessions" => PassType::Sessions,
            "combo" => PassType::Combo,
            _ => PassType::Unrecognized(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PassType::General => "general",
            PassType::Course => "course",
            PassType::Sessions => "sessions",
            PassType::Combo => "combo",
            PassType::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for PassType {
    fn from(s: &str) -> Self {
        PassType::parse(s)
    }
}

impl From<String> for PassType {
    fn from(s: String) -> Self {
        PassType::parse(&s)
    }
}

impl From<PassType> for String {
    fn from(pass: PassType) -> Self {
        pass.as_str().to_string()
    }
}

impl fmt::Display for PassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facts about the account supplied by the identity provider.
/// Every field is optional; absent means nothing to forward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserAttributes {
    pub user_id: Option<String>,
    /// Venue (site) the account belongs to
    pub venue: Option<String>,
    /// Active edition year
    pub edition: Option<i32>,
    pub multi_venue: bool,
    /// Extra day restriction the caller may intersect with `days_allowed`
    pub days: Option<DaySet>,
}

pub const FIRST_DAY: u8 = 1;
pub const LAST_DAY: u8 = 4;

/// Ordered set of attendance days within 1..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Vec<u8>", try_from = "Vec<u8>")]
pub struct DaySet(u8);

impl DaySet {
    pub const EMPTY: DaySet = DaySet(0);
    pub const ALL: DaySet = DaySet(0b1111);
    /// Days 1 and 2
    pub const COURSE_DAYS: DaySet = DaySet(0b0011);
    /// Days 3 and 4
    pub const FAIR_DAYS: DaySet = DaySet(0b1100);

    pub fn new(days: &[u8]) -> Result<Self, AccessError> {
        let mut set = DaySet::EMPTY;
        for &day in days {
            if !(FIRST_DAY..=LAST_DAY).contains(&day) {
                return Err(AccessError::InvalidDay(day));
            }
            set.0 |= 1 << (day - 1);
        }
        Ok(set)
    }

    pub fn contains(self, day: u8) -> bool {
        (FIRST_DAY..=LAST_DAY).contains(&day) && self.0 & (1 << (day - 1)) != 0
    }

    pub fn intersect(self, other: DaySet) -> DaySet {
        DaySet(self.0 & other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = u8> {
        (FIRST_DAY..=LAST_DAY).filter(move |d| self.contains(*d))
    }

    pub fn to_vec(self) -> Vec<u8> {
        self.iter().collect()
    }
}

impl From<DaySet> for Vec<u8> {
    fn from(set: DaySet) -> Self {
        set.to_vec()
    }
}

impl TryFrom<Vec<u8>> for DaySet {
    type Error = AccessError;

    fn try_from(days: Vec<u8>) -> Result<Self, Self::Error> {
        DaySet::new(&days)
    }
}

/// Which agenda items are relevant to the holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCategory {
    Course,
    Session,
    All,
}

/// Protected views of the application, one per view flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Agenda,
    Exhibitors,
    Speakers,
    Registrations,
    Map,
    Networking,
    Profile,
    MyRegistrations,
    Qr,
    ExhibitorPanel,
    SpeakerPanel,
    StaffPanel,
}

impl View {
    pub const ALL: [View; 12] = [
        View::Agenda,
        View::Exhibitors,
        View::Speakers,
        View::Registrations,
        View::Map,
        View::Networking,
        View::Profile,
        View::MyRegistrations,
        View::Qr,
        View::ExhibitorPanel,
        View::SpeakerPanel,
        View::StaffPanel,
    ];

    pub fn id(self) -> &'static str {
        match self {
            View::Agenda => "agenda",
            View::Exhibitors => "exhibitors",
            View::Speakers => "speakers",
            View::Registrations => "registrations",
            View::Map => "map",
            View::Networking => "networking",
            View::Profile => "profile",
            View::MyRegistrations => "my_registrations",
            View::Qr => "qr",
            View::ExhibitorPanel => "exhibitor_panel",
            View::SpeakerPanel => "speaker_panel",
            View::StaffPanel => "staff_panel",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        View::ALL.into_iter().find(|v| v.id() == s)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Everything a user category may see and do. Built only by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    // views
    pub view_agenda: bool,
    pub view_exhibitors: bool,
    pub view_speakers: bool,
    /// Registration history. No menu entry or route exists for it.
    pub view_registrations: bool,
    pub view_map: bool,
    pub view_networking: bool,
    pub view_profile: bool,
    pub view_my_registrations: bool,
    pub view_qr: bool,
    pub view_exhibitor_panel: bool,
    pub view_speaker_panel: bool,
    pub view_staff_panel: bool,

    // capabilities
    pub can_favorite: bool,
    pub read_only: bool,
    pub can_edit: bool,
    pub can_create: bool,
    pub can_delete: bool,

    // data scoping
    pub filter_by_venue: bool,
    pub filter_by_edition: bool,
    pub filter_by_user: bool,

    pub days_allowed: DaySet,

    // registration categories
    pub show_entries: bool,
    pub show_sessions: bool,
    pub show_courses: bool,

    pub menu_items: Vec<MenuItem>,
    pub category: Option<ContentCategory>,
}

impl PermissionSet {
    pub fn allows(&self, view: View) -> bool {
        match view {
            View::Agenda => self.view_agenda,
            View::Exhibitors => self.view_exhibitors,
            View::Speakers => self.view_speakers,
            View::Registrations => self.view_registrations,
            View::Map => self.view_map,
            View::Networking => self.view_networking,
            View::Profile => self.view_profile,
            View::MyRegistrations => self.view_my_registrations,
            View::Qr => self.view_qr,
            View::ExhibitorPanel => self.view_exhibitor_panel,
            View::SpeakerPanel => self.view_speaker_panel,
            View::StaffPanel => self.view_staff_panel,
        }
    }

    /// Gate a view, yielding a 403-mapped error when the flag is off.
    pub fn require(&self, view: View) -> Result<(), AccessError> {
        if self.allows(view) {
            Ok(())
        } else {
            Err(AccessError::Forbidden { view })
        }
    }

    pub fn granted_views(&self) -> Vec<View> {
        View::ALL.into_iter().filter(|v| self.allows(*v)).collect()
    }

    /// Menu items whose implied view flag is off. Empty when consistent.
    pub fn menu_gaps(&self) -> Vec<MenuItem> {
        self.menu_items
            .iter()
            .copied()
            .filter(|item| !self.allows(item.required_view()))
            .collect()
    }
}
