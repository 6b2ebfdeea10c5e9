use serde::{Deserialize, Serialize};
use std::fmt;

use crate::access::types::View;

/// Navigation entry identifier emitted by the resolver.
/// Routes and icons live here, not in the permission engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuItem {
    Agenda,
    Speakers,
    Exhibitors,
    Map,
    Networking,
    MyRegistrations,
    MyQr,
    /// Exhibitor visitor panel
    MyBrand,
    /// Speaker session panel
    MySession,
    CheckIn,
    AdminUsers,
    AdminContent,
    Profile,
}

/// A rendered navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub id: MenuItem,
    pub route: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
}

impl MenuItem {
    pub const ALL: [MenuItem; 13] = [
        MenuItem::Agenda,
        MenuItem::Speakers,
        MenuItem::Exhibitors,
        MenuItem::Map,
        MenuItem::Networking,
        MenuItem::MyRegistrations,
        MenuItem::MyQr,
        MenuItem::MyBrand,
        MenuItem::MySession,
        MenuItem::CheckIn,
        MenuItem::AdminUsers,
        MenuItem::AdminContent,
        MenuItem::Profile,
    ];

    pub fn id(self) -> &'static str {
        match self {
            MenuItem::Agenda => "agenda",
            MenuItem::Speakers => "speakers",
            MenuItem::Exhibitors => "exhibitors",
            MenuItem::Map => "map",
            MenuItem::Networking => "networking",
            MenuItem::MyRegistrations => "my_registrations",
            MenuItem::MyQr => "my_qr",
            MenuItem::MyBrand => "my_brand",
            MenuItem::MySession => "my_session",
            MenuItem::CheckIn => "check_in",
            MenuItem::AdminUsers => "admin_users",
            MenuItem::AdminContent => "admin_content",
            MenuItem::Profile => "profile",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        MenuItem::ALL.into_iter().find(|m| m.id() == s)
    }

    pub fn route(self) -> &'static str {
        match self {
            MenuItem::Agenda => "/agenda",
            MenuItem::Speakers => "/speakers",
            MenuItem::Exhibitors => "/exhibitors",
            MenuItem::Map => "/map",
            MenuItem::Networking => "/networking",
            MenuItem::MyRegistrations => "/me/registrations",
            MenuItem::MyQr => "/me/qr",
            MenuItem::MyBrand => "/exhibitor/visitors",
            MenuItem::MySession => "/speaker/sessions",
            MenuItem::CheckIn => "/staff/check-in",
            MenuItem::AdminUsers => "/admin/users",
            MenuItem::AdminContent => "/admin/content",
            MenuItem::Profile => "/me",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            MenuItem::Agenda => "calendar",
            MenuItem::Speakers => "mic",
            MenuItem::Exhibitors => "store",
            MenuItem::Map => "map",
            MenuItem::Networking => "users",
            MenuItem::MyRegistrations => "ticket",
            MenuItem::MyQr => "qr-code",
            MenuItem::MyBrand => "briefcase",
            MenuItem::MySession => "presentation",
            MenuItem::CheckIn => "scan",
            MenuItem::AdminUsers => "shield",
            MenuItem::AdminContent => "edit",
            MenuItem::Profile => "user",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Agenda => "Agenda",
            MenuItem::Speakers => "Speakers",
            MenuItem::Exhibitors => "Exhibitors",
            MenuItem::Map => "Expo map",
            MenuItem::Networking => "Networking",
            MenuItem::MyRegistrations => "My registrations",
            MenuItem::MyQr => "My QR",
            MenuItem::MyBrand => "My brand",
            MenuItem::MySession => "My session",
            MenuItem::CheckIn => "Check-in",
            MenuItem::AdminUsers => "Users",
            MenuItem::AdminContent => "Content",
            MenuItem::Profile => "Profile",
        }
    }

    /// The view flag this entry implies.
    pub fn required_view(self) -> View {
        match self {
            MenuItem::Agenda => View::Agenda,
            MenuItem::Speakers => View::Speakers,
            MenuItem::Exhibitors => View::Exhibitors,
            MenuItem::Map => View::Map,
            MenuItem::Networking => View::Networking,
            MenuItem::MyRegistrations => View::MyRegistrations,
            MenuItem::MyQr => View::Qr,
            MenuItem::MyBrand => View::ExhibitorPanel,
            MenuItem::MySession => View::SpeakerPanel,
            MenuItem::CheckIn | MenuItem::AdminUsers | MenuItem::AdminContent => {
                View::StaffPanel
            }
            MenuItem::Profile => View::Profile,
        }
    }

    pub fn is_admin_only(self) -> bool {
        matches!(self, MenuItem::AdminUsers | MenuItem::AdminContent)
    }

    pub fn entry(self) -> NavEntry {
        NavEntry {
            id: self,
            route: self.route(),
            icon: self.icon(),
            label: self.label(),
        }
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Build navigation from menu identifiers, keeping order.
/// Unknown identifiers are skipped.
pub fn navigation<'a, I>(ids: I) -> Vec<NavEntry>
where
    I: IntoIterator<Item = &'a str>,
{
    ids.into_iter()
        .filter_map(|id| match MenuItem::parse(id) {
            Some(item) => Some(item.entry()),
            None => {
                tracing::debug!(menu_item = id, "Skipping unknown menu item");
                None
            }
        })
        .collect()
}

pub fn navigation_for(items: &[MenuItem]) -> Vec<NavEntry> {
    items.iter().map(|item| item.entry()).collect()
}
