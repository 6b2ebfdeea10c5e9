pub mod errors;
pub mod menu;
pub mod resolver;
pub mod scope;
pub mod types;

use serde::{Deserialize, Serialize};

use menu::NavEntry;
use scope::DataScope;
use types::{PassType, PermissionSet, Role, UserAttributes};

/// What the identity provider tells us about an authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub role: Role,
    #[serde(default)]
    pub pass_type: Option<PassType>,
    #[serde(default)]
    pub attributes: UserAttributes,
}

impl Identity {
    pub fn new(role: Role, pass_type: Option<PassType>, attributes: UserAttributes) -> Self {
        Self {
            role,
            pass_type,
            attributes,
        }
    }

    pub fn resolve(&self) -> PermissionSet {
        resolver::resolve(&self.role, self.pass_type.as_ref(), &self.attributes)
    }
}

/// Permissions plus everything derived from them for one identity.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub permissions: PermissionSet,
    pub navigation: Vec<NavEntry>,
    pub scope: DataScope,
}

impl Resolution {
    pub fn from_permissions(permissions: PermissionSet, attrs: &UserAttributes) -> Self {
        let navigation = menu::navigation_for(&permissions.menu_items);
        let scope = DataScope::forward(&permissions, attrs);
        Self {
            permissions,
            navigation,
            scope,
        }
    }

    pub fn for_identity(identity: &Identity) -> Self {
        if !identity.role.is_recognized() {
            tracing::warn!(
                role = %identity.role,
                "Unrecognized role, granting minimum privilege"
            );
        }
        Self::from_permissions(identity.resolve(), &identity.attributes)
    }
}
