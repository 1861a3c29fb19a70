use serde::{Deserialize, Serialize};

/// Coarse operator role, carried as a string in the auth user's metadata.
/// Unknown role strings parse to `None` and grant nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Coordinator,
    SupportAgent,
    Viewer,
}

/// A named permission checked against a role. The admin UI gates each screen
/// on one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ViewRegistrations,
    ManageRegistrations,
    ManageTestimonials,
    ManageSupportTickets,
    ManageChat,
    ManageTasks,
    ManageSettings,
}

impl Capability {
    pub const ALL: &'static [Capability] = &[
        Capability::ViewRegistrations,
        Capability::ManageRegistrations,
        Capability::ManageTestimonials,
        Capability::ManageSupportTickets,
        Capability::ManageChat,
        Capability::ManageTasks,
        Capability::ManageSettings,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "view_registrations" => Some(Self::ViewRegistrations),
            "manage_registrations" => Some(Self::ManageRegistrations),
            "manage_testimonials" => Some(Self::ManageTestimonials),
            "manage_support_tickets" => Some(Self::ManageSupportTickets),
            "manage_chat" => Some(Self::ManageChat),
            "manage_tasks" => Some(Self::ManageTasks),
            "manage_settings" => Some(Self::ManageSettings),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewRegistrations => "view_registrations",
            Self::ManageRegistrations => "manage_registrations",
            Self::ManageTestimonials => "manage_testimonials",
            Self::ManageSupportTickets => "manage_support_tickets",
            Self::ManageChat => "manage_chat",
            Self::ManageTasks => "manage_tasks",
            Self::ManageSettings => "manage_settings",
        }
    }
}

impl Role {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "super_admin" => Some(Self::SuperAdmin),
            "coordinator" => Some(Self::Coordinator),
            "support_agent" => Some(Self::SupportAgent),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Coordinator => "coordinator",
            Self::SupportAgent => "support_agent",
            Self::Viewer => "viewer",
        }
    }

    /// The capability set granted to this role.
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            Self::SuperAdmin => Capability::ALL,
            Self::Coordinator => &[
                Capability::ViewRegistrations,
                Capability::ManageRegistrations,
                Capability::ManageTestimonials,
                Capability::ManageTasks,
            ],
            Self::SupportAgent => &[
                Capability::ViewRegistrations,
                Capability::ManageSupportTickets,
                Capability::ManageChat,
            ],
            Self::Viewer => &[Capability::ViewRegistrations],
        }
    }

    pub fn allows(&self, capability: Capability) -> bool {
        matches!(self, Self::SuperAdmin) || self.capabilities().contains(&capability)
    }
}

/// String-level check used by the session manager. `SuperAdmin` passes any
/// capability name, known or not; every other role needs a known tag that is
/// in its set.
pub fn role_has_capability(role: Role, capability: &str) -> bool {
    if role == Role::SuperAdmin {
        return true;
    }
    Capability::from_name(capability).is_some_and(|cap| role.allows(cap))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_admin_passes_arbitrary_capability_names() {
        assert!(role_has_capability(Role::SuperAdmin, "manage_settings"));
        assert!(role_has_capability(Role::SuperAdmin, "not_a_real_capability"));
        assert!(role_has_capability(Role::SuperAdmin, ""));
    }

    #[test]
    fn viewer_only_views_registrations() {
        assert!(role_has_capability(Role::Viewer, "view_registrations"));
        for cap in Capability::ALL {
            if *cap != Capability::ViewRegistrations {
                assert!(!role_has_capability(Role::Viewer, cap.as_str()), "{}", cap.as_str());
            }
        }
    }

    #[test]
    fn coordinator_manages_registrations_but_not_settings() {
        assert!(role_has_capability(Role::Coordinator, "manage_registrations"));
        assert!(role_has_capability(Role::Coordinator, "manage_testimonials"));
        assert!(!role_has_capability(Role::Coordinator, "manage_settings"));
        assert!(!role_has_capability(Role::Coordinator, "manage_support_tickets"));
    }

    #[test]
    fn support_agent_set() {
        assert!(role_has_capability(Role::SupportAgent, "manage_support_tickets"));
        assert!(role_has_capability(Role::SupportAgent, "manage_chat"));
        assert!(!role_has_capability(Role::SupportAgent, "manage_registrations"));
    }

    #[test]
    fn unknown_capability_names_fail_for_non_super_roles() {
        assert!(!role_has_capability(Role::Coordinator, "launch_rockets"));
        assert!(!role_has_capability(Role::Viewer, ""));
    }

    #[test]
    fn role_names_round_trip() {
        for role in [
            Role::SuperAdmin,
            Role::Coordinator,
            Role::SupportAgent,
            Role::Viewer,
        ] {
            assert_eq!(Role::from_name(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_name("intern"), None);
    }

    #[test]
    fn capability_names_round_trip() {
        for cap in Capability::ALL {
            assert_eq!(Capability::from_name(cap.as_str()), Some(*cap));
        }
        assert_eq!(Capability::from_name("manage_everything"), None);
    }
}
