//! Profile screen content.

use lca_tv_client::SessionUser;
use lca_tv_core::format::{format_phone, initials};

/// Viewing statistics. Only the demo profile has any; the backend keeps
/// no watch history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStat {
    pub label: &'static str,
    pub value: String,
}

/// What the profile screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub name: String,
    pub initials: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub member_since: Option<String>,
    pub favorites: Vec<&'static str>,
    pub stats: Vec<ProfileStat>,
    /// True when no one is signed in.
    pub is_demo: bool,
}

const FRENCH_MONTHS: [&str; 12] = [
    "Janvier",
    "Février",
    "Mars",
    "Avril",
    "Mai",
    "Juin",
    "Juillet",
    "Août",
    "Septembre",
    "Octobre",
    "Novembre",
    "Décembre",
];

impl ProfileView {
    /// Placeholder profile shown to signed-out visitors.
    #[must_use]
    pub fn demo() -> Self {
        let favorites = vec!["Actualités", "Culture", "Sport"];
        Self {
            name: "Utilisateur Demo".to_string(),
            initials: "U".to_string(),
            email: "demo@lcatv.bf".to_string(),
            phone: "+226 70 XX XX XX".to_string(),
            location: "Ouagadougou, Burkina Faso".to_string(),
            member_since: Some("Décembre 2024".to_string()),
            stats: vec![
                ProfileStat {
                    label: "Temps de visionnage",
                    value: "24h 35min".to_string(),
                },
                ProfileStat {
                    label: "Émissions suivies",
                    value: favorites.len().to_string(),
                },
                ProfileStat {
                    label: "Abonnements",
                    value: "3".to_string(),
                },
            ],
            favorites,
            is_demo: true,
        }
    }

    /// Profile of the signed-in account.
    #[must_use]
    pub fn for_user(user: &SessionUser) -> Self {
        let (phone, created_at) = match user {
            SessionUser::Viewer(viewer) => (viewer.phone.clone(), viewer.created_at),
            SessionUser::Admin(admin) => (None, admin.created_at),
        };
        Self {
            name: user.display_name().to_string(),
            initials: initials(user.display_name()),
            email: user.email().to_string(),
            phone: phone.as_deref().map_or_else(|| "Non renseigné".to_string(), format_phone),
            location: "Burkina Faso".to_string(),
            member_since: created_at.map(|date| {
                use chrono::Datelike;
                let month = usize::try_from(date.month0())
                    .ok()
                    .and_then(|m| FRENCH_MONTHS.get(m))
                    .copied()
                    .unwrap_or_default();
                format!("{month} {}", date.year())
            }),
            favorites: Vec::new(),
            stats: Vec::new(),
            is_demo: false,
        }
    }

    /// Signed-in profile, or the demo one.
    #[must_use]
    pub fn from_session(user: Option<&SessionUser>) -> Self {
        user.map_or_else(Self::demo, Self::for_user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use lca_tv_core::ViewerId;
    use lca_tv_core::models::ViewerUser;

    use super::*;

    #[test]
    fn test_signed_out_visitors_see_demo_profile() {
        let view = ProfileView::from_session(None);
        assert!(view.is_demo);
        assert_eq!(view.email, "demo@lcatv.bf");
        assert_eq!(view.stats[1].value, "3");
    }

    #[test]
    fn test_viewer_profile() {
        let user = SessionUser::Viewer(ViewerUser {
            id: ViewerId::new("v1"),
            username: "fatim".to_string(),
            email: "fatim@gmail.com".to_string(),
            full_name: "Fatimata Ouédraogo".to_string(),
            phone: Some("70123456".to_string()),
            profile_image: None,
            created_at: Some(Utc.with_ymd_and_hms(2024, 8, 15, 10, 0, 0).unwrap()),
            is_active: true,
        });
        let view = ProfileView::from_session(Some(&user));
        assert!(!view.is_demo);
        assert_eq!(view.initials, "FO");
        assert_eq!(view.member_since.as_deref(), Some("Août 2024"));
        assert!(view.phone.starts_with("+226"));
        assert!(view.stats.is_empty());
    }
}
