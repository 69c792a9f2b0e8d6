//! Status enums for advertising entities.
//!
//! Each enum serializes to the backend's lowercase wire value and carries
//! the French label and badge class the dashboard displays.

use serde::{Deserialize, Serialize};

/// Error returned when a wire value does not match any variant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    /// Name of the enum being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Implements `as_str`, `Display`, `FromStr` and `ALL` from a wire-value table.
macro_rules! wire_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant, in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The backend wire value.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: s.to_owned(),
                    }),
                }
            }
        }
    };
}

/// Lifecycle of an advertising order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Cancelled,
}

wire_enum!(OrderStatus, "order status", {
    Pending => "pending",
    Active => "active",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl OrderStatus {
    /// French display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Active => "Actif",
            Self::Completed => "Terminé",
            Self::Cancelled => "Annulé",
        }
    }

    /// CSS badge class.
    #[must_use]
    pub const fn badge_class(&self) -> &'static str {
        match self {
            Self::Pending => "badge-warning",
            Self::Active => "badge-success",
            Self::Completed => "badge-info",
            Self::Cancelled => "badge-danger",
        }
    }
}

/// Payment state of an advertising order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
}

wire_enum!(PaymentStatus, "payment status", {
    Pending => "pending",
    Paid => "paid",
    Overdue => "overdue",
});

impl PaymentStatus {
    /// French display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Paid => "Payé",
            Self::Overdue => "En retard",
        }
    }

    /// CSS badge class.
    #[must_use]
    pub const fn badge_class(&self) -> &'static str {
        match self {
            Self::Pending => "badge-warning",
            Self::Paid => "badge-success",
            Self::Overdue => "badge-danger",
        }
    }
}

/// Admin role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access including admin user management.
    Admin,
    /// Manages clients, spaces and orders.
    #[default]
    Editor,
}

wire_enum!(AdminRole, "admin role", {
    Admin => "admin",
    Editor => "editor",
});

impl AdminRole {
    /// French display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Administrateur",
            Self::Editor => "Éditeur",
        }
    }
}

/// Creative format of an ad order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    Image,
    Video,
    Html,
}

wire_enum!(ContentType, "content type", {
    Image => "image",
    Video => "video",
    Html => "html",
});

impl ContentType {
    /// French display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Video => "Vidéo",
            Self::Html => "HTML",
        }
    }
}

/// Editorial priority of a breaking news entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NewsPriority {
    Urgent,
    Important,
    #[default]
    Normal,
}

wire_enum!(NewsPriority, "news priority", {
    Urgent => "urgent",
    Important => "important",
    Normal => "normal",
});

impl NewsPriority {
    /// French display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::Important => "Important",
            Self::Normal => "Normal",
        }
    }

    /// Headline prefix shown in lists.
    #[must_use]
    pub const fn headline(&self) -> &'static str {
        match self {
            Self::Urgent => "🔴 URGENT",
            Self::Important => "⚠️ IMPORTANT",
            Self::Normal => "ℹ️ INFO",
        }
    }
}
