//! DTOs mirrored from the backend REST API.
//!
//! Field names match the backend's snake_case JSON exactly. Timestamps go
//! through [`timestamp`] because the backend emits UTC values both with and
//! without an offset.

pub mod advertising;
pub mod analytics;
pub mod auth;
pub mod client;
pub mod content;
pub mod order;
pub mod timestamp;

pub use advertising::{
    AdPackage, AdvertisementRequest, ContactMessage, MessageResponse, PublicAd, PublicAds,
};
pub use analytics::{
    DashboardStats, MonthlyRevenue, OrderPerformance, PerformanceAnalytics, RevenueAnalytics,
};
pub use auth::{
    AdminUser, AdminUserUpdate, AuthResponse, LoginCredentials, NewAdminUser, Registration, Token,
    ViewerUser,
};
pub use client::{AdSpace, Client, Dimensions, NewAdSpace, NewClient};
pub use content::{
    BreakingNews, CommentLikes, HealthStatus, LiveStream, NewComment, Video, VideoComment,
    embed_url,
};
pub use order::{AdOrder, Invoice, NewAdOrder, OrderStatusUpdate};
