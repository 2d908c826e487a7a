/// Business logic layer
///
/// - `auth`: registration, login, profile summaries
/// - `posts`: post creation, owner-gated edit/delete, cascade lifecycle
/// - `interactions`: comments and reaction toggling
/// - `feed`: paginated, count-enriched listings
/// - `media`: uploaded file storage and best-effort cleanup
pub mod auth;
pub mod feed;
pub mod interactions;
pub mod media;
pub mod posts;

pub use auth::{AuthService, ProfileSummary};
pub use feed::{FeedPage, FeedPost, FeedService};
pub use interactions::{InteractionService, ReactionStatus};
pub use media::MediaStore;
pub use posts::{PostService, PostUpdate};
