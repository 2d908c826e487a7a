/// HTTP request handlers
///
/// Handlers own the wire shapes (one named request/response type per
/// operation) and boundary validation; everything else is delegated to the
/// service layer.
pub mod auth;
pub mod comments;
pub mod feed;
pub mod posts;
pub mod reactions;
pub mod users;

pub use auth::{login, logout, register};
pub use comments::{add_comment, get_comments};
pub use feed::{list_posts, my_posts};
pub use posts::{create_post, delete_post, update_post};
pub use reactions::toggle_reaction;
pub use users::profile;
