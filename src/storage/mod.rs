mod favorites_writer;
mod preferences;
mod schema;
mod types;
mod user_state;

pub use favorites_writer::{FavoritesWrite, FavoritesWriter};
pub use schema::Database;
pub use types::{DatabaseError, UserState};
pub use user_state::{KEY_FAVORITES, KEY_NOTIF_ENABLED, KEY_ONBOARDED};
