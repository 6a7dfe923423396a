pub mod details;
pub mod favorites;
pub mod handlers;
pub mod render;
pub mod search;

pub use details::{DetailsState, DetailsView};
pub use favorites::{Favorites, FAVORITES_KEY};
pub use handlers::*;
pub use search::SearchView;
