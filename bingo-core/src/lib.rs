pub mod card_generator;
pub mod codec;
pub mod game_events;
pub mod ids;
pub mod progress;
pub mod win_detection;
pub mod word_pool;

// Re-export main components
pub use card_generator::*;
pub use game_events::*;
pub use ids::*;
pub use progress::*;
pub use win_detection::*;
pub use word_pool::*;
