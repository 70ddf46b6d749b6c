//! Port traits: the boundaries between the game-agnostic engine and its
//! collaborators (game rules, record storage, snapshot persistence).

pub mod repository;
pub mod rules;
pub mod store;

pub use repository::StoreRepository;
pub use rules::GameRules;
pub use store::RecordStore;
