pub mod backend;
pub mod guard;
pub mod models;

pub use backend::LinkRepository;
pub use guard::ConnectionGuard;
pub use models::Link;
