pub mod link_service;
pub mod thumbnail_store;

pub use link_service::{CreateLinkRequest, LinkService, UploadedFile};
pub use thumbnail_store::ThumbnailStore;
