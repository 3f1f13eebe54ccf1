pub mod helpers;
pub mod home;
pub mod links;
pub mod redirect;
pub mod types;
pub mod uploads;

pub use redirect::RedirectService;

use actix_web::web;

/// 注册全部路由
///
/// 依赖 `web::Data<Arc<LinkService>>` 与 `web::Data<Arc<ThumbnailStore>>`。
/// `/{short_id}` 只匹配单段路径，必须放在最后。
pub fn app_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home::home))
        .route("/shorten", web::post().to(links::create_link))
        .route("/api/urls", web::get().to(links::list_links))
        .route("/api/urls/{short_id}", web::delete().to(links::delete_link))
        .route("/uploads/{filename}", web::get().to(uploads::serve_thumbnail))
        .route("/{short_id}", web::get().to(RedirectService::handle_redirect));
}
