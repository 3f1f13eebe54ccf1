use actix_web::http::header::{HeaderValue, LOCATION};
use actix_web::{HttpResponse, web};
use std::sync::Arc;
use tracing::{trace, warn};

use crate::errors::MinilinkerError;
use crate::services::LinkService;

use super::helpers::error_response;

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        path: web::Path<String>,
        links: web::Data<Arc<LinkService>>,
    ) -> HttpResponse {
        let short_id = path.into_inner();

        match links.resolve(&short_id).await {
            Ok(link) => match HeaderValue::try_from(link.long_url.as_str()) {
                Ok(location) => {
                    trace!("Redirecting {} -> {}", short_id, link.long_url);
                    HttpResponse::Found()
                        .insert_header((LOCATION, location))
                        .finish()
                }
                Err(e) => {
                    warn!("Stored URL for {} is not a valid Location: {}", short_id, e);
                    error_response(&MinilinkerError::storage_query(
                        "Stored URL cannot be used as a redirect target",
                    ))
                }
            },
            Err(e) => error_response(&e),
        }
    }
}
