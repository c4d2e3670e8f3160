use crate::{
    api::{notification, questionnaire, resignation},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let register_limiter = Arc::new(build_limiter(config.rate_register_per_min));
    let refresh_limiter = Arc::new(build_limiter(config.rate_refresh_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/register")
                    .wrap(register_limiter.clone())
                    .route(web::post().to(handlers::register)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(refresh_limiter.clone())
                    .route(web::post().to(handlers::refresh_token)),
            )
            .service(
                web::resource("/logout")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter) // rate limiting
            .service(
                web::scope("/user")
                    // /user/resignation
                    .service(
                        web::resource("/resignation")
                            .route(web::post().to(resignation::submit_resignation)),
                    )
                    // /user/resignation_status
                    .service(
                        web::resource("/resignation_status")
                            .route(web::get().to(resignation::resignation_status)),
                    )
                    // /user/responses
                    .service(
                        web::resource("/responses")
                            .route(web::post().to(questionnaire::submit_responses)),
                    )
                    // /user/notifications
                    .service(
                        web::resource("/notifications")
                            .route(web::get().to(notification::list_notifications)),
                    )
                    // /user/notifications/{id}/read
                    .service(
                        web::resource("/notifications/{id}/read")
                            .route(web::patch().to(notification::mark_notification_read)),
                    ),
            )
            .service(
                web::scope("/admin")
                    // /admin/resignations
                    .service(
                        web::resource("/resignations")
                            .route(web::get().to(resignation::list_resignations)),
                    )
                    // /admin/conclude_resignation
                    .service(
                        web::resource("/conclude_resignation")
                            .route(web::put().to(resignation::conclude_resignation)),
                    )
                    // /admin/exit_responses
                    .service(
                        web::resource("/exit_responses")
                            .route(web::get().to(questionnaire::list_exit_responses)),
                    ),
            ),
    );
}
