use crate::{
    api::{calculate, cities, results, salaries},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{HttpResponse, error::InternalError, guard, middleware::Condition, web};
use serde_json::json;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Arc<Governor<PeerIpKeyExtractor, NoOpMiddleware>> {
        let burst = requests_per_min.max(1);
        let per_ms = (60_000 / burst as u64).max(1);

        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(burst)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("period and burst are non-zero");
        Arc::new(Governor::new(&cfg))
    }

    // a rate of 0 leaves the routes unlimited
    let upload_on = config.rate_upload_per_min > 0;
    let query_on = config.rate_query_per_min > 0;
    let upload_limiter = build_limiter(config.rate_upload_per_min);
    let query_limiter = build_limiter(config.rate_query_per_min);

    cfg.app_data(json_config(config.json_limit_bytes));

    cfg.service(
        web::scope(&config.api_prefix)
            // /cities
            .service(
                web::resource("/cities")
                    .guard(guard::Post())
                    .wrap(Condition::new(upload_on, upload_limiter.clone()))
                    .to(cities::upload_cities),
            )
            .service(
                web::resource("/cities")
                    .guard(guard::Get())
                    .wrap(Condition::new(query_on, query_limiter.clone()))
                    .to(cities::list_cities),
            )
            // /salaries
            .service(
                web::resource("/salaries")
                    .guard(guard::Post())
                    .wrap(Condition::new(upload_on, upload_limiter.clone()))
                    .to(salaries::upload_salaries),
            )
            .service(
                web::resource("/salaries")
                    .guard(guard::Get())
                    .wrap(Condition::new(query_on, query_limiter.clone()))
                    .to(salaries::list_salaries),
            )
            // /calculate
            .service(
                web::resource("/calculate")
                    .wrap(Condition::new(upload_on, upload_limiter))
                    .route(web::post().to(calculate::calculate_results)),
            )
            // /results
            .service(
                web::resource("/results")
                    .wrap(Condition::new(query_on, query_limiter))
                    .route(web::get().to(results::list_results)),
            ),
    );
}

/// JSON extractor settings: body limit, and malformed bodies answered with the
/// usual failure envelope instead of actix's plain-text error.
fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let body = json!({ "success": false, "error": err.to_string() });
            InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        })
}
