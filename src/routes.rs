use crate::{
    api::{calculation, cities, results, upload},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::{Context, Result};
use std::sync::Arc;

type Limiter = Arc<Governor<PeerIpKeyExtractor, NoOpMiddleware>>;

/// Per-route rate limiters, shared by every worker.
#[derive(Clone)]
pub struct Limiters {
    upload: Limiter,
    calculate: Limiter,
    read: Limiter,
}

impl Limiters {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            upload: Arc::new(build_limiter(config.rate_upload_per_min)?),
            calculate: Arc::new(build_limiter(config.rate_calculate_per_min)?),
            read: Arc::new(build_limiter(config.rate_read_per_min)?),
        })
    }
}

fn build_limiter(requests_per_min: u32) -> Result<Governor<PeerIpKeyExtractor, NoOpMiddleware>> {
    let burst = requests_per_min.max(1);
    let per_ms = (60_000 / burst as u64).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(burst)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .with_context(|| format!("invalid rate limit: {requests_per_min} per minute"))?;
    Ok(Governor::new(&cfg))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiters: &Limiters) {
    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/upload")
                    .wrap(limiters.upload.clone())
                    .app_data(web::PayloadConfig::new(config.max_upload_bytes))
                    // /upload/cities
                    .service(web::resource("/cities").route(web::post().to(upload::upload_cities)))
                    // /upload/salaries
                    .service(
                        web::resource("/salaries").route(web::post().to(upload::upload_salaries)),
                    ),
            )
            .service(
                web::resource("/calculate")
                    .wrap(limiters.calculate.clone())
                    .route(web::post().to(calculation::calculate)),
            )
            .service(
                web::scope("/cities")
                    .wrap(limiters.read.clone())
                    // /cities
                    .service(web::resource("").route(web::get().to(cities::list_cities)))
                    // /cities/options
                    .service(web::resource("/options").route(web::get().to(cities::city_options))),
            )
            .service(
                web::resource("/salaries")
                    .wrap(limiters.read.clone())
                    .route(web::get().to(cities::list_salaries)),
            )
            .service(
                web::scope("/results")
                    .wrap(limiters.read.clone())
                    // /results
                    .service(
                        web::resource("")
                            .route(web::get().to(results::list_results))
                            .route(web::delete().to(results::clear_results)),
                    )
                    // /results/summary
                    .service(
                        web::resource("/summary").route(web::get().to(results::results_summary)),
                    ),
            )
            .service(
                web::resource("/data")
                    .wrap(limiters.upload.clone())
                    .route(web::delete().to(results::clear_all)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_budget_still_builds_a_limiter() {
        assert!(build_limiter(0).is_ok());
        assert!(build_limiter(120_000).is_ok());
    }
}
