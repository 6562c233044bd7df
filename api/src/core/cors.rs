use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::core::config::ConfigError;

/// CORS for the browser front-end: fixed origin allow-list, credentials on.
///
/// Wildcards are not allowed together with credentials, so methods and
/// headers are mirrored from the preflight request instead.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, ConfigError> {
    let origins = origins
        .iter()
        .map(|o| {
            if o == "*" {
                return Err(ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    reason: "`*` cannot be combined with credentials; list origins explicitly"
                        .into(),
                });
            }
            HeaderValue::from_str(o).map_err(|e| ConfigError::Invalid {
                var: "CORS_ORIGINS",
                reason: format!("`{o}` is not a valid header value: {e}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
