//! Session cookie policy.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use authn_core::config::{CookieConfig, SameSitePolicy};

/// How the session cookie is named, flagged, read, set and cleared.
///
/// The cookie is always `HttpOnly` with `Path=/`; its `Max-Age` is the
/// absolute session TTL.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    secure: bool,
    same_site: SameSite,
    max_age_seconds: i64,
}

impl SessionCookie {
    /// Builds the policy from configuration.
    pub fn new(config: &CookieConfig, absolute_ttl_seconds: i64) -> Self {
        Self {
            name: config.name.clone(),
            secure: config.secure,
            same_site: match config.same_site {
                SameSitePolicy::Lax => SameSite::Lax,
                SameSitePolicy::Strict => SameSite::Strict,
                SameSitePolicy::None => SameSite::None,
            },
            max_age_seconds: absolute_ttl_seconds,
        }
    }

    /// Cookie name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The presented session identifier, if any.
    pub fn read(&self, jar: &CookieJar) -> Option<String> {
        jar.get(&self.name)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Adds the session cookie to the response jar.
    pub fn issue(&self, jar: CookieJar, session_id: String) -> CookieJar {
        jar.add(
            Cookie::build((self.name.clone(), session_id))
                .http_only(true)
                .secure(self.secure)
                .same_site(self.same_site)
                .path("/")
                .max_age(time::Duration::seconds(self.max_age_seconds)),
        )
    }

    /// Instructs the client to delete the session cookie.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build(self.name.clone()).path("/"))
    }
}
