//! Single-GET fetcher using the curl crate (libcurl).

use crate::config::FetchConfig;

use super::{FetchError, Fetcher};

const MAX_REDIRECTS: u32 = 10;

/// Fetches a source with one GET. Follows redirects, requires HTTP 200, and
/// aborts once the body grows past `max_body_bytes`.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    config: FetchConfig,
}

impl CurlFetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let limit = self.config.max_body_bytes;
        let mut body: Vec<u8> = Vec::new();
        let mut too_large = false;

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        easy.useragent(&self.config.user_agent())?;
        easy.connect_timeout(self.config.connect_timeout())?;
        easy.timeout(self.config.timeout())?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                if body.len() as u64 + data.len() as u64 > limit {
                    too_large = true;
                    return Ok(0); // abort transfer
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()
        };

        if too_large {
            return Err(FetchError::TooLarge { limit });
        }
        performed?;

        let code = easy.response_code()?;
        if code != 200 {
            return Err(FetchError::Status(code));
        }

        tracing::debug!(url, bytes = body.len(), "fetched source");
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
