use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::m3u_channels_error::M3uChannelsError;
use crate::utils::network::request::{create_client, sanitize_sensitive_info};

/// Reachability check of a stream url.
pub trait StreamProbe {
    fn is_alive(&self, url: &str) -> bool;
}

/// Sends a `HEAD` request, only `200 OK` counts as alive.
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self, M3uChannelsError> {
        Ok(Self { client: create_client(timeout)? })
    }
}

impl StreamProbe for HttpProbe {
    fn is_alive(&self, url: &str) -> bool {
        match self.client.head(url).send() {
            Ok(response) => {
                let status = response.status();
                if status != StatusCode::OK {
                    debug!("probe {} returned {status}", sanitize_sensitive_info(url));
                }
                status == StatusCode::OK
            }
            Err(err) => {
                debug!("probe {} failed: {err}", sanitize_sensitive_info(url));
                false
            }
        }
    }
}
