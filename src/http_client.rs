use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use tracing::{debug, warn};

const REQUEST_TIMEOUT_SECS: u64 = 10;
pub const MAX_RETRIES: u32 = 3;
const RETRY_PAUSE: Duration = Duration::from_millis(400);

static CLIENT: OnceCell<Client> = OnceCell::new();

pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

/// Runs `attempt` up to `MAX_RETRIES` times, returning the first success or
/// the last error.
pub fn with_retries<T>(url: &str, mut attempt: impl FnMut() -> Result<T>) -> Result<T> {
    let mut last_err = None;
    for n in 1..=MAX_RETRIES {
        match attempt() {
            Ok(v) => return Ok(v),
            Err(err) => {
                debug!(url, attempt = n, error = %err, "request attempt failed");
                last_err = Some(err);
                if n < MAX_RETRIES {
                    thread::sleep(RETRY_PAUSE);
                }
            }
        }
    }
    let err = last_err.unwrap_or_else(|| anyhow::anyhow!("no attempts made"));
    warn!(url, error = %err, "giving up after {MAX_RETRIES} attempts");
    Err(err).with_context(|| format!("fetching {url}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retries_until_success() {
        let mut calls = 0;
        let out = with_retries("http://test", || {
            calls += 1;
            if calls < 2 {
                Err(anyhow::anyhow!("flaky"))
            } else {
                Ok(calls)
            }
        })
        .unwrap();
        assert_eq!(out, 2);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let mut calls = 0;
        let res: Result<()> = with_retries("http://test", || {
            calls += 1;
            Err(anyhow::anyhow!("down"))
        });
        assert!(res.is_err());
        assert_eq!(calls, MAX_RETRIES);
    }
}
