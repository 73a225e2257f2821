use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use std::io;
use std::time::Duration;

use super::TransportError;

/// Public GTFS static reference page.
pub const DEFAULT_REFERENCE_URL: &str = "https://developers.google.com/transit/gtfs/reference";
/// User agent sent with reference requests unless overridden.
pub const DEFAULT_USER_AGENT: &str = "gtfs-sqlite/0.1";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Supplies the HTML of the reference documentation.
#[async_trait(?Send)]
pub trait ReferenceSource {
    /// Location the page is read from, used in diagnostics.
    fn location(&self) -> &str;
    /// Fetch the full page body.
    async fn fetch_page(&self) -> Result<String, TransportError>;
}

/// HTTP implementation of [`ReferenceSource`].
#[derive(Debug)]
pub struct HttpReferenceSource {
    client: Client,
    url: String,
    user_agent: String,
}

impl HttpReferenceSource {
    /// Construct a source reading `url`.
    ///
    /// # Errors
    /// Returns [`TransportError::Network`] when the HTTP client cannot be
    /// initialised.
    pub fn new(url: impl Into<String>) -> Result<Self, TransportError> {
        let page_url = url.into();
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| convert_reqwest_error(err, &page_url))?;
        Ok(Self {
            client,
            url: page_url,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        })
    }

    /// Override the default user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[async_trait(?Send)]
impl ReferenceSource for HttpReferenceSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch_page(&self) -> Result<String, TransportError> {
        let response = self
            .client
            .get(&self.url)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .map_err(|err| convert_reqwest_error(err, &self.url))?
            .error_for_status()
            .map_err(|err| convert_reqwest_error(err, &self.url))?;
        response
            .text()
            .await
            .map_err(|err| convert_reqwest_error(err, &self.url))
    }
}

fn convert_reqwest_error(error: reqwest::Error, url: &str) -> TransportError {
    if let Some(status) = error.status() {
        return TransportError::Http {
            url: url.to_owned(),
            status: status.as_u16(),
            message: error.to_string(),
        };
    }

    let kind = if error.is_timeout() {
        io::ErrorKind::TimedOut
    } else {
        io::ErrorKind::Other
    };
    TransportError::Network {
        url: url.to_owned(),
        source: io::Error::new(kind, error),
    }
}
