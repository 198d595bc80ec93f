//! Sales endpoint client.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, error};

use super::sale::{NewSale, SaleReceipt};

/// Default timeout for sales requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors that can occur when submitting a sale.
#[derive(Debug, Error)]
pub enum SalesClientError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend refused the sale.
    #[error("request rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status code
        status: u16,

        /// Message reported by the backend
        message: String,
    },
}

/// Something that records sales.
#[automock]
#[async_trait]
pub trait SalesClient: Send + Sync {
    /// Create a sale on behalf of the holder of `token`.
    async fn create_sale(
        &self,
        sale: &NewSale,
        token: &str,
    ) -> Result<SaleReceipt, SalesClientError>;

    /// Sales recorded for the holder of `token`.
    async fn list_sales(&self, token: &str) -> Result<Vec<SaleReceipt>, SalesClientError>;
}

/// Configuration for [`HttpSalesClient`].
#[derive(Debug, Clone)]
pub struct SalesClientConfig {
    /// Sales endpoint URL, e.g. `"https://shop.example/api/ventas"`.
    pub url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// HTTP client for the sales endpoint.
#[derive(Debug, Clone)]
pub struct HttpSalesClient {
    config: SalesClientConfig,
    http: Client,
}

impl HttpSalesClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: SalesClientConfig) -> Result<Self, SalesClientError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }
}

#[async_trait]
impl SalesClient for HttpSalesClient {
    async fn create_sale(
        &self,
        sale: &NewSale,
        token: &str,
    ) -> Result<SaleReceipt, SalesClientError> {
        debug!(url = %self.config.url, product = %sale.product.id, "submitting sale");

        let response = self
            .http
            .post(&self.config.url)
            .bearer_auth(token)
            .json(sale)
            .send()
            .await?;

        read_body(response).await
    }

    async fn list_sales(&self, token: &str) -> Result<Vec<SaleReceipt>, SalesClientError> {
        debug!(url = %self.config.url, "listing sales");

        let response = self
            .http
            .get(&self.config.url)
            .bearer_auth(token)
            .send()
            .await?;

        let listing: SalesListing = read_body(response).await?;

        Ok(listing.into_sales())
    }
}

async fn read_body<T: DeserializeOwned>(response: Response) -> Result<T, SalesClientError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = rejection_message(status, &body);

        error!(status = status.as_u16(), %message, "sales request rejected");

        return Err(SalesClientError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response.json().await?)
}

/// Sale listings come either bare or wrapped in a `data` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SalesListing {
    Bare(Vec<SaleReceipt>),
    Wrapped { data: Vec<SaleReceipt> },
}

impl SalesListing {
    fn into_sales(self) -> Vec<SaleReceipt> {
        match self {
            Self::Bare(sales) | Self::Wrapped { data: sales } => sales,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// The backend's own message when the body carries one, otherwise a generic one.
fn rejection_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("Error {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn rejection_message_prefers_backend_message() {
        let message = rejection_message(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Stock insuficiente"}"#,
        );

        assert_eq!(message, "Stock insuficiente");
    }

    #[test]
    fn rejection_message_falls_back_to_status() {
        assert_eq!(
            rejection_message(StatusCode::UNAUTHORIZED, "<html>nope</html>"),
            "Error 401"
        );
        assert_eq!(
            rejection_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":""}"#),
            "Error 500"
        );
    }

    #[test]
    fn listings_accept_bare_and_wrapped_bodies() -> TestResult {
        let bare: SalesListing =
            serde_json::from_str(r#"[{"id":1},{"id":2,"estado":"ENTREGADO"}]"#)?;
        let wrapped: SalesListing = serde_json::from_str(r#"{"data":[{"id":3}]}"#)?;

        let ids = |listing: SalesListing| -> Vec<Option<u64>> {
            listing.into_sales().iter().map(|sale| sale.id).collect()
        };

        assert_eq!(ids(bare), vec![Some(1), Some(2)]);
        assert_eq!(ids(wrapped), vec![Some(3)]);

        Ok(())
    }

    #[test]
    fn client_builds_from_config() {
        let client = HttpSalesClient::new(SalesClientConfig {
            url: "http://localhost:8080/api/ventas".to_string(),
            timeout: DEFAULT_TIMEOUT,
        });

        assert!(client.is_ok());
    }
}
