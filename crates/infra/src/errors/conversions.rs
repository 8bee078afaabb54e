//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use ticketprobe_domain::TicketProbeError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub TicketProbeError);

impl From<InfraError> for TicketProbeError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<TicketProbeError> for InfraError {
    fn from(value: TicketProbeError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoTicketProbeError {
    fn into_ticketprobe(self) -> TicketProbeError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TicketProbeError */
/* -------------------------------------------------------------------------- */

impl IntoTicketProbeError for HttpError {
    fn into_ticketprobe(self) -> TicketProbeError {
        if self.is_timeout() {
            return TicketProbeError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return TicketProbeError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => TicketProbeError::Auth(message),
                404 => TicketProbeError::NotFound(message),
                429 => TicketProbeError::Network(message),
                400..=499 => TicketProbeError::InvalidInput(message),
                500..=599 => TicketProbeError::Network(message),
                _ => TicketProbeError::Network(message),
            };
        }

        TicketProbeError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_ticketprobe())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use tokio::runtime::Runtime;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn mapped_status_error(status: StatusCode) -> TicketProbeError {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        InfraError::from(error).into()
    }

    #[test]
    fn http_status_401_maps_to_auth_error() {
        Runtime::new().unwrap().block_on(async {
            match mapped_status_error(StatusCode::UNAUTHORIZED).await {
                TicketProbeError::Auth(msg) => assert!(msg.contains("401")),
                other => panic!("expected auth error, got {:?}", other),
            }
        });
    }

    #[test]
    fn http_status_404_maps_to_not_found() {
        Runtime::new().unwrap().block_on(async {
            match mapped_status_error(StatusCode::NOT_FOUND).await {
                TicketProbeError::NotFound(msg) => assert!(msg.contains("404")),
                other => panic!("expected not found, got {:?}", other),
            }
        });
    }

    #[test]
    fn http_status_500_maps_to_network_error() {
        Runtime::new().unwrap().block_on(async {
            match mapped_status_error(StatusCode::INTERNAL_SERVER_ERROR).await {
                TicketProbeError::Network(msg) => assert!(msg.contains("500")),
                other => panic!("expected network error, got {:?}", other),
            }
        });
    }

    #[test]
    fn http_status_422_maps_to_invalid_input() {
        Runtime::new().unwrap().block_on(async {
            match mapped_status_error(StatusCode::UNPROCESSABLE_ENTITY).await {
                TicketProbeError::InvalidInput(msg) => assert!(msg.contains("422")),
                other => panic!("expected invalid input, got {:?}", other),
            }
        });
    }
}
