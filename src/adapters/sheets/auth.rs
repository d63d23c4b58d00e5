use error_stack::ResultExt;
use google_sheets4::oauth2::{self, authenticator::Authenticator};
use tracing::instrument;

use crate::config::credentials::ServiceAccountCredentials;
use crate::ports::spreadsheet::{SpreadsheetError, SpreadsheetResult};

use super::http_client::{HttpClient, HttpsConnector};

/// Builds the token source. No token is requested until the first API call.
#[instrument(skip(client))]
pub async fn auth(
    credentials: &ServiceAccountCredentials,
    client: HttpClient,
) -> SpreadsheetResult<Authenticator<HttpsConnector>> {
    oauth2::ServiceAccountAuthenticator::with_client(credentials.clone().into_key(), client)
        .build()
        .await
        .change_context(SpreadsheetError::Authentication)
        .attach_printable_lazy(|| {
            format!(
                "Could not build an authenticator for {}",
                credentials.client_email()
            )
        })
}
