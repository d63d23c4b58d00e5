use error_stack::ResultExt;
use google_sheets4::{hyper, hyper_rustls, Sheets};

use crate::ports::spreadsheet::{SpreadsheetError, SpreadsheetResult};

pub type HttpsConnector = hyper_rustls::HttpsConnector<hyper::client::HttpConnector>;
pub type HttpClient = hyper::Client<HttpsConnector>;
pub type SheetsHub = Sheets<HttpsConnector>;

/// HTTPS client trusting the platform's root certificates.
pub fn http_client() -> SpreadsheetResult<HttpClient> {
    let connector = hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()
        .change_context(SpreadsheetError::Connection)
        .attach_printable("Could not load the native root certificates")?
        .https_or_http()
        .enable_http1()
        .build();

    Ok(hyper::Client::builder().build(connector))
}
