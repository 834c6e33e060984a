use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bipcard_lib::BipCardError;

/// Maps pipeline errors onto status codes with a plain-text body.
#[derive(Debug)]
pub struct ApiError(pub BipCardError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BipCardError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            BipCardError::Portal(_) | BipCardError::Scrape(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> String {
        match &self.0 {
            BipCardError::InvalidInput(msg) => msg.clone(),
            // Upstream details stay in the logs.
            BipCardError::Portal(_) => "portal request failed".to_string(),
            BipCardError::Scrape(e) => e.to_string(),
        }
    }
}

impl From<BipCardError> for ApiError {
    fn from(e: BipCardError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.body()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bipcard_lib::bipcard_portal::Error as PortalError;
    use bipcard_lib::scrape::{Arity, ScrapeError};

    #[test]
    fn invalid_input_is_bad_request() {
        let err = ApiError(BipCardError::InvalidInput("card number is required".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body(), "card number is required");
    }

    #[test]
    fn portal_failure_hides_details() {
        let err = ApiError(BipCardError::Portal(PortalError::RequestFailed(
            "dns error: pocae.tstgo.cl".into(),
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body(), "portal request failed");
    }

    #[test]
    fn scrape_failure_names_the_problem() {
        let err = ApiError(BipCardError::Scrape(ScrapeError::UnexpectedShape {
            what: "card info cells",
            expected: Arity::Exactly(8),
            found: 7,
        }));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.body(),
            "scraping error: unexpected changes in webpage (card info cells: expected exactly 8 matches, found 7)"
        );
    }
}
