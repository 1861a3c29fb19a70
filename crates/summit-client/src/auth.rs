use tracing::debug;

use summit_types::api::{TokenRequest, TokenResponse};

use crate::backend::{Backend, api_error};
use crate::error::ClientError;

impl Backend {
    /// Exchange credentials for a token bundle.
    ///
    /// `POST {base}/auth/v1/token?grant_type=password` with the credentials
    /// as the JSON body. A non-success response becomes `ClientError::Api`
    /// carrying the server's message (`error_description` and friends), which
    /// the session layer surfaces verbatim to the login form.
    pub async fn auth_password_grant(
        &self,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, ClientError> {
        let url = self.endpoint("/auth/v1/token?grant_type=password");
        debug!(email, "requesting password grant");

        let resp = self
            .http()
            .post(&url)
            .header("apikey", self.anon_key())
            .json(&TokenRequest {
                email: email.to_owned(),
                password: password.to_owned(),
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }

        Ok(resp.json::<TokenResponse>().await?)
    }
}
