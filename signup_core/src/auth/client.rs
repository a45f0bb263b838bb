use super::error::{self, Error};
use super::{google, register, AuthProvider};
use serde::de::DeserializeOwned;
use url::Url;

/// HTTP client for the auth provider
#[derive(Debug, Clone)]
pub struct Client {
    /// The server to connect to. Should only be the protocol and domain, e.g.
    /// `https://auth.your-domain.com`.
    pub server: String,

    /// Connection pool to make requests with
    http: reqwest::Client,
}

impl Client {
    /// Construct a new client
    pub fn new(server: String) -> Self {
        Self::with_http(server, reqwest::Client::new())
    }

    /// Construct a new client that shares an existing connection pool
    pub fn with_http(server: String, http: reqwest::Client) -> Self {
        Self { server, http }
    }

    /// Create a new account.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    #[tracing::instrument(skip(self, req), fields(server = %self.server, email = %req.email))]
    pub async fn register(&self, req: &register::Req) -> error::Result<register::Resp> {
        let url = self.url(register::PATH)?;

        Self::handle_response(self.http.post(url).json(req)).await
    }

    /// Sign up or in with a Google account.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    #[tracing::instrument(skip(self), fields(server = %self.server))]
    pub async fn google(&self) -> error::Result<google::Resp> {
        let url = self.url(google::PATH)?;

        Self::handle_response(self.http.post(url)).await
    }

    /// Resolve an endpoint path against the configured server.
    fn url(&self, path: &str) -> error::Result<Url> {
        Ok(Url::parse(&self.server)?.join(path)?)
    }

    /// Convert an HTTP response into a result, interpreting errors in a
    /// standard way.
    ///
    /// ## Errors
    ///
    /// - `Ok(..)` if the server returned a success (2xx)
    /// - `Error::Client` if the server returned a client error (4xx). The
    ///   message comes from the `{"error": ..}` body, or is the status itself
    ///   if the body isn't one of ours.
    /// - `Error::Server` if the server returned a server error (5xx)
    /// - `Error::Unexpected` if the server returned something else (the server is
    ///   not supposed to issue redirects or informational responses.)
    async fn handle_response<T>(resp: reqwest::RequestBuilder) -> error::Result<T>
    where
        T: DeserializeOwned,
    {
        let resp = resp.send().await?;

        let status = resp.status();

        if status.is_success() {
            Ok(resp.json().await?)
        } else if status.is_client_error() {
            // Proxies in front of the provider answer with their own bodies.
            let message = match resp.json::<error::ErrorResp>().await {
                Ok(err) => err.error,
                Err(err) => {
                    tracing::debug!(?err, %status, "client error without an error body");
                    status.to_string()
                }
            };

            Err(Error::Client(message))
        } else if status.is_server_error() {
            Err(Error::Server)
        } else {
            Err(Error::Unexpected(status))
        }
    }
}

impl AuthProvider for Client {
    async fn sign_up(&self, req: &register::Req) -> error::Result<()> {
        let resp = self.register(req).await?;
        tracing::info!(email = %resp.email, "registered");

        Ok(())
    }

    async fn login_with_google(&self) -> error::Result<()> {
        let resp = self.google().await?;
        tracing::info!(email = %resp.email, "signed up with google");

        Ok(())
    }
}
