use std::fmt::Display;

use reqwest::{Method, RequestBuilder, header};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::backend::{Backend, api_error};
use crate::error::ClientError;

/// One request against a relational collection, PostgREST dialect: filters,
/// ordering and limits ride in the query string; the verb picks the
/// operation. Built by [`Backend::table`], consumed by one of the terminal
/// methods.
pub struct TableQuery<'a> {
    backend: &'a Backend,
    table: String,
    params: Vec<(String, String)>,
    bearer: Option<String>,
}

impl<'a> TableQuery<'a> {
    pub(crate) fn new(backend: &'a Backend, table: &str) -> Self {
        Self {
            backend,
            table: table.to_owned(),
            params: Vec::new(),
            bearer: None,
        }
    }

    /// Columns to return (defaults to `*`).
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".into(), columns.into()));
        self
    }

    /// Equality filter: `?column=eq.value`.
    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.params.push((column.into(), format!("eq.{value}")));
        self
    }

    /// Case-insensitive substring match: `?column=ilike.*needle*`.
    pub fn contains(mut self, column: &str, needle: &str) -> Self {
        self.params
            .push((column.into(), format!("ilike.*{needle}*")));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.params.push(("order".into(), format!("{column}.desc")));
        self
    }

    pub fn order_asc(mut self, column: &str) -> Self {
        self.params.push(("order".into(), format!("{column}.asc")));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.params.push(("limit".into(), n.to_string()));
        self
    }

    /// Attach a user access token. Without one the request goes out under the
    /// anon key, which is how the public site reads and writes.
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    fn request(&self, method: Method) -> RequestBuilder {
        let url = self.backend.endpoint(&format!("/rest/v1/{}", self.table));
        let token = self.bearer.as_deref().unwrap_or(self.backend.anon_key());

        self.backend
            .http()
            .request(method, &url)
            .query(&self.params)
            .header("apikey", self.backend.anon_key())
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
    }

    async fn expect_success(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(api_error(resp).await)
        }
    }

    /// Read matching rows.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, ClientError> {
        let resp = Self::expect_success(self.request(Method::GET).send().await?).await?;
        Ok(resp.json().await?)
    }

    /// Read exactly one row; `MissingRow` if the result set is empty.
    pub async fn fetch_one<T: DeserializeOwned>(self) -> Result<T, ClientError> {
        self.limit(1)
            .fetch()
            .await?
            .into_iter()
            .next()
            .ok_or(ClientError::MissingRow)
    }

    /// Insert rows and return their stored representation.
    pub async fn insert<B, T>(self, rows: &B) -> Result<Vec<T>, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(rows)
            .send()
            .await?;
        Ok(Self::expect_success(resp).await?.json().await?)
    }

    /// Insert a single row and return it as stored.
    pub async fn insert_one<B, T>(self, row: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.insert(row)
            .await?
            .into_iter()
            .next()
            .ok_or(ClientError::MissingRow)
    }

    /// Patch rows matching the filters and return the updated rows.
    pub async fn update<B, T>(self, patch: &B) -> Result<Vec<T>, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .request(Method::PATCH)
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await?;
        Ok(Self::expect_success(resp).await?.json().await?)
    }

    /// Patch rows matching the filters; `MissingRow` if nothing matched.
    pub async fn update_one<B, T>(self, patch: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.update(patch)
            .await?
            .into_iter()
            .next()
            .ok_or(ClientError::MissingRow)
    }

    /// Delete rows matching the filters.
    pub async fn delete(self) -> Result<(), ClientError> {
        let resp = self.request(Method::DELETE).send().await?;
        Self::expect_success(resp).await?;
        Ok(())
    }

    #[cfg(test)]
    fn pairs(&self) -> &[(String, String)] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::Backend;
    use crate::config::BackendConfig;

    fn backend() -> Backend {
        Backend::new(BackendConfig::new("http://127.0.0.1:54321", "anon").unwrap())
    }

    #[test]
    fn builder_accumulates_postgrest_params() {
        let backend = backend();
        let query = backend
            .table("registrations")
            .select("*")
            .eq("status", "pending")
            .order_desc("created_at")
            .limit(5);

        assert_eq!(
            query.pairs(),
            &[
                ("select".to_string(), "*".to_string()),
                ("status".to_string(), "eq.pending".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
                ("limit".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn contains_builds_ilike_pattern() {
        let backend = backend();
        let query = backend.table("registrations").contains("full_name", "ada");
        assert_eq!(query.pairs()[0].1, "ilike.*ada*");
    }
}
