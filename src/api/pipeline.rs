/*!
 * The authenticated operation pipeline.
 *
 * Every operation runs the same stages in order: authenticate the caller,
 * validate the payload (writes only), invoke the query engine, serialize
 * the outcome. Failures at any stage serialize to the matching error
 * envelope, so callers always receive an [`ApiResponse`].
 */

use log::{debug, error};

use crate::auth::Authenticator;
use crate::errors::CoreError;
use crate::query::{QueryEngine, SearchFilters};
use crate::store::RecordView;

use super::requests::UpsertRequest;
use super::responses::{self, ApiResponse};
use super::validation;

/// Authenticated front door for every store operation
pub struct Pipeline<A: Authenticator> {
    authenticator: A,
    engine: QueryEngine,
}

impl<A: Authenticator> Pipeline<A> {
    /// Create a pipeline from an authenticator and a query engine
    pub fn new(authenticator: A, engine: QueryEngine) -> Self {
        Self {
            authenticator,
            engine,
        }
    }

    /// Create or refresh a translation record
    pub async fn upsert(&self, token: Option<&str>, request: UpsertRequest) -> ApiResponse {
        finish(self.upsert_inner(token, request).await)
    }

    /// Soft-delete a translation record by id
    pub async fn delete(&self, token: Option<&str>, id: i64) -> ApiResponse {
        finish(self.delete_inner(token, id).await)
    }

    /// List a locale's live records, oldest first
    pub async fn list(&self, token: Option<&str>, locale: &str, page: Option<u32>) -> ApiResponse {
        finish(self.list_inner(token, locale, page).await)
    }

    /// Search live records across locales, most recently updated first
    pub async fn search(
        &self,
        token: Option<&str>,
        filters: SearchFilters,
        page: Option<u32>,
    ) -> ApiResponse {
        finish(self.search_inner(token, filters, page).await)
    }

    /// Export live records as a locale-grouped document
    pub async fn export(
        &self,
        token: Option<&str>,
        locale: Option<&str>,
        page: Option<u32>,
    ) -> ApiResponse {
        finish(self.export_inner(token, locale, page).await)
    }

    async fn upsert_inner(
        &self,
        token: Option<&str>,
        request: UpsertRequest,
    ) -> Result<ApiResponse, CoreError> {
        let principal = self.authenticator.authenticate(token).await?;
        let input = validation::validate_upsert(&request)?;
        debug!(
            "'{}' upserting '{}' for locale '{}'",
            principal.name, input.key, input.locale
        );

        let (record, _) = self
            .engine
            .upsert(&input.key, &input.locale, &input.value, &input.context)
            .await?;

        Ok(responses::upsert_success(&record.view()))
    }

    async fn delete_inner(&self, token: Option<&str>, id: i64) -> Result<ApiResponse, CoreError> {
        let principal = self.authenticator.authenticate(token).await?;
        debug!("'{}' deleting record {}", principal.name, id);

        self.engine.delete(id).await?;

        Ok(responses::delete_success())
    }

    async fn list_inner(
        &self,
        token: Option<&str>,
        locale: &str,
        page: Option<u32>,
    ) -> Result<ApiResponse, CoreError> {
        let principal = self.authenticator.authenticate(token).await?;
        debug!(
            "'{}' listing locale '{}' (page {:?})",
            principal.name, locale, page
        );

        let records = self.engine.list_locale(locale, page).await?;
        let views = records.map(RecordView::from);

        Ok(responses::page_success(&views))
    }

    async fn search_inner(
        &self,
        token: Option<&str>,
        filters: SearchFilters,
        page: Option<u32>,
    ) -> Result<ApiResponse, CoreError> {
        let principal = self.authenticator.authenticate(token).await?;
        debug!("'{}' searching records", principal.name);

        let records = self.engine.search(filters, page).await?;
        let views = records.map(RecordView::from);

        Ok(responses::page_success(&views))
    }

    async fn export_inner(
        &self,
        token: Option<&str>,
        locale: Option<&str>,
        page: Option<u32>,
    ) -> Result<ApiResponse, CoreError> {
        let principal = self.authenticator.authenticate(token).await?;
        debug!(
            "'{}' exporting translations (locale {:?})",
            principal.name, locale
        );

        let document = self.engine.export(locale, page).await?;

        Ok(responses::export_success(&document))
    }
}

/// Serialize the stage outcome, turning errors into their envelopes
fn finish(result: Result<ApiResponse, CoreError>) -> ApiResponse {
    match result {
        Ok(response) => response,
        Err(err) => {
            if let CoreError::Store(store_err) = &err {
                error!("Operation failed against the store: {}", store_err);
            }
            responses::from_error(&err)
        }
    }
}
