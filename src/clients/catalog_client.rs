use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::catalog::{run_query, DashboardStats, QueryPage, QueryParameters};
use crate::domain::{Product, ProductForm, ProductPatch};
use crate::product_actor::CatalogError;

/// Client for the catalog store actor.
///
/// Queries fetch a fresh snapshot and run the pipeline on the caller's side;
/// the actor only ever serves whole-list reads and mutations.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(CatalogClient, Product, CatalogError, product);

impl CatalogClient {
    /// Adds a product; the store assigns its id.
    ///
    /// # Errors
    /// [`CatalogError::Validation`] with per-field messages when the form is invalid.
    #[instrument(skip(self, form), fields(product_name = %form.name))]
    pub async fn add_product(&self, form: ProductForm) -> Result<Product, CatalogError> {
        debug!("Sending request");
        let product = self.inner.create(form).await?;
        info!(product_id = product.id, "Product added");
        Ok(product)
    }

    /// Merge-updates a product and returns its new state.
    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, id: u64, patch: ProductPatch) -> Result<Product, CatalogError> {
        debug!("Sending request");
        Ok(self.inner.update(id, patch).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        debug!("Sending request");
        Ok(self.inner.list().await?)
    }

    #[instrument(
        skip(self, params),
        fields(
            search = %params.search_term,
            category = %params.category.as_str(),
            sort = %params.sort_key,
            page = params.page_number.get()
        )
    )]
    pub async fn query_products(&self, params: &QueryParameters) -> Result<QueryPage, CatalogError> {
        let snapshot = self.list_products().await?;
        let page = run_query(&snapshot, params);
        debug!(
            total_matched = page.total_matched,
            total_pages = page.total_pages,
            "Query evaluated"
        );
        Ok(page)
    }

    #[instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, CatalogError> {
        let snapshot = self.list_products().await?;
        Ok(DashboardStats::compute(&snapshot))
    }
}
