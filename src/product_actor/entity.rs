use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{Product, ProductForm, ProductPatch};

impl Entity for Product {
    type Id = u64;
    type CreateParams = ProductForm;
    type Patch = ProductPatch;

    fn id(&self) -> &u64 {
        &self.id
    }

    /// Validates the form and builds the product.
    ///
    /// # Errors
    /// Returns [`FrameworkError::Validation`] with one message per failing field.
    fn from_create_params(id: u64, params: ProductForm) -> Result<Self, FrameworkError> {
        Ok(params.into_product(id)?)
    }

    /// Merge-updates the product. Fields the patch leaves unset keep their values.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), FrameworkError> {
        Ok(patch.apply_to(self)?)
    }
}
