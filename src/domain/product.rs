use serde::{Deserialize, Serialize};

use super::validation::{require_text, ValidationErrors};

/// Products with fewer units than this are reported as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Categories offered by the admin product form. The catalog itself accepts
/// any category string.
pub const CATALOG_CATEGORIES: [&str; 8] = [
    "Textiles",
    "Decor",
    "Kitchen",
    "Lighting",
    "Accessories",
    "Plants",
    "Garden",
    "Furniture",
];

/// Represents one item in the catalog.
///
/// The JSON shape matches what the storefront keeps in local storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    pub stock: u32,
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }
}

/// Payload for creating a product, as entered on the admin form.
///
/// `stock` is signed because the form accepts any number; validation rejects
/// negatives before a [`Product`] is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    pub stock: i64,
    #[serde(default)]
    pub featured: Option<bool>,
}

impl ProductForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "name", &self.name, "Product name is required");
        require_text(
            &mut errors,
            "description",
            &self.description,
            "Product description is required",
        );
        check_price(&mut errors, self.price);
        require_text(&mut errors, "category", &self.category, "Category is required");
        require_text(&mut errors, "image", &self.image, "Product image URL is required");
        check_stock(&mut errors, self.stock);
        errors.into_result()
    }

    /// Validates the form and builds the product stored under `id`.
    pub fn into_product(self, id: u64) -> Result<Product, ValidationErrors> {
        self.validate()?;
        Ok(Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            image: self.image,
            stock: stock_units(self.stock),
            featured: self.featured.unwrap_or(false),
        })
    }
}

/// Partial update for a product. Unset fields keep their current values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub stock: Option<i64>,
    pub featured: Option<bool>,
}

impl ProductPatch {
    /// Checks only the fields the patch sets.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            require_text(&mut errors, "name", name, "Product name is required");
        }
        if let Some(description) = &self.description {
            require_text(
                &mut errors,
                "description",
                description,
                "Product description is required",
            );
        }
        if let Some(price) = self.price {
            check_price(&mut errors, price);
        }
        if let Some(category) = &self.category {
            require_text(&mut errors, "category", category, "Category is required");
        }
        if let Some(image) = &self.image {
            require_text(&mut errors, "image", image, "Product image URL is required");
        }
        if let Some(stock) = self.stock {
            check_stock(&mut errors, stock);
        }
        errors.into_result()
    }

    /// Merges the patch into `product`. Nothing is written unless every set
    /// field is valid.
    pub fn apply_to(self, product: &mut Product) -> Result<(), ValidationErrors> {
        self.validate()?;
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
        if let Some(stock) = self.stock {
            product.stock = stock_units(stock);
        }
        if let Some(featured) = self.featured {
            product.featured = featured;
        }
        Ok(())
    }
}

/// The edit screen submits the whole form; every field becomes an update.
impl From<ProductForm> for ProductPatch {
    fn from(form: ProductForm) -> Self {
        Self {
            name: Some(form.name),
            description: Some(form.description),
            price: Some(form.price),
            category: Some(form.category),
            image: Some(form.image),
            stock: Some(form.stock),
            featured: form.featured,
        }
    }
}

fn check_price(errors: &mut ValidationErrors, price: f64) {
    // NaN fails this comparison too.
    if !(price > 0.0) || !price.is_finite() {
        errors.add("price", "Price must be greater than 0");
    }
}

fn check_stock(errors: &mut ValidationErrors, stock: i64) {
    if stock < 0 {
        errors.add("stock", "Stock cannot be negative");
    } else if u32::try_from(stock).is_err() {
        errors.add("stock", "Stock is too large");
    }
}

// Only called after check_stock accepted the value.
fn stock_units(stock: i64) -> u32 {
    u32::try_from(stock).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ProductForm {
        ProductForm {
            name: "Brass Floor Lamp".into(),
            description: "Adjustable brass lamp".into(),
            price: 299.99,
            category: "Lighting".into(),
            image: "https://example.com/lamp.jpg".into(),
            stock: 5,
            featured: None,
        }
    }

    #[test]
    fn form_defaults_featured_to_false() {
        let product = valid_form().into_product(7).unwrap();
        assert_eq!(product.id, 7);
        assert!(!product.featured);
        assert!(product.is_low_stock());
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = ProductForm::default().validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Product name is required"));
        assert_eq!(errors.get("description"), Some("Product description is required"));
        assert_eq!(errors.get("price"), Some("Price must be greater than 0"));
        assert_eq!(errors.get("category"), Some("Category is required"));
        assert_eq!(errors.get("image"), Some("Product image URL is required"));
        assert!(errors.get("stock").is_none());
    }

    #[test]
    fn rejects_zero_price_and_negative_stock() {
        let form = ProductForm {
            price: 0.0,
            stock: -1,
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("stock"), Some("Stock cannot be negative"));

        let nan = ProductForm {
            price: f64::NAN,
            ..valid_form()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn patch_merges_only_set_fields() {
        let mut product = valid_form().into_product(1).unwrap();
        let patch = ProductPatch {
            price: Some(249.0),
            stock: Some(30),
            ..Default::default()
        };
        patch.apply_to(&mut product).unwrap();

        assert_eq!(product.price, 249.0);
        assert_eq!(product.stock, 30);
        assert_eq!(product.name, "Brass Floor Lamp");
        assert!(!product.is_low_stock());
    }

    #[test]
    fn invalid_patch_leaves_product_untouched() {
        let mut product = valid_form().into_product(1).unwrap();
        let before = product.clone();
        let patch = ProductPatch {
            name: Some("Renamed".into()),
            price: Some(-3.0),
            ..Default::default()
        };
        let errors = patch.apply_to(&mut product).unwrap_err();
        assert_eq!(errors.get("price"), Some("Price must be greater than 0"));
        assert_eq!(product, before);
    }

    #[test]
    fn reads_stored_json_without_featured_flag() {
        let raw = r#"{"id":3,"name":"Marble Coasters Set","description":"Set of 4",
            "price":45.99,"category":"Kitchen","image":"x.jpg","stock":20}"#;
        let product: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(product.id, 3);
        assert!(!product.featured);
    }
}
