use super::errors::ProductError;
use super::value_objects::{Price, ProductId};

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    pub image_url: Option<String>,
}

pub struct NewProductProps {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image_url: Option<String>,
}

/// Fields supplied to a partial update. `None` leaves the stored value untouched.
///
/// `image_url` is doubly optional: `Some(None)` clears the image, `None` keeps it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image_url: Option<Option<String>>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.image_url.is_none()
    }
}

impl Product {
    pub fn new(id: ProductId, props: NewProductProps) -> Result<Self, ProductError> {
        if props.name.trim().is_empty() {
            return Err(ProductError::NameEmpty);
        }
        if props.category.trim().is_empty() {
            return Err(ProductError::CategoryEmpty);
        }
        let price = Price::new(props.price)?;

        Ok(Self {
            id,
            name: props.name,
            description: props.description,
            price,
            category: props.category,
            image_url: normalize_image_url(props.image_url),
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: ProductId,
        name: String,
        description: String,
        price: Price,
        category: String,
        image_url: Option<String>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            price,
            category,
            image_url,
        }
    }

    /// Merges `changes` over this record. The id is never touched.
    pub fn with_changes(&self, changes: ProductChanges) -> Result<Self, ProductError> {
        let mut merged = self.clone();

        if let Some(name) = changes.name {
            if name.trim().is_empty() {
                return Err(ProductError::NameEmpty);
            }
            merged.name = name;
        }
        if let Some(category) = changes.category {
            if category.trim().is_empty() {
                return Err(ProductError::CategoryEmpty);
            }
            merged.category = category;
        }
        if let Some(price) = changes.price {
            merged.price = Price::new(price)?;
        }
        if let Some(description) = changes.description {
            merged.description = description;
        }
        if let Some(image_url) = changes.image_url {
            merged.image_url = normalize_image_url(image_url);
        }

        Ok(merged)
    }
}

fn normalize_image_url(image_url: Option<String>) -> Option<String> {
    image_url.filter(|url| !url.trim().is_empty())
}
