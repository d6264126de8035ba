use queso_domain::id::ProductId;

use crate::domain::repository::ProductRepository;
use crate::domain::types::{
    NewProduct, Product, ProductPatch, validate_price, validate_product_name, validate_stock,
};
use crate::error::ShopError;

fn check_name(name: &str) -> Result<(), ShopError> {
    if validate_product_name(name) {
        Ok(())
    } else {
        Err(ShopError::invalid_input("nombre must not be empty"))
    }
}

fn check_price(price: f64) -> Result<(), ShopError> {
    if validate_price(price) {
        Ok(())
    } else {
        Err(ShopError::invalid_input("precio must be greater than 0"))
    }
}

fn check_stock(stock: i32) -> Result<(), ShopError> {
    if validate_stock(stock) {
        Ok(())
    } else {
        Err(ShopError::invalid_input("stock must not be negative"))
    }
}

// ── CreateProduct ────────────────────────────────────────────────────────────

pub struct CreateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> CreateProductUseCase<R> {
    pub async fn execute(&self, input: NewProduct) -> Result<Product, ShopError> {
        check_name(&input.name)?;
        check_price(input.price)?;
        check_stock(input.stock)?;
        let product = self.repo.insert(ProductId::generate(), &input).await?;
        tracing::info!(product_id = %product.id, "product created");
        Ok(product)
    }
}

// ── ListActiveProducts ───────────────────────────────────────────────────────

pub struct ListActiveProductsUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> ListActiveProductsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Product>, ShopError> {
        self.repo.list_active().await
    }
}

// ── GetProduct ───────────────────────────────────────────────────────────────

pub struct GetProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> GetProductUseCase<R> {
    pub async fn execute(&self, id: ProductId) -> Result<Product, ShopError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ShopError::ProductNotFound)
    }
}

// ── UpdateProduct ────────────────────────────────────────────────────────────

pub struct UpdateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> UpdateProductUseCase<R> {
    pub async fn execute(&self, id: ProductId, patch: ProductPatch) -> Result<Product, ShopError> {
        if patch.is_empty() {
            return Err(ShopError::MissingData);
        }
        if let Some(ref name) = patch.name {
            check_name(name)?;
        }
        if let Some(price) = patch.price {
            check_price(price)?;
        }
        if let Some(stock) = patch.stock {
            check_stock(stock)?;
        }
        self.repo
            .update(id, &patch)
            .await?
            .ok_or(ShopError::ProductNotFound)
    }
}
