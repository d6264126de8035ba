use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use queso_domain::id::ProductId;
use queso_domain::product::MilkType;

use crate::domain::types::{NewProduct, Product, ProductPatch};
use crate::error::ShopError;
use crate::handlers::extract::AdminUser;
use crate::state::AppState;
use crate::usecase::product::{
    CreateProductUseCase, GetProductUseCase, ListActiveProductsUseCase, UpdateProductUseCase,
};

#[derive(Serialize)]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub nombre: String,
    pub precio: f64,
    pub stock: i32,
    pub leche: MilkType,
    pub descripcion: String,
    pub imagen: String,
    pub activo: bool,
    #[serde(rename = "createdAt", serialize_with = "queso_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", serialize_with = "queso_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            nombre: p.name,
            precio: p.price,
            stock: p.stock,
            leche: p.milk,
            descripcion: p.description,
            imagen: p.image,
            activo: p.active,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

fn parse_product_id(raw: &str) -> Result<ProductId, ShopError> {
    raw.parse().map_err(|_| ShopError::InvalidId)
}

fn default_active() -> bool {
    true
}

// ── POST /productos ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub nombre: String,
    pub precio: f64,
    pub stock: i32,
    pub leche: MilkType,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(default = "default_active")]
    pub activo: bool,
}

pub async fn create_product(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ShopError> {
    let usecase = CreateProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase
        .execute(NewProduct {
            name: body.nombre,
            price: body.precio,
            stock: body.stock,
            milk: body.leche,
            description: body.descripcion.unwrap_or_default(),
            image: body.imagen.unwrap_or_default(),
            active: body.activo,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

// ── GET /productos ───────────────────────────────────────────────────────────

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, ShopError> {
    let usecase = ListActiveProductsUseCase {
        repo: state.product_repo(),
    };
    let products = usecase.execute().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

// ── GET /productos/{id} ──────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ShopError> {
    let id = parse_product_id(&id)?;
    let usecase = GetProductUseCase {
        repo: state.product_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PUT /productos/{id} ──────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UpdateProductRequest {
    pub nombre: Option<String>,
    pub precio: Option<f64>,
    pub stock: Option<i32>,
    pub leche: Option<MilkType>,
    pub descripcion: Option<String>,
    pub imagen: Option<String>,
    pub activo: Option<bool>,
}

pub async fn update_product(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, ShopError> {
    let id = parse_product_id(&id)?;
    let usecase = UpdateProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase
        .execute(
            id,
            ProductPatch {
                name: body.nombre,
                price: body.precio,
                stock: body.stock,
                milk: body.leche,
                description: body.descripcion,
                image: body.imagen,
                active: body.activo,
            },
        )
        .await?;
    Ok(Json(product.into()))
}
