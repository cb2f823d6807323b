use std::path::{Path, PathBuf};

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, EntityTrait, QueryOrder, Set};
use validator::Validate;

use crate::{
    audit,
    catalog::{CatalogFilter, apply_filter},
    dto::products::{CategoryList, NewProduct, ProductList, UploadedImage, WarehouseList},
    entity::{
        categories::{Column as CategoryCol, Entity as Categories, Model as CategoryModel},
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
        warehouses::{Column as WarehouseCol, Entity as Warehouses, Model as WarehouseModel},
    },
    error::{AppError, AppResult},
    middleware::context::RequestContext,
    models::{Category, Product, ProductDetail, Warehouse},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Public path prefix uploaded images are served under.
pub const UPLOADS_ROUTE: &str = "/uploads";

pub async fn list_products(
    state: &AppState,
    filter: CatalogFilter,
) -> AppResult<ApiResponse<ProductList>> {
    let products: Vec<Product> = Products::find()
        .order_by_asc(Column::ProductId)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    let items = apply_filter(&products, &filter);
    let total = items.len();
    Ok(ApiResponse::listed("Products", ProductList { items }, total))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<ProductDetail>> {
    let result = sqlx::query_as::<_, ProductDetail>(
        r#"
        SELECT
            p.product_id AS id, p.name, p.price, p.sale_price, p.remaining,
            p.category_id, p.image_url, p.created_at, p.sold,
            c.name AS category_name,
            w.name AS warehouse_name
        FROM products p
        LEFT JOIN categories c ON p.category_id = c.category_id
        LEFT JOIN warehouses w ON c.warehouse_id = w.warehouse_id
        WHERE p.product_id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&state.pool)
    .await?;
    let result = match result {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Product", result, None))
}

pub async fn create_product(
    state: &AppState,
    ctx: &RequestContext,
    payload: NewProduct,
    image: Option<UploadedImage>,
) -> AppResult<ApiResponse<Product>> {
    payload.validate()?;

    if let Some(category_id) = payload.category_id
        && Categories::find_by_id(category_id)
            .one(&state.orm)
            .await?
            .is_none()
    {
        return Err(AppError::BadRequest(format!(
            "category {category_id} does not exist"
        )));
    }

    let product = with_stored_image(&state.config.upload_dir, image, |image_url| async move {
        let active = ActiveModel {
            product_id: NotSet,
            name: Set(payload.name),
            price: Set(payload.price),
            sale_price: Set(payload.sale_price),
            remaining: Set(payload.remaining),
            category_id: Set(payload.category_id),
            image_url: Set(image_url),
            created_at: NotSet,
            sold: Set(0),
        };
        Ok(active.insert(&state.orm).await?)
    })
    .await?;

    tracing::info!(product_id = product.product_id, "product created");
    audit::record(
        &state.pool,
        ctx,
        None,
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.product_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created successfully",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

struct StoredImage {
    path: PathBuf,
    url: String,
}

/// Stores the optional image, then runs `insert` with its public url.
///
/// A failed insert removes the file again so no upload outlives its row.
async fn with_stored_image<T, F, Fut>(
    upload_dir: &Path,
    image: Option<UploadedImage>,
    insert: F,
) -> AppResult<T>
where
    F: FnOnce(Option<String>) -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let stored = match image {
        Some(image) => Some(store_image(upload_dir, image).await?),
        None => None,
    };

    let result = insert(stored.as_ref().map(|s| s.url.clone())).await;
    if result.is_err()
        && let Some(stored) = &stored
        && let Err(err) = tokio::fs::remove_file(&stored.path).await
    {
        tracing::warn!(error = %err, path = %stored.path.display(), "orphaned upload not removed");
    }
    result
}

/// Writes the image under `upload_dir`.
async fn store_image(upload_dir: &Path, image: UploadedImage) -> AppResult<StoredImage> {
    if image.bytes.is_empty() {
        return Err(AppError::BadRequest("image is empty".into()));
    }
    let file_name = format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        sanitize_file_name(&image.file_name)
    );
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;
    let path = upload_dir.join(&file_name);
    tokio::fs::write(&path, &image.bytes)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(StoredImage {
        path,
        url: format!("{UPLOADS_ROUTE}/{file_name}"),
    })
}

/// Keeps the final path component and only `[A-Za-z0-9._-]` characters.
pub fn sanitize_file_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let items: Vec<Category> = Categories::find()
        .order_by_asc(CategoryCol::CategoryId)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();
    let total = items.len();
    Ok(ApiResponse::listed("Categories", CategoryList { items }, total))
}

pub async fn list_warehouses(state: &AppState) -> AppResult<ApiResponse<WarehouseList>> {
    let items: Vec<Warehouse> = Warehouses::find()
        .order_by_asc(WarehouseCol::WarehouseId)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(warehouse_from_entity)
        .collect();
    let total = items.len();
    Ok(ApiResponse::listed("Warehouses", WarehouseList { items }, total))
}

pub(crate) fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.product_id,
        name: model.name,
        price: model.price,
        sale_price: model.sale_price,
        remaining: model.remaining,
        category_id: model.category_id,
        image_url: model.image_url,
        created_at: model.created_at.with_timezone(&Utc),
        sold: model.sold,
    }
}

fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.category_id,
        name: model.name,
        warehouse_id: model.warehouse_id,
    }
}

fn warehouse_from_entity(model: WarehouseModel) -> Warehouse {
    Warehouse {
        id: model.warehouse_id,
        name: model.name,
        address: model.address,
    }
}
