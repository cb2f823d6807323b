use axum::{
    Json, Router,
    extract::{
        Multipart, State,
        multipart::{Field, MultipartRejection},
    },
    http::StatusCode,
    routing::get,
};

use crate::{
    catalog::CatalogFilter,
    dto::products::{NewProduct, ProductList, UploadedImage},
    error::{AppError, AppResult, ErrorBody},
    middleware::{
        context::RequestContext,
        extract::{ApiPath, ApiQuery},
    },
    models::{Product, ProductDetail},
    response::ApiResponse,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{id}", get(get_product))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("category_id" = Option<i32>, Query, description = "Category id, 0 for all"),
        ("price_range" = Option<String>, Query, description = "below, between or above"),
        ("q" = Option<String>, Query, description = "Case-insensitive name search"),
        ("sort_by" = Option<String>, Query, description = "featured (default), newest, priceDesc, priceAsc"),
    ),
    responses(
        (status = 200, description = "Filtered product list", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<CatalogFilter>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state, filter).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product with category and warehouse names", body = ApiResponse<ProductDetail>),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
    tag = "Products"
)]
pub async fn get_product(
    ApiPath(id): ApiPath<i32>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    let resp = product_service::get_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body(content_type = "multipart/form-data", description = "name, price, remaining, category_id, sale_price, image"),
    responses(
        (status = 201, description = "Create product", body = ApiResponse<Product>),
        (status = 400, description = "Invalid form", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    ctx: RequestContext,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let (payload, image) = read_product_form(multipart).await?;
    let resp = product_service::create_product(&state, &ctx, payload, image).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

async fn read_product_form(
    mut multipart: Multipart,
) -> AppResult<(NewProduct, Option<UploadedImage>)> {
    let mut name = None;
    let mut price = None;
    let mut product = NewProduct::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let field_name = field.name().unwrap_or_default().to_ascii_lowercase();
        match field_name.as_str() {
            "name" => name = Some(text(field).await?),
            "price" => price = Some(parse_number(&field_name, &text(field).await?)?),
            "sale_price" | "saleprice" => {
                product.sale_price = optional_number(&field_name, &text(field).await?)?
            }
            "remaining" => {
                product.remaining = optional_number(&field_name, &text(field).await?)?.unwrap_or(0)
            }
            "category_id" | "categoryid" => {
                product.category_id = optional_number(&field_name, &text(field).await?)?
            }
            "image" => {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                image = Some(UploadedImage {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    product.name = name.ok_or_else(|| AppError::BadRequest("name is required".into()))?;
    product.price = price.ok_or_else(|| AppError::BadRequest("price is required".into()))?;
    Ok((product, image))
}

async fn text(field: Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map(|value| value.trim().to_string())
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> AppResult<T> {
    value
        .parse()
        .map_err(|_| AppError::BadRequest(format!("{field} must be a number")))
}

/// Empty form values mean "not provided".
fn optional_number<T: std::str::FromStr>(field: &str, value: &str) -> AppResult<Option<T>> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_number(field, value).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optional_numbers_are_absent() {
        assert_eq!(optional_number::<i32>("category_id", "").unwrap(), None);
        assert_eq!(optional_number::<i32>("category_id", "4").unwrap(), Some(4));
        assert!(matches!(
            optional_number::<i64>("price", "ten"),
            Err(AppError::BadRequest(_))
        ));
    }
}
