use chrono::{Months, Utc};
use sqlx::PgPool;
use storefront_api::{
    config::AppConfig,
    db::{create_pool, orm_from_pool, run_migrations},
    services::auth_service::hash_password,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, 2).await?;
    run_migrations(&orm_from_pool(&pool)).await?;

    let warehouse_id = ensure_warehouse(&pool, "Main Warehouse", "12 Harbor Road").await?;
    let mugs = ensure_category(&pool, "Mugs", warehouse_id).await?;
    let apparel = ensure_category(&pool, "Apparel", warehouse_id).await?;
    seed_products(&pool, mugs, apparel).await?;

    let customer_user = ensure_user(&pool, "alice", "alice123").await?;
    let customer_id = ensure_customer(&pool, customer_user, "Alice", "7 Elm Street").await?;
    ensure_membership(&pool, customer_id).await?;

    let counter_id = ensure_counter(&pool, "Counter 1").await?;
    let cashier_user = ensure_user(&pool, "bob", "bob123").await?;
    let cashier_id = ensure_employee(&pool, cashier_user, "Bob", 1_200_000).await?;
    sqlx::query(
        "INSERT INTO cashiers (employee_id, counter_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(cashier_id)
    .bind(counter_id)
    .execute(&pool)
    .await?;

    let consultant_user = ensure_user(&pool, "carol", "carol123").await?;
    let consultant_id = ensure_employee(&pool, consultant_user, "Carol", 1_400_000).await?;
    sqlx::query("INSERT INTO consultants (employee_id) VALUES ($1) ON CONFLICT DO NOTHING")
        .bind(consultant_id)
        .execute(&pool)
        .await?;

    println!(
        "Seed completed. Customer ID: {customer_id}, Cashier ID: {cashier_id}, Consultant ID: {consultant_id}"
    );
    Ok(())
}

async fn ensure_warehouse(pool: &PgPool, name: &str, address: &str) -> anyhow::Result<i32> {
    let existing: Option<(i32,)> =
        sqlx::query_as("SELECT warehouse_id FROM warehouses WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }
    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO warehouses (name, address) VALUES ($1, $2) RETURNING warehouse_id",
    )
    .bind(name)
    .bind(address)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn ensure_category(pool: &PgPool, name: &str, warehouse_id: i32) -> anyhow::Result<i32> {
    let existing: Option<(i32,)> =
        sqlx::query_as("SELECT category_id FROM categories WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }
    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO categories (name, warehouse_id) VALUES ($1, $2) RETURNING category_id",
    )
    .bind(name)
    .bind(warehouse_id)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn seed_products(pool: &PgPool, mugs: i32, apparel: i32) -> anyhow::Result<()> {
    let products = vec![
        ("Ferris Mug", 1_500, None, 100, mugs),
        ("Enamel Camp Mug", 2_800, Some(2_400), 40, mugs),
        ("Crab Tee", 5_000, None, 60, apparel),
        ("Async Hoodie", 9_900, Some(8_900), 25, apparel),
    ];

    for (name, price, sale_price, remaining, category_id) in products {
        sqlx::query(
            r#"
            INSERT INTO products (name, price, sale_price, remaining, category_id)
            SELECT $1, $2, $3, $4, $5
            WHERE NOT EXISTS (SELECT 1 FROM products WHERE name = $1)
            "#,
        )
        .bind(name)
        .bind(price as i64)
        .bind(sale_price.map(|p: i32| p as i64))
        .bind(remaining)
        .bind(category_id)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}

async fn ensure_user(pool: &PgPool, username: &str, password: &str) -> anyhow::Result<i32> {
    let password_hash = hash_password(password)?;
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO users (username, password_hash)
        VALUES ($1, $2)
        ON CONFLICT (username) DO UPDATE SET username = EXCLUDED.username
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {username}");
    Ok(id)
}

async fn ensure_customer(
    pool: &PgPool,
    user_id: i32,
    name: &str,
    address: &str,
) -> anyhow::Result<i32> {
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO customers (user_id, name, address)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id) DO UPDATE SET name = EXCLUDED.name
        RETURNING customer_id
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(address)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn ensure_membership(pool: &PgPool, customer_id: i32) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();
    let due = today.checked_add_months(Months::new(12)).unwrap_or(today);
    sqlx::query(
        r#"
        INSERT INTO member_accounts (account_type, points, start_date, due_date, customer_id)
        VALUES ('Silver', 0, $1, $2, $3)
        ON CONFLICT (customer_id) DO NOTHING
        "#,
    )
    .bind(today)
    .bind(due)
    .bind(customer_id)
    .execute(pool)
    .await?;
    Ok(())
}

async fn ensure_counter(pool: &PgPool, name: &str) -> anyhow::Result<i32> {
    let existing: Option<(i32,)> = sqlx::query_as("SELECT counter_id FROM counters WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }
    let (id,): (i32,) = sqlx::query_as("INSERT INTO counters (name) VALUES ($1) RETURNING counter_id")
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(id)
}

async fn ensure_employee(
    pool: &PgPool,
    user_id: i32,
    name: &str,
    salary: i64,
) -> anyhow::Result<i32> {
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO employees (user_id, name, salary)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id) DO UPDATE SET name = EXCLUDED.name
        RETURNING employee_id
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(salary)
    .fetch_one(pool)
    .await?;
    Ok(id)
}
