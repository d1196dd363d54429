use chrono::{Duration, NaiveDate};
use pet_adoption_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    middleware::auth::AuthKeys,
};
use uuid::Uuid;

/// Fixed ids so the printed development tokens stay valid across reseeds.
const ACCOUNTS: [(u128, &str, &str, &str, &str); 4] = [
    (0x0a, "admin@example.com", "Ada", "Admin", "admin"),
    (0x0b, "vet@example.com", "Victor", "Vet", "vet"),
    (0x0c, "volunteer@example.com", "Vera", "Volunteer", "volunteer"),
    (0x0d, "user@example.com", "Uma", "User", "user"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;
    let pool = orm.get_postgres_connection_pool();

    for (id, email, first, last, role) in ACCOUNTS {
        ensure_account(pool, Uuid::from_u128(id), email, first, last, role).await?;
    }
    ensure_approved_volunteer(pool, Uuid::from_u128(ACCOUNTS[2].0)).await?;

    seed_pets(pool).await?;
    seed_products(pool).await?;
    seed_articles(pool).await?;
    seed_activities(pool).await?;

    let keys = AuthKeys::from_secret(config.jwt_secret.as_bytes());
    println!("Seed completed. Development tokens (valid 30 days):");
    for (id, email, _, _, role) in ACCOUNTS {
        let token = keys.issue(Uuid::from_u128(id), Some(email), Duration::days(30))?;
        println!("  {role:<9} {email}\n    {token}");
    }
    Ok(())
}

async fn ensure_account(
    pool: &sqlx::PgPool,
    user_id: Uuid,
    email: &str,
    first_name: &str,
    last_name: &str,
    role: &str,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO profiles (id, email, first_name, last_name)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE SET email = EXCLUDED.email
        "#,
    )
    .bind(user_id)
    .bind(email)
    .bind(first_name)
    .bind(last_name)
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO user_roles (user_id, role)
        VALUES ($1, $2)
        ON CONFLICT (user_id) DO UPDATE SET role = EXCLUDED.role, updated_at = NOW()
        "#,
    )
    .bind(user_id)
    .bind(role)
    .execute(pool)
    .await?;

    println!("Ensured account {email} (role={role})");
    Ok(())
}

async fn ensure_approved_volunteer(pool: &sqlx::PgPool, user_id: Uuid) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO volunteers (id, user_id, availability, skills, status, approved_at)
        VALUES ($1, $2, 'Weekends', 'Dog walking, socialising cats', 'approved', NOW())
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(())
}

async fn table_is_empty(pool: &sqlx::PgPool, table: &str) -> anyhow::Result<bool> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;
    Ok(count == 0)
}

async fn seed_pets(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    if !table_is_empty(pool, "pets").await? {
        println!("Pets already present, skipping");
        return Ok(());
    }

    let pets = [
        ("Max", "dog", "Golden Retriever", 3, "male", "large", "Friendly and loves fetch.", true, true, "high"),
        ("Luna", "cat", "Siamese", 2, "female", "small", "Calm lap cat who enjoys sunny windows.", true, false, "low"),
        ("Charlie", "dog", "Beagle", 5, "male", "medium", "Curious nose, gentle with kids.", true, true, "medium"),
        ("Bella", "rabbit", "Holland Lop", 1, "female", "small", "Litter trained and very social.", true, true, "medium"),
        ("Rocky", "dog", "German Shepherd", 8, "male", "large", "Senior gentleman looking for a quiet home.", false, false, "low"),
        ("Kiwi", "bird", "Budgerigar", 1, "female", "small", "Chatty and bright.", true, true, "high"),
    ];

    for (name, species, breed, age, gender, size, description, kids, pets_ok, energy) in pets {
        sqlx::query(
            r#"
            INSERT INTO pets (id, name, species, breed, age, gender, size, description,
                              health_status, vaccination_status, spayed_neutered,
                              good_with_kids, good_with_pets, energy_level, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'Healthy', 'Up to date', TRUE,
                    $9, $10, $11, 'available')
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(species)
        .bind(breed)
        .bind(age)
        .bind(gender)
        .bind(size)
        .bind(description)
        .bind(kids)
        .bind(pets_ok)
        .bind(energy)
        .execute(pool)
        .await?;
    }

    println!("Seeded pets");
    Ok(())
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    // Prices in cents.
    let products = [
        ("Premium Dog Food 5kg", "Grain-free kibble for adult dogs", 3499_i64, "food", 40),
        ("Cat Feather Wand", "Interactive toy for indoor cats", 899, "toys", 120),
        ("Reflective Leash", "1.8 m leash with padded handle", 1599, "accessories", 60),
        ("Flea & Tick Drops", "Monthly topical treatment", 2499, "health", 35),
        ("Slicker Brush", "Removes loose undercoat", 1199, "grooming", 80),
    ];

    for (name, desc, price, category, stock) in products {
        sqlx::query(
            r#"
            INSERT INTO store_products (id, name, description, price, category, stock)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(desc)
        .bind(price)
        .bind(category)
        .bind(stock)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}

async fn seed_articles(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    if !table_is_empty(pool, "care_articles").await? {
        println!("Articles already present, skipping");
        return Ok(());
    }

    let articles = [
        (
            "Your New Dog's First Week",
            "Keep routines simple, introduce the household slowly and book a vet checkup within seven days.",
            "training",
        ),
        (
            "Feeding Cats Through the Ages",
            "Kittens need frequent small meals; seniors benefit from higher moisture diets.",
            "nutrition",
        ),
        (
            "Vaccination Basics",
            "Core vaccines protect against the most common and severe diseases. Ask your vet about boosters.",
            "health",
        ),
    ];

    for (title, content, category) in articles {
        sqlx::query(
            r#"
            INSERT INTO care_articles (id, title, content, category, author)
            VALUES ($1, $2, $3, $4, 'Shelter Team')
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(content)
        .bind(category)
        .execute(pool)
        .await?;
    }

    println!("Seeded articles");
    Ok(())
}

async fn seed_activities(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    if !table_is_empty(pool, "volunteer_activities").await? {
        println!("Activities already present, skipping");
        return Ok(());
    }

    let today = chrono::Utc::now().date_naive();
    let activities: [(&str, &str, NaiveDate, &str, i32); 3] = [
        ("Morning Dog Walk", "Walk the kennel dogs around the park", today + Duration::days(3), "08:00", 4),
        ("Adoption Fair", "Help visitors meet adoptable pets", today + Duration::days(10), "10:00", 6),
        ("Cattery Cleanup", "Clean and restock the cat rooms", today + Duration::days(5), "14:00", 2),
    ];

    for (title, description, date, time, needed) in activities {
        sqlx::query(
            r#"
            INSERT INTO volunteer_activities (id, title, description, date, time, location, volunteers_needed)
            VALUES ($1, $2, $3, $4, $5, 'Main Shelter', $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(description)
        .bind(date)
        .bind(time)
        .bind(needed)
        .execute(pool)
        .await?;
    }

    println!("Seeded activities");
    Ok(())
}
