use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Product;

static TYPES: &[&str] = &[
    "dairy",
    "produce",
    "bakery",
    "frozen",
    "beverage",
    "snacks",
    "canned goods",
    "condiments",
    "cleaning supplies",
    "paper goods",
];

static ADJECTIVES: &[&str] = &[
    "Organic", "Fresh", "Whole", "Low-Fat", "Frozen", "Dried", "Smoked", "Sparkling",
    "Roasted", "Instant", "Premium", "Classic", "Spicy", "Mild", "Extra",
];

static NOUNS: &[&str] = &[
    "Milk", "Yogurt", "Cheese", "Butter", "Apples", "Carrots", "Spinach", "Bread",
    "Rolls", "Dumplings", "Juice", "Cola", "Crackers", "Granola", "Beans",
    "Tomato Sauce", "Mustard", "Detergent", "Paper Towels", "Rice",
];

static NOTES: &[&str] = &[
    "Weekly delivery",
    "Restocked after audit",
    "Damaged packaging discarded",
    "Customer order",
    "Transferred to front shelf",
    "Returned by customer",
    "Inventory correction",
];

/// Seeded user pool standing in for the external auth directory.
static USERS: &[(&str, &str)] = &[
    ("seed-user-01", "Ana"),
    ("seed-user-02", "Bram"),
    ("seed-user-03", "Chae-won"),
    ("seed-user-04", "Diego"),
    ("seed-user-05", "Emre"),
];

/// Generate a random product name using adjective + noun + serial suffix.
fn random_product_name(rng: &mut impl Rng, serial: usize) -> String {
    let adj = ADJECTIVES.choose(rng).unwrap_or(&"Fresh");
    let noun = NOUNS.choose(rng).unwrap_or(&"Milk");
    format!("{} {} #{:04}", adj, noun, serial)
}

/// Seed the database with `count` random products in batches.
///
/// Expiry dates are spread from a month in the past to four months out so
/// every tier of the expiry classifier has members.
pub async fn seed_products(pool: &PgPool, count: usize) -> AppResult<Vec<Product>> {
    info!("Seeding {} products...", count);

    // StdRng is Send + Sync — safe to hold across async await points
    let mut rng = StdRng::from_entropy();
    let today = Utc::now().date_naive();
    let batch_size = 500_usize;
    let mut all_products: Vec<Product> = Vec::with_capacity(count);

    let chunks = (count + batch_size - 1) / batch_size;

    for chunk in 0..chunks {
        let start = chunk * batch_size;
        let end = (start + batch_size).min(count);
        let this_batch = end - start;

        let mut names: Vec<String> = Vec::with_capacity(this_batch);
        let mut product_types: Vec<String> = Vec::with_capacity(this_batch);
        let mut descriptions: Vec<String> = Vec::with_capacity(this_batch);
        let mut quantities: Vec<i32> = Vec::with_capacity(this_batch);
        let mut expiry_dates: Vec<chrono::NaiveDate> = Vec::with_capacity(this_batch);
        let mut user_ids: Vec<String> = Vec::with_capacity(this_batch);
        let mut user_names: Vec<String> = Vec::with_capacity(this_batch);

        for i in 0..this_batch {
            let name = random_product_name(&mut rng, start + i);
            descriptions.push(if rng.gen_bool(0.7) {
                format!("{} from the regular supplier rotation.", name)
            } else {
                String::new()
            });
            names.push(name);
            product_types.push(TYPES.choose(&mut rng).unwrap().to_string());
            quantities.push(rng.gen_range(0..=500));
            expiry_dates.push(today + Duration::days(rng.gen_range(-30..=120)));
            let (user_id, user_name) = USERS.choose(&mut rng).unwrap();
            user_ids.push(user_id.to_string());
            user_names.push(user_name.to_string());
        }

        // Use unnest for bulk insert (much faster than individual INSERTs)
        let products = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, product_type, description, quantity, expiry_date,
                                  user_id, user_name)
            SELECT * FROM UNNEST($1::text[], $2::text[], $3::text[], $4::int[], $5::date[],
                                 $6::text[], $7::text[])
            RETURNING id, name, product_type, description, quantity, expiry_date,
                      photo_url, user_id, user_name, created_at, updated_at
            "#,
        )
        .bind(&names)
        .bind(&product_types)
        .bind(&descriptions)
        .bind(&quantities)
        .bind(&expiry_dates)
        .bind(&user_ids)
        .bind(&user_names)
        .fetch_all(pool)
        .await?;

        all_products.extend(products);

        info!(
            "  Seeded batch {}/{} ({} products so far)",
            chunk + 1,
            chunks,
            all_products.len()
        );
    }

    info!("Seeding complete. Total: {} products", all_products.len());
    Ok(all_products)
}

/// Seed `count` movement records against the given products, spread over the
/// last 30 days. Returns the number of records written.
pub async fn seed_records(pool: &PgPool, products: &[Product], count: usize) -> AppResult<usize> {
    if products.is_empty() || count == 0 {
        return Ok(0);
    }

    info!("Seeding {} movement records...", count);

    let mut rng = StdRng::from_entropy();
    let now = Utc::now();
    let batch_size = 500_usize;
    let mut seeded = 0_usize;

    let chunks = (count + batch_size - 1) / batch_size;

    for chunk in 0..chunks {
        let this_batch = ((chunk + 1) * batch_size).min(count) - chunk * batch_size;

        let mut product_ids: Vec<Uuid> = Vec::with_capacity(this_batch);
        let mut product_names: Vec<String> = Vec::with_capacity(this_batch);
        let mut kinds: Vec<String> = Vec::with_capacity(this_batch);
        let mut quantities: Vec<i32> = Vec::with_capacity(this_batch);
        let mut user_ids: Vec<String> = Vec::with_capacity(this_batch);
        let mut user_names: Vec<String> = Vec::with_capacity(this_batch);
        let mut notes: Vec<Option<String>> = Vec::with_capacity(this_batch);
        let mut recorded_ats: Vec<chrono::DateTime<Utc>> = Vec::with_capacity(this_batch);

        for _ in 0..this_batch {
            let product = products.choose(&mut rng).unwrap();
            product_ids.push(product.id);
            product_names.push(product.name.clone());
            kinds.push(if rng.gen_bool(0.55) { "entry" } else { "exit" }.to_string());
            quantities.push(rng.gen_range(1..=20));
            let (user_id, user_name) = USERS.choose(&mut rng).unwrap();
            user_ids.push(user_id.to_string());
            user_names.push(user_name.to_string());
            notes.push(if rng.gen_bool(0.3) {
                Some(NOTES.choose(&mut rng).unwrap().to_string())
            } else {
                None
            });
            recorded_ats.push(now - Duration::minutes(rng.gen_range(0..43_200)));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO movement_records (product_id, product_name, kind, quantity,
                                          user_id, user_name, note, recorded_at)
            SELECT product_id, product_name, kind::movement_kind, quantity,
                   user_id, user_name, note, recorded_at
            FROM UNNEST($1::uuid[], $2::text[], $3::text[], $4::int[],
                        $5::text[], $6::text[], $7::text[], $8::timestamptz[])
                 AS t(product_id, product_name, kind, quantity,
                      user_id, user_name, note, recorded_at)
            "#,
        )
        .bind(&product_ids)
        .bind(&product_names)
        .bind(&kinds)
        .bind(&quantities)
        .bind(&user_ids)
        .bind(&user_names)
        .bind(&notes)
        .bind(&recorded_ats)
        .execute(pool)
        .await?;

        seeded += result.rows_affected() as usize;

        info!("  Seeded batch {}/{} ({} records so far)", chunk + 1, chunks, seeded);
    }

    info!("Seeding complete. Total: {} movement records", seeded);
    Ok(seeded)
}
