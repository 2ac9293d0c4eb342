//! Seed the database with sample data for local development.

use rust_decimal::Decimal;

use verdant_api::db::ProductRepository;
use verdant_api::models::NewProduct;

/// The starter catalog inserted by `seed products`.
fn sample_products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            name: "Enamel kettle".to_owned(),
            description: Some("1.5L stovetop kettle, matte sage".to_owned()),
            image: Some("/img/kettle-sage.jpg".to_owned()),
            price: Decimal::new(3450, 2),
        },
        NewProduct {
            name: "Walnut serving board".to_owned(),
            description: Some("End-grain, 40x25cm".to_owned()),
            image: Some("/img/board-walnut.jpg".to_owned()),
            price: Decimal::new(5200, 2),
        },
        NewProduct {
            name: "Linen tea towel set".to_owned(),
            description: None,
            image: None,
            price: Decimal::new(1899, 2),
        },
        NewProduct {
            name: "Stoneware mug".to_owned(),
            description: Some("350ml, speckled glaze".to_owned()),
            image: Some("/img/mug-speckle.jpg".to_owned()),
            price: Decimal::new(1600, 2),
        },
    ]
}

/// Insert the sample catalog.
///
/// Runs on every invocation without checking for duplicates; intended for
/// empty development databases.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn products() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let repo = ProductRepository::new(&pool);

    let mut inserted = 0usize;
    for product in sample_products() {
        let created = repo.create(&product).await?;
        tracing::info!(product_id = %created.id, name = %created.name, "product seeded");
        inserted += 1;
    }

    tracing::info!(count = inserted, "catalog seed complete");
    Ok(())
}
