use log::{error, info};
use std::env;

use meal_nutrition::engine_from_files;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get the data files and optional meal ids from command-line arguments
    let args: Vec<String> = env::args().collect();
    let products = args
        .get(1)
        .ok_or("Usage: meal-nutrition <products.json> <meals.json> [meal-id...]")?;
    let meals = args
        .get(2)
        .ok_or("Usage: meal-nutrition <products.json> <meals.json> [meal-id...]")?;
    let meal_ids = &args[3..];

    let engine = engine_from_files(products, meals).await?;
    info!(
        "Scoring with {:?} formula, {} matching",
        engine.formula(),
        engine.match_mode()
    );

    if meal_ids.is_empty() {
        let health_map = engine.health_map().await?;
        println!("{}", serde_json::to_string_pretty(&health_map)?);
        return Ok(());
    }

    for meal_id in meal_ids {
        match engine.meal(meal_id).await? {
            Some(meal) => println!("{}", serde_json::to_string_pretty(&meal)?),
            None => error!("Meal {} not found or has no valid ingredients", meal_id),
        }
    }

    Ok(())
}
