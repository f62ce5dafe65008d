//! Re-derive the stored daily targets of every profile
//!
//! Targets are stored as computed at onboarding time; run this after the
//! formulas change.

use slfit::config::{self, Config};
use slfit::db::Database;
use slfit::models::User;
use slfit::tools::profiles;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    config::init_logging()?;

    let db_path = Config::from_env().database_path;
    println!("Database path: {}", db_path.display());

    let database = Database::open_migrated(&db_path)?;
    let users = database.with_conn(User::list)?;

    let mut failed = 0;
    for user in &users {
        match profiles::recalculate_targets(&database, user.id) {
            Ok(Some(resp)) => println!(
                "  #{} {}: {} -> {} kcal/day, {} ml water",
                user.id,
                user.name,
                resp.previous_daily_calories,
                resp.targets.energy.daily_calories,
                resp.targets.daily_water_ml,
            ),
            Ok(None) => println!("  #{} {}: deleted during run", user.id, user.name),
            Err(e) => {
                failed += 1;
                eprintln!("  #{} {}: {}", user.id, user.name, e);
            }
        }
    }

    println!("Recalculated {} profile(s), {} failed", users.len() - failed, failed);
    Ok(())
}
