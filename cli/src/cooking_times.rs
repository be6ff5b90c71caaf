use anyhow::{Context, Result};
use diesel::PgConnection;
use pantry_core::{buckets, CookingSpeed, CookingTimeBuckets};
use pantry_server::repo::recipes::cooking_times;

/// Print the bucket thresholds, followed by each recipe's bucket when `per_recipe` is set.
pub fn print_buckets(conn: &mut PgConnection, per_recipe: bool) -> Result<()> {
    let recipes = cooking_times(conn).context("Failed to load cooking times")?;
    let times: Vec<i32> = recipes.iter().map(|(_, minutes)| *minutes).collect();

    let Some(b) = buckets(&times) else {
        println!("No recipes yet");
        return Ok(());
    };

    print!("{}", describe(&b));
    if per_recipe {
        println!();
        print!("{}", describe_recipes(&b, &recipes));
    }
    Ok(())
}

fn describe(b: &CookingTimeBuckets) -> String {
    format!(
        "fast:   {} - {} min\nmedium: {} - {} min\nslow:   {} - {} min\n",
        b.fast.0, b.fast.1, b.medium.0, b.medium.1, b.slow.0, b.slow.1
    )
}

fn speed_label(speed: Option<CookingSpeed>) -> &'static str {
    match speed {
        Some(CookingSpeed::Fast) => "fast",
        Some(CookingSpeed::Medium) => "medium",
        Some(CookingSpeed::Slow) => "slow",
        None => "-",
    }
}

fn describe_recipes(b: &CookingTimeBuckets, recipes: &[(String, i32)]) -> String {
    recipes
        .iter()
        .map(|(name, minutes)| {
            format!(
                "{:<6} {:>4} min  {}\n",
                speed_label(b.classify(*minutes)),
                minutes,
                name
            )
        })
        .collect()
}
