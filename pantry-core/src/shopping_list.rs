//! Shopping list aggregation.
//!
//! Turns the recipes in a user's cart into one list of products with summed
//! amounts, plus the list of recipes the products came from.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Timestamp format used in the report header.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Ingredient usage of one recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// A recipe referenced by a cart entry, with everything the report needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartRecipe {
    pub recipe_id: i32,
    pub recipe_name: String,
    pub author_username: String,
    pub ingredients: Vec<IngredientLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLine {
    pub name: String,
    pub amount: i64,
    pub measurement_unit: String,
}

impl fmt::Display for ProductLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {} {}", self.name, self.amount, self.measurement_unit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeCredit {
    pub recipe_name: String,
    pub author_username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub products: Vec<ProductLine>,
    pub recipes: Vec<RecipeCredit>,
}

impl ShoppingList {
    /// Aggregate cart entries into product lines and recipe credits.
    ///
    /// Amounts are summed per (lower-cased ingredient name, measurement unit).
    /// A recipe that shows up in several entries contributes its ingredients
    /// once. Credits keep first-seen order.
    pub fn aggregate(entries: &[CartRecipe]) -> Self {
        let mut counted_recipes = HashSet::new();
        let mut groups: HashMap<(String, String), usize> = HashMap::new();
        let mut products: Vec<ProductLine> = Vec::new();

        for entry in entries {
            if !counted_recipes.insert(entry.recipe_id) {
                continue;
            }

            for line in &entry.ingredients {
                let key = (line.name.to_lowercase(), line.measurement_unit.clone());
                match groups.entry(key) {
                    Entry::Occupied(slot) => products[*slot.get()].amount += line.amount,
                    Entry::Vacant(slot) => {
                        slot.insert(products.len());
                        products.push(ProductLine {
                            name: capitalize(&line.name),
                            amount: line.amount,
                            measurement_unit: line.measurement_unit.clone(),
                        });
                    }
                }
            }
        }

        products.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.measurement_unit.cmp(&b.measurement_unit))
        });

        let mut credited = HashSet::new();
        let recipes = entries
            .iter()
            .map(|entry| RecipeCredit {
                recipe_name: entry.recipe_name.clone(),
                author_username: entry.author_username.clone(),
            })
            .filter(|credit| credited.insert(credit.clone()))
            .collect();

        Self { products, recipes }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.recipes.is_empty()
    }

    /// Render the plain-text report.
    pub fn render(&self, generated_at: NaiveDateTime) -> String {
        let mut out = format!(
            "Shopping list\nGenerated on {}\n\nProducts:\n",
            generated_at.format(TIMESTAMP_FORMAT)
        );

        for (position, product) in self.products.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", position + 1, product));
        }

        out.push_str("\nRecipes:\n");
        for credit in &self.recipes {
            out.push_str(&format!(
                "- {} ({})\n",
                credit.recipe_name, credit.author_username
            ));
        }

        out
    }
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
