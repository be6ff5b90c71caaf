//! Golden file tests for shopping list aggregation.
//!
//! Each fixture in `fixtures/shopping_list/` holds a cart and the expected
//! aggregated list:
//! ```json
//! {
//!   "cart": [{ "recipe_id": 1, "recipe_name": "...", "author_username": "...", "ingredients": [...] }],
//!   "expected": { "products": [...], "recipes": [...] }
//! }
//! ```

use chrono::NaiveDate;
use glob::glob;
use pantry_core::{CartRecipe, ShoppingList};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct TestCase {
    cart: Vec<CartRecipe>,
    expected: ShoppingList,
}

fn load_test_cases() -> Vec<(String, TestCase)> {
    let pattern = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/shopping_list")
        .join("*.json");
    let pattern_str = pattern.to_string_lossy();

    let mut cases = Vec::new();
    for entry in glob(&pattern_str).expect("Failed to read glob pattern") {
        let path = entry.expect("Failed to read directory entry");
        let name = path.file_stem().unwrap().to_string_lossy().to_string();
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
        let case: TestCase = serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e));
        cases.push((name, case));
    }

    cases.sort_by(|a, b| a.0.cmp(&b.0));
    cases
}

#[test]
fn test_shopping_list_golden_files() {
    let cases = load_test_cases();
    assert!(!cases.is_empty(), "no shopping list fixtures found");

    let mut failures = Vec::new();
    for (name, case) in &cases {
        let actual = ShoppingList::aggregate(&case.cart);
        if actual != case.expected {
            failures.push(format!(
                "\n=== {} ===\nExpected: {:#?}\nActual:   {:#?}\n",
                name, case.expected, actual
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} failures across {} tests:\n{}",
            failures.len(),
            cases.len(),
            failures.concat()
        );
    }
}

#[test]
fn test_every_fixture_renders() {
    let generated_at = NaiveDate::from_ymd_opt(2025, 1, 31)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap();

    for (name, case) in load_test_cases() {
        let report = ShoppingList::aggregate(&case.cart).render(generated_at);

        assert!(
            report.starts_with("Shopping list\nGenerated on 31.01.2025 18:00\n"),
            "{name}: unexpected header"
        );
        let product_lines = report.lines().filter(|l| l.contains(" – ")).count();
        assert_eq!(product_lines, case.expected.products.len(), "{name}");
        let recipe_lines = report.lines().filter(|l| l.starts_with("- ")).count();
        assert_eq!(recipe_lines, case.expected.recipes.len(), "{name}");
    }
}
