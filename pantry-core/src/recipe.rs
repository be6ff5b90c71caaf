use std::collections::{BTreeSet, HashSet};

use crate::error::RecipeValidationError;

pub const MIN_COOKING_TIME: i32 = 1;
pub const MIN_AMOUNT: i32 = 1;
pub const MAX_NAME_LENGTH: usize = 256;
pub const MAX_IMAGE_LENGTH: usize = 255;

/// One `{id, amount}` entry of a recipe payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub id: i32,
    pub amount: i32,
}

/// Candidate contents of a recipe aggregate, as submitted for create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
}

impl RecipeDraft {
    /// Check the draft against the aggregate invariants.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// ingredients, tags, amounts, cooking time, then the text fields.
    pub fn validate(&self) -> Result<(), RecipeValidationError> {
        if self.ingredients.is_empty() {
            return Err(RecipeValidationError::EmptyIngredients);
        }

        let duplicate_ingredients = duplicates(self.ingredients.iter().map(|i| i.id));
        if !duplicate_ingredients.is_empty() {
            return Err(RecipeValidationError::DuplicateIngredient(
                duplicate_ingredients,
            ));
        }

        if self.tags.is_empty() {
            return Err(RecipeValidationError::EmptyTags);
        }

        let duplicate_tags = duplicates(self.tags.iter().copied());
        if !duplicate_tags.is_empty() {
            return Err(RecipeValidationError::DuplicateTag(duplicate_tags));
        }

        if let Some(bad) = self.ingredients.iter().find(|i| i.amount < MIN_AMOUNT) {
            return Err(RecipeValidationError::InvalidAmount {
                ingredient_id: bad.id,
                amount: bad.amount,
            });
        }

        if self.cooking_time < MIN_COOKING_TIME {
            return Err(RecipeValidationError::InvalidCookingTime(
                self.cooking_time,
            ));
        }

        if self.name.trim().is_empty() {
            return Err(RecipeValidationError::EmptyName);
        }

        if self.name.chars().count() > MAX_NAME_LENGTH {
            return Err(RecipeValidationError::NameTooLong {
                max: MAX_NAME_LENGTH,
            });
        }

        if self.text.trim().is_empty() {
            return Err(RecipeValidationError::EmptyText);
        }

        if self.image.trim().is_empty() {
            return Err(RecipeValidationError::MissingImage);
        }

        if self.image.chars().count() > MAX_IMAGE_LENGTH {
            return Err(RecipeValidationError::ImageTooLong {
                max: MAX_IMAGE_LENGTH,
            });
        }

        Ok(())
    }

    pub fn ingredient_ids(&self) -> Vec<i32> {
        self.ingredients.iter().map(|i| i.id).collect()
    }
}

/// Ids that occur more than once, each reported once in ascending order.
fn duplicates(ids: impl IntoIterator<Item = i32>) -> Vec<i32> {
    let mut seen = HashSet::new();
    let mut repeated = BTreeSet::new();

    for id in ids {
        if !seen.insert(id) {
            repeated.insert(id);
        }
    }

    repeated.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RecipeDraft {
        RecipeDraft {
            name: "Borscht".to_string(),
            image: "recipes/borscht.png".to_string(),
            text: "Boil the beets.".to_string(),
            cooking_time: 90,
            tags: vec![1, 2],
            ingredients: vec![
                IngredientAmount { id: 10, amount: 300 },
                IngredientAmount { id: 11, amount: 2 },
            ],
        }
    }

    #[test]
    fn test_valid_draft() {
        assert_eq!(draft().validate(), Ok(()));
    }

    #[test]
    fn test_duplicates_reported_once_sorted() {
        assert_eq!(duplicates([5, 3, 5, 3, 5, 1]), vec![3, 5]);
        assert!(duplicates([1, 2, 3]).is_empty());
    }

    #[test]
    fn test_ingredients_checked_before_tags() {
        let mut d = draft();
        d.ingredients.clear();
        d.tags.clear();
        assert_eq!(d.validate(), Err(RecipeValidationError::EmptyIngredients));
    }

    #[test]
    fn test_first_bad_amount_is_reported() {
        let mut d = draft();
        d.ingredients = vec![
            IngredientAmount { id: 10, amount: 1 },
            IngredientAmount { id: 11, amount: 0 },
            IngredientAmount { id: 12, amount: -4 },
        ];
        assert_eq!(
            d.validate(),
            Err(RecipeValidationError::InvalidAmount {
                ingredient_id: 11,
                amount: 0
            })
        );
    }

    #[test]
    fn test_name_length_counts_characters() {
        let mut d = draft();
        d.name = "щ".repeat(MAX_NAME_LENGTH);
        assert_eq!(d.validate(), Ok(()));

        d.name.push('щ');
        assert_eq!(
            d.validate(),
            Err(RecipeValidationError::NameTooLong {
                max: MAX_NAME_LENGTH
            })
        );
    }

    #[test]
    fn test_image_length_boundary() {
        let mut d = draft();
        d.image = "i".repeat(MAX_IMAGE_LENGTH);
        assert_eq!(d.validate(), Ok(()));

        d.image.push('i');
        assert_eq!(
            d.validate(),
            Err(RecipeValidationError::ImageTooLong {
                max: MAX_IMAGE_LENGTH
            })
        );

        d.image = "i".repeat(300);
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_blank_text_fields() {
        let mut d = draft();
        d.name = "   ".to_string();
        assert_eq!(d.validate(), Err(RecipeValidationError::EmptyName));

        let mut d = draft();
        d.text = "\n".to_string();
        assert_eq!(d.validate(), Err(RecipeValidationError::EmptyText));

        let mut d = draft();
        d.image = String::new();
        assert_eq!(d.validate(), Err(RecipeValidationError::MissingImage));
    }
}
