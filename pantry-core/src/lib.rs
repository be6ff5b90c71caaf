pub mod cooking_time;
pub mod error;
pub mod recipe;
pub mod shopping_list;
pub mod short_link;
pub mod subscription;

pub use cooking_time::{buckets, CookingSpeed, CookingTimeBuckets};
pub use error::{join_ids, RecipeValidationError, ShortLinkError, SubscriptionError};
pub use recipe::{IngredientAmount, RecipeDraft, MAX_IMAGE_LENGTH, MAX_NAME_LENGTH, MIN_AMOUNT, MIN_COOKING_TIME};
pub use shopping_list::{CartRecipe, IngredientLine, ProductLine, RecipeCredit, ShoppingList};
pub use subscription::ensure_distinct;
