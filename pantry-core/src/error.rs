use thiserror::Error;

/// Reasons a recipe payload is rejected before anything touches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecipeValidationError {
    #[error("Recipe must contain at least one ingredient")]
    EmptyIngredients,

    #[error("Duplicate ingredients: {}", join_ids(.0))]
    DuplicateIngredient(Vec<i32>),

    #[error("Recipe must contain at least one tag")]
    EmptyTags,

    #[error("Duplicate tags: {}", join_ids(.0))]
    DuplicateTag(Vec<i32>),

    #[error("Amount of ingredient {ingredient_id} must be at least 1, got {amount}")]
    InvalidAmount { ingredient_id: i32, amount: i32 },

    #[error("Cooking time must be at least 1 minute, got {0}")]
    InvalidCookingTime(i32),

    #[error("Recipe name cannot be empty")]
    EmptyName,

    #[error("Recipe name cannot be longer than {max} characters")]
    NameTooLong { max: usize },

    #[error("Recipe text cannot be empty")]
    EmptyText,

    #[error("Recipe image is required")]
    MissingImage,

    #[error("Recipe image reference cannot be longer than {max} characters")]
    ImageTooLong { max: usize },
}

impl RecipeValidationError {
    /// Stable identifier of the failure, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyIngredients => "EmptyIngredients",
            Self::DuplicateIngredient(_) => "DuplicateIngredient",
            Self::EmptyTags => "EmptyTags",
            Self::DuplicateTag(_) => "DuplicateTag",
            Self::InvalidAmount { .. } => "InvalidAmount",
            Self::InvalidCookingTime(_) => "InvalidCookingTime",
            Self::EmptyName => "EmptyName",
            Self::NameTooLong { .. } => "NameTooLong",
            Self::EmptyText => "EmptyText",
            Self::MissingImage => "MissingImage",
            Self::ImageTooLong { .. } => "ImageTooLong",
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionError {
    #[error("Cannot subscribe to yourself")]
    SelfSubscription,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortLinkError {
    #[error("Invalid short link code: {0}")]
    InvalidCode(String),
}

/// Comma-separated ids, as used in error messages.
pub fn join_ids(ids: &[i32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
