use serde_json::Number;

/// Pure dish model for inter-module communication (no serde/utoipa)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dish {
    pub id: String,
    pub name: String,
    /// `None` when the dish was created without persisting its description.
    pub description: Option<String>,
    /// Kept exactly as received (an integer stays an integer).
    pub price: Number,
    pub image_url: String,
}

/// Validated data for a new dish; the id is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDish {
    pub name: String,
    pub description: Option<String>,
    pub price: Number,
    pub image_url: String,
}

/// Full replacement of a dish's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishPatch {
    pub name: String,
    pub description: String,
    pub price: Number,
    pub image_url: String,
}

impl Dish {
    pub fn from_new(id: String, new_dish: NewDish) -> Self {
        Self {
            id,
            name: new_dish.name,
            description: new_dish.description,
            price: new_dish.price,
            image_url: new_dish.image_url,
        }
    }

    /// Overwrite every mutable field; the id never changes.
    pub fn apply(&mut self, patch: DishPatch) {
        self.name = patch.name;
        self.description = Some(patch.description);
        self.price = patch.price;
        self.image_url = patch.image_url;
    }
}
