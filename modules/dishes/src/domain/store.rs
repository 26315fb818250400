use parking_lot::RwLock;
use tracing::debug;

use crate::contract::model::{Dish, DishPatch};
use crate::domain::error::DishError;

/// Port for the domain layer: the dish collection the service reads and mutates.
///
/// Implementations keep insertion order and never remove entries.
pub trait DishStore: Send + Sync {
    /// Snapshot of every dish in insertion order.
    fn list(&self) -> Vec<Dish>;
    /// Exact id lookup.
    fn find(&self, id: &str) -> Option<Dish>;
    /// Append a fully-formed dish. Fails if the id is already taken.
    fn insert(&self, dish: Dish) -> Result<(), DishError>;
    /// Overwrite the mutable fields of `id` in place and return the result.
    fn update(&self, id: &str, patch: DishPatch) -> Option<Dish>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-memory store: a vector behind a single reader/writer lock.
#[derive(Debug, Default)]
pub struct InMemoryDishStore {
    dishes: RwLock<Vec<Dish>>,
}

impl InMemoryDishStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with `dishes`, rejecting duplicate ids.
    pub fn with_dishes(dishes: impl IntoIterator<Item = Dish>) -> Result<Self, DishError> {
        let store = Self::new();
        for dish in dishes {
            store.insert(dish)?;
        }
        Ok(store)
    }
}

impl DishStore for InMemoryDishStore {
    fn list(&self) -> Vec<Dish> {
        self.dishes.read().clone()
    }

    fn find(&self, id: &str) -> Option<Dish> {
        self.dishes.read().iter().find(|d| d.id == id).cloned()
    }

    fn insert(&self, dish: Dish) -> Result<(), DishError> {
        let mut dishes = self.dishes.write();
        if dishes.iter().any(|d| d.id == dish.id) {
            return Err(DishError::duplicate_id(dish.id));
        }
        debug!(dish_id = %dish.id, total = dishes.len() + 1, "dish stored");
        dishes.push(dish);
        Ok(())
    }

    fn update(&self, id: &str, patch: DishPatch) -> Option<Dish> {
        let mut dishes = self.dishes.write();
        let dish = dishes.iter_mut().find(|d| d.id == id)?;
        dish.apply(patch);
        debug!(dish_id = %id, "dish overwritten");
        Some(dish.clone())
    }

    fn len(&self) -> usize {
        self.dishes.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Number;

    fn dish(id: &str, name: &str) -> Dish {
        Dish {
            id: id.into(),
            name: name.into(),
            description: None,
            price: Number::from(10),
            image_url: format!("http://img/{id}.jpg"),
        }
    }

    #[test]
    fn keeps_insertion_order() {
        let store = InMemoryDishStore::new();
        assert!(store.is_empty());
        for (id, name) in [("b", "Soup"), ("a", "Salad"), ("c", "Cake")] {
            store.insert(dish(id, name)).unwrap();
        }
        let ids: Vec<String> = store.list().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, ["b", "a", "c"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = InMemoryDishStore::with_dishes([dish("x", "One"), dish("x", "Two")]).unwrap_err();
        assert_eq!(err, DishError::duplicate_id("x"));
    }

    #[test]
    fn find_uses_exact_id_match() {
        let store = InMemoryDishStore::with_dishes([dish("42", "Pie")]).unwrap();
        assert_eq!(store.find("42").map(|d| d.name), Some("Pie".to_string()));
        assert!(store.find("4").is_none());
        assert!(store.find("42 ").is_none());
    }

    #[test]
    fn update_overwrites_in_place() {
        let store = InMemoryDishStore::with_dishes([dish("a", "Old"), dish("b", "Other")]).unwrap();
        let patch = DishPatch {
            name: "New".into(),
            description: "fresh".into(),
            price: Number::from_f64(7.5).unwrap(),
            image_url: "http://img/new.jpg".into(),
        };

        let updated = store.update("a", patch).unwrap();
        assert_eq!(updated.id, "a");
        assert_eq!(updated.description.as_deref(), Some("fresh"));
        assert_eq!(store.find("a"), Some(updated));
        assert_eq!(store.list()[0].name, "New", "position is preserved");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn update_of_unknown_id_is_none() {
        let store = InMemoryDishStore::new();
        let patch = DishPatch {
            name: "n".into(),
            description: "d".into(),
            price: Number::from(1),
            image_url: "i".into(),
        };
        assert!(store.update("missing", patch).is_none());
        assert!(store.is_empty());
    }
}
