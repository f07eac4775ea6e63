use shoe_catalog_shared::CategoryView;

/// Row of the `category` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    /// Projection sent to API clients
    pub fn serialize(&self) -> CategoryView {
        CategoryView {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

impl From<Category> for CategoryView {
    fn from(category: Category) -> Self {
        CategoryView {
            id: category.id,
            name: category.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_exact_keys() {
        let category = Category {
            id: 3,
            name: "Shoes".to_string(),
        };
        let value = serde_json::to_value(category.serialize()).unwrap();
        assert_eq!(value, json!({"id": 3, "name": "Shoes"}));
    }

    #[test]
    fn test_into_view_matches_serialize() {
        let category = Category {
            id: 1,
            name: "Boots".to_string(),
        };
        assert_eq!(category.serialize(), CategoryView::from(category));
    }
}
