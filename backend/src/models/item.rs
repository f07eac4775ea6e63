use shoe_catalog_shared::ItemView;

/// Row of the `items` table
///
/// `category_id` is nullable in storage, though every item created through
/// the API carries one.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category_id: Option<i64>,
}

impl Item {
    /// Projection sent to API clients; the category reference is left out
    pub fn serialize(&self) -> ItemView {
        ItemView {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

impl From<Item> for ItemView {
    fn from(item: Item) -> Self {
        ItemView {
            id: item.id,
            name: item.name,
            description: item.description,
        }
    }
}
