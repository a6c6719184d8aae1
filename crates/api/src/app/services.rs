use std::sync::Arc;

use bookstore_inventory::InventoryService;
use bookstore_store::InMemoryBookStore;

/// Concrete store behind the service; swap here when a durable backend
/// lands.
pub type Store = Arc<InMemoryBookStore>;

/// Shared application services handed to handlers via `Extension`.
pub struct AppServices {
    inventory: InventoryService<Store>,
}

impl AppServices {
    pub fn inventory(&self) -> &InventoryService<Store> {
        &self.inventory
    }
}

pub fn build_services() -> AppServices {
    let store = Arc::new(InMemoryBookStore::new());
    AppServices {
        inventory: InventoryService::new(store),
    }
}
