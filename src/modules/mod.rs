pub mod books;
pub mod users;

use folio_kernel::ModuleRegistry;

use crate::state::AppState;

/// Register all application modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, state: AppState) {
    registry.register(books::create_module(state));
}
