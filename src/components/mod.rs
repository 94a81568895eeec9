//! UI Components
//!
//! Reusable Leptos components.

mod clear_completed;
mod confirm_dialog;
mod drop_zone;
mod item_list;
mod item_row;
mod login_form;
mod new_item_form;
mod store_filter;
mod stores_page;
mod suggestion_autocomplete;
mod suggestions_page;

pub use clear_completed::ClearCompleted;
pub use confirm_dialog::{ConfirmDialog, RemoveButton};
pub use drop_zone::{DropZone, DropZoneProps};
pub use item_list::{bind_list_reordering, ItemList};
pub use item_row::ItemRow;
pub use login_form::LoginForm;
pub use new_item_form::NewItemForm;
pub use store_filter::StoreFilterSelect;
pub use stores_page::StoresPage;
pub use suggestion_autocomplete::SuggestionAutocomplete;
pub use suggestions_page::SuggestionsPage;
