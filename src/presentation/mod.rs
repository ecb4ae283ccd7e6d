//! State holders for the two screens.
//!
//! Each holder publishes its state through a `tokio::sync::watch` channel and
//! runs its work inside a [`ViewModelScope`] so dropping the holder stops it.

pub mod edit;
pub mod list;
pub mod scope;

#[cfg(test)]
pub(crate) mod test_support;

pub use edit::{TaskEditEvent, TaskEditState, TaskEditViewModel};
pub use list::{TaskListEvent, TaskListState, TaskListViewModel};
pub use scope::ViewModelScope;
