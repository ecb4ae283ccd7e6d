pub mod repository;
pub mod usecase;

pub use repository::{TaskRepository, TaskStream};
pub use usecase::TaskUseCases;
