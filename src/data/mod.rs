//! SQLite persistence: schema, row type, DAO, mapper and the repository
//! implementation handed to the use cases.

pub mod dao;
pub mod database;
pub mod entity;
pub mod mapper;
pub mod repository;

pub use dao::TaskDao;
pub use database::TaskDatabase;
pub use entity::TaskEntity;
pub use repository::SqliteTaskRepository;
