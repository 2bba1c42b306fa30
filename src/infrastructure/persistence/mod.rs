mod in_memory_memory_repository;
mod postgres_memory_repository;

pub use in_memory_memory_repository::InMemoryMemoryRepository;
pub use postgres_memory_repository::PostgresMemoryRepository;
