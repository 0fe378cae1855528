pub mod bingo_repository;

pub use bingo_repository::BingoRepository;
