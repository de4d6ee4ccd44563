//! YAML file-backed accessibility profile store.

pub mod yaml_profile_repository;

pub use yaml_profile_repository::YamlProfileRepository;
