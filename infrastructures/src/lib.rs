pub mod repositories;
pub mod seed_files;
