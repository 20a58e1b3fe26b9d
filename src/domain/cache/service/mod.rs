pub mod cache_service;
