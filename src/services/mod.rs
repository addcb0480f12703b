pub mod document_store;
pub mod image_processor;
pub mod media_service;
