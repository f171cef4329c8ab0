// Adapters layer: concrete implementations for external systems (wiki API, storage).

pub mod storage;
pub mod wiki_api;
