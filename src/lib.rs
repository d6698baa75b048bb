//! readshelf — personal library catalog kept in a local JSON file.
//!
//! domain (Book / Library / validators) → application (service, rendering)
//! → infra (JSON file) → interface (interactive menu).

pub mod domain {
    pub mod error;
    pub mod model {
        pub mod book;
        pub mod library;
        pub mod stats;
    }
    pub mod repository;
    pub mod validate;
}

pub mod application {
    pub mod error;
    pub mod render;
    pub mod service;
}

pub mod infra {
    pub mod json_store;
}

pub mod interface {
    pub mod console;
    pub mod menu;
}
