pub mod api;
pub mod cards;
pub mod carousel;
pub mod client;
pub mod config;
pub mod controller;
pub mod data_models;
pub mod error;
pub mod extractor;
pub mod langflow;
pub mod layout;
pub mod view;
