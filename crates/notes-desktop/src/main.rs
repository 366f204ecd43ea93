//! Notes Desktop Application
//!
//! A single-user note-taking app with search, sort, and autosave.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod components;
mod config;
mod state;
mod theme;
mod views;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("notes_core=debug".parse().unwrap())
                .add_directive("notes_desktop=debug".parse().unwrap()),
        )
        .init();

    tracing::info!("Starting Notes...");

    dioxus::launch(app::App);
}
