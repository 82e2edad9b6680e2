mod app;
mod config;
mod logic;
mod models;
mod mvu;
mod ui;
mod utils;

fn main() -> eframe::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = config::load();
    app::run(config)
}
