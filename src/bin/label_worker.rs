use twibbly::{Config, init_tracing, run_label_worker};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level, config.logging.json_format);

    if let Err(err) = run_label_worker(&config).await {
        eprintln!("Label worker failed: {err}");
        std::process::exit(1);
    }
}
