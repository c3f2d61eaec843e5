use doyourtasks_core::{default_log_level, init_logging, Config};

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            std::process::exit(2);
        }
    };

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(default_log_level(), log_dir) {
            eprintln!("file logging disabled: {err}");
        }
    }

    if let Err(err) = doyourtasks_server::serve(&config).await {
        eprintln!("server error: {err}");
        std::process::exit(1);
    }
}
