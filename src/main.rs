use clap::Parser;

use minilinker::config::{Cli, RunEnvironment, StaticConfig};
use minilinker::errors::MinilinkerError;
use minilinker::runtime::modes::run_server;
use minilinker::system::init_logging;

/// 打印致命错误
fn report_fatal(err: &anyhow::Error) {
    match err.downcast_ref::<MinilinkerError>() {
        Some(e) => eprintln!("{}", e.format_colored()),
        None => eprintln!("[ERROR] {:#}", err),
    }
}

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.generate_config {
        println!("{}", StaticConfig::generate_sample_config());
        return;
    }

    let mut config = match StaticConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[ERROR] Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if cli.dev {
        config.server.environment = RunEnvironment::Development;
    }

    let log_guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("[ERROR] {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_server(config).await {
        report_fatal(&e);
        // 退出前刷新日志
        drop(log_guard);
        std::process::exit(1);
    }
}
