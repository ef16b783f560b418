use actix_web::{web, App, HttpServer};
use clap::Parser;

use store_kv::{configure, init_logging, Store};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 8080)]
    port: u16,
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Number of HTTP workers, one per core when unset.
    #[arg(short, long)]
    workers: Option<usize>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    init_logging();

    let store = web::Data::new(Store::new());

    let mut http_server =
        HttpServer::new(move || App::new().app_data(store.clone()).configure(configure));
    if let Some(workers) = args.workers {
        http_server = http_server.workers(workers);
    }

    log::info!("Listening on {}:{}", args.host, args.port);
    http_server
        .bind((args.host.as_str(), args.port))?
        .run()
        .await
}
