use std::{env, process::ExitCode, time::Instant};

use search_query::{config::QueryParser, render_error, resolver::KeyValueResolver};
use tracing_subscriber::EnvFilter;

const DEFAULT_KEYS: &str = "tit,com,zdb,sig,pub,acc";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    let (keys, query) = match args.as_slice() {
        [flag, keys, query] if flag == "--keys" => (keys.as_str(), query.as_str()),
        [query] => (DEFAULT_KEYS, query.as_str()),
        _ => {
            eprintln!("usage: search-query [--keys k1,k2,...] <query>");
            return ExitCode::FAILURE;
        }
    };

    let resolver = KeyValueResolver::new(keys.split(',').map(str::trim).filter(|key| !key.is_empty()));
    let key_pattern = match resolver.key_pattern() {
        Ok(pattern) => pattern,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };
    let parser = QueryParser::new(key_pattern, resolver);

    let start = Instant::now();
    match parser.parse(query) {
        Ok(expr) => {
            println!("{}", expr);
            tracing::info!(elapsed = ?start.elapsed(), depth = expr.depth(), "parsed");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprint!("{}", render_error(&error, query));
            ExitCode::FAILURE
        }
    }
}
