mod args;
mod config;
mod entry;
mod error;
mod http;
mod instruction;
mod logger;
mod schedule;
mod shutdown;
mod smash;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
