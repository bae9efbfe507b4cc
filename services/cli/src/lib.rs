mod cli;
mod commands;
mod demo;
mod infra;

use directory_rank::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
