mod cli;
mod render;

use board_report::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
