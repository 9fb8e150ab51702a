use std::process::ExitCode;

use frontmeta::ui::output;

fn main() -> ExitCode {
    match frontmeta::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
