use std::process::ExitCode;

fn main() -> ExitCode {
    cstjson::cli::run()
}
