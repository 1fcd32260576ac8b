use std::process::ExitCode;

fn main() -> ExitCode {
    match sentinel_app::platform::run_app() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("sentinel: {err:#}");
            ExitCode::FAILURE
        }
    }
}
