use std::process::ExitCode;

fn main() -> ExitCode {
    match roomchat::cli::main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("❌ {err}");
            ExitCode::FAILURE
        }
    }
}
