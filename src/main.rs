use std::process::ExitCode;

fn main() -> ExitCode {
    match mailstress::entry::run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("mailstress: {}", err);
            ExitCode::FAILURE
        }
    }
}
