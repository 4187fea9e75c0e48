use std::process;

fn main() {
    match kvlog::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("kvlog: {}", err);
            process::exit(1);
        }
    }
}
