use std::borrow::Cow;
use std::ffi::OsString;
use std::path::Path;
use std::process::ExitCode;

use log::debug;

mod amount;
mod converter;
mod csv_handler;
mod error;

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<OsString> = std::env::args_os().collect();

    let [_, input_path, output_path] = args.as_slice() else {
        let program = args
            .first()
            .map_or(Cow::Borrowed("bunq_to_ing"), |arg| arg.to_string_lossy());
        println!("usage: {program} input_file output_file");
        return ExitCode::SUCCESS;
    };

    match converter::convert(Path::new(input_path), Path::new(output_path)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Conversion failed: {e:?}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
