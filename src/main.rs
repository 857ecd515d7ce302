use std::{env, fs::read_to_string, path::Path, process, rc::Rc, time::Instant};

use cardscript::{
    display_error, lexer::lexer::tokenize, parser::parser::parse, type_checker::type_checker::check,
};

const USAGE: &str = "Usage: cardscript <file> [--dump]";

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let dump = args.iter().any(|arg| arg == "--dump");
    let files: Vec<&String> = args.iter().filter(|arg| !arg.starts_with("--")).collect();

    let [file_path] = files.as_slice() else {
        eprintln!("{}", USAGE);
        process::exit(2);
    };

    let file_name = Path::new(file_path.as_str())
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.to_string());

    let file_contents = match read_to_string(file_path.as_str()) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("Failed to read {}: {}", file_path, err);
            process::exit(1);
        }
    };

    let start = Instant::now();

    let tokens = match tokenize(file_contents.clone(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(&error, &file_contents);
            process::exit(1);
        }
    };

    println!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let program = match parse(tokens, Rc::new(file_name)) {
        Ok(program) => program,
        Err(error) => {
            display_error(&error, &file_contents);
            process::exit(1);
        }
    };

    println!("Parsed in {:?}", parse_start.elapsed());

    let check_start = Instant::now();
    if let Err(error) = check(&program) {
        display_error(&error, &file_contents);
        process::exit(1);
    }

    println!("Checked in {:?}", check_start.elapsed());

    if dump {
        println!("{:#?}", program);
    }

    println!(
        "{} declarations ok, total time: {:?}",
        program.declarations.len(),
        start.elapsed()
    );
}
