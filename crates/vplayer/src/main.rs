#![forbid(unsafe_code)]

fn main() {
    let cli = match vplayer::cli::parse_from(std::env::args_os()) {
        Ok(cli) => cli,
        Err(error) => {
            let code = vplayer::cli::parse_exit_code(&error);
            let _ = error.print();
            std::process::exit(code);
        }
    };
    vplayer::logging::init();
    if let Err(error) = vplayer::cli::run(&cli) {
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
