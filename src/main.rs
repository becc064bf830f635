use std::process;

use simple_shell_rs::config::ConfigLoader;
use simple_shell_rs::history;
use simple_shell_rs::repl;
use simple_shell_rs::signal::SignalController;

fn main() {
    let config = ConfigLoader::default_config();
    let history = history::shared(config.history_max);

    // Keep the controller alive for the whole session; it owns the
    // armed/terminated state the interrupt path transitions through.
    let _controller = match SignalController::install(history.clone()) {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("simple-shell: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = repl::run(&config, &history) {
        eprintln!("simple-shell: {}", e);
        process::exit(1);
    }
}
