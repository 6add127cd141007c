// Entrypoint for the CLI application.
// - Keeps `main` small: load the configuration, build the API client,
//   run the startup checks and hand control to the UI loop.
// - Returns `anyhow::Result` to simplify error handling for the prototype.

use consult_cli::{api::ChatClient, config::Config, ui};

fn main() -> anyhow::Result<()> {
    // Resolve the secret key (environment, `.env` file or secrets file)
    // and the endpoint settings. See `config::Config::load`.
    let cfg = Config::load()?;
    let api = ChatClient::from_config(&cfg)?;

    // Key prefix check and connectivity probe. A malformed key or an
    // unreachable endpoint halts here, before the form is shown.
    ui::startup_check(&cfg, &api)?;

    // Start the interactive loop. This call blocks until the user exits.
    ui::main_menu(api)?;
    Ok(())
}
