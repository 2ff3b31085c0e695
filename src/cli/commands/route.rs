use clap::{Arg, Command};

pub fn with_commands(command: Command) -> Command {
    command.subcommand(
        Command::new("route")
            .about("Resolve a client route against the stored session")
            .arg(
                Arg::new("path")
                    .help("Route path, for example / or /patient-requests")
                    .required(true),
            ),
    )
}
