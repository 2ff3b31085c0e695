use clap::{Arg, Command};

pub fn with_commands(command: Command) -> Command {
    command
        .subcommand(
            Command::new("login")
                .about("Sign in and store the session")
                .arg(
                    Arg::new("username")
                        .short('u')
                        .long("username")
                        .help("Account username")
                        .env("CUTIS_USERNAME")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .short('p')
                        .long("password")
                        .help("Account password")
                        .env("CUTIS_PASSWORD")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("register")
                .about("Create a new account")
                .arg(
                    Arg::new("username")
                        .short('u')
                        .long("username")
                        .help("Account username")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .short('p')
                        .long("password")
                        .help("Account password")
                        .required(true),
                )
                .arg(
                    Arg::new("role")
                        .long("role")
                        .help("Account role")
                        .value_parser(["patient", "dermatologist"])
                        .default_value("patient"),
                ),
        )
        .subcommand(Command::new("logout").about("Clear the stored session"))
}
